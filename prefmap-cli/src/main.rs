//! prefmap CLI - Command-line interface
//!
//! This binary provides a command-line interface to the prefmap library:
//! region detection, projection, marker and preview rendering, and
//! configuration management.

mod commands;
mod error;
mod runner;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::config::ConfigCommands;
use commands::detect::DetectArgs;
use commands::marker::MarkerArgs;
use commands::preview::PreviewArgs;
use commands::project::ProjectArgs;
use commands::regions::RegionsArgs;
use error::CliError;
use runner::GlobalOptions;

#[derive(Parser)]
#[command(name = "prefmap")]
#[command(version = prefmap::VERSION)]
#[command(about = "Find the region containing a coordinate", long_about = None)]
struct Cli {
    /// Enable debug logging (also mirrors log output to stderr)
    #[arg(long, global = true)]
    debug: bool,

    /// Configuration file (default: ~/.prefmap/config.ini)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect which region contains a point
    Detect(DetectArgs),

    /// Project a point onto a region's canvas
    Project(ProjectArgs),

    /// Write a region's SVG with a marker at a point
    Marker(MarkerArgs),

    /// Render the detected region with a marker as PNG
    Preview(PreviewArgs),

    /// List configured regions
    Regions(RegionsArgs),

    /// Manage the configuration file
    #[command(subcommand)]
    Config(ConfigCommands),
}

fn main() {
    let cli = Cli::parse();
    let options = GlobalOptions {
        debug: cli.debug,
        config: cli.config,
    };

    if let Err(e) = dispatch(&options, cli.command) {
        e.exit();
    }
}

fn dispatch(options: &GlobalOptions, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Detect(args) => commands::detect::run(options, args),
        Commands::Project(args) => commands::project::run(options, args),
        Commands::Marker(args) => commands::marker::run(options, args),
        Commands::Preview(args) => commands::preview::run(options, args),
        Commands::Regions(args) => commands::regions::run(options, args),
        Commands::Config(command) => commands::config::run(options, command),
    }
}
