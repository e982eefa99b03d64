//! Marker command: write a region's SVG with a location marker.

use std::path::PathBuf;

use clap::Args;

use super::common::LocationArgs;
use crate::error::CliError;
use crate::runner::{CliRunner, GlobalOptions};

/// Arguments for the marker command.
#[derive(Debug, Args)]
pub struct MarkerArgs {
    /// Region id (see 'prefmap regions')
    #[arg(long)]
    pub region: String,

    #[command(flatten)]
    pub location: LocationArgs,

    /// Output SVG file
    #[arg(long, short)]
    pub output: PathBuf,
}

/// Write the region outline with a marker at the point.
pub fn run(options: &GlobalOptions, args: MarkerArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(options)?;
    runner.log_startup("marker");

    let point = args.location.resolve(&runner.config().resolver)?;
    let service = runner.create_service()?;
    let svg = service.marker_svg(&args.region, point)?;

    runner.write_file(&args.output, &svg)?;
    println!(
        "Wrote {} marker at {} to {}",
        args.region,
        point,
        args.output.display()
    );
    Ok(())
}
