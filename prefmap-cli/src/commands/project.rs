//! Projection command: place a point on one region's canvas.

use clap::Args;

use super::common::{print_json, LocationArgs};
use crate::error::CliError;
use crate::runner::{CliRunner, GlobalOptions};

/// Arguments for the project command.
#[derive(Debug, Args)]
pub struct ProjectArgs {
    /// Region id (see 'prefmap regions')
    #[arg(long)]
    pub region: String,

    #[command(flatten)]
    pub location: LocationArgs,

    /// Print the projection report as JSON
    #[arg(long)]
    pub json: bool,
}

/// Project a point into a named region without running detection.
pub fn run(options: &GlobalOptions, args: ProjectArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(options)?;
    runner.log_startup("project");

    let point = args.location.resolve(&runner.config().resolver)?;
    let report = runner.create_service()?.project_into(&args.region, point)?;

    if args.json {
        print_json(&report)
    } else {
        println!("{}", report);
        Ok(())
    }
}
