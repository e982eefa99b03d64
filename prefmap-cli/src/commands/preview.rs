//! Preview command: detect a point and render the matched region as PNG.

use std::path::PathBuf;

use clap::Args;
use prefmap::preview::save_preview;

use super::common::LocationArgs;
use crate::error::CliError;
use crate::runner::{CliRunner, GlobalOptions};

/// Arguments for the preview command.
#[derive(Debug, Args)]
pub struct PreviewArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Output PNG file
    #[arg(long, short)]
    pub output: PathBuf,
}

/// Render the detected region with a marker at the point.
pub fn run(options: &GlobalOptions, args: PreviewArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(options)?;
    runner.log_startup("preview");

    let point = args.location.resolve(&runner.config().resolver)?;
    let (result, pixmap) = runner.create_service()?.preview(point)?;
    save_preview(&pixmap, &args.output)?;

    println!(
        "Wrote {}x{} preview of {} to {}",
        pixmap.width(),
        pixmap.height(),
        result.region_id,
        args.output.display()
    );
    Ok(())
}
