//! Region listing command.

use clap::Args;
use prefmap::region::{Region, RegionSpec};

use super::common::print_json;
use crate::error::CliError;
use crate::runner::{CliRunner, GlobalOptions};

/// Arguments for the regions command.
#[derive(Debug, Args)]
pub struct RegionsArgs {
    /// Print the region table as JSON
    #[arg(long)]
    pub json: bool,
}

/// List configured regions in detection order.
pub fn run(options: &GlobalOptions, args: RegionsArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(options)?;
    runner.log_startup("regions");

    let service = runner.create_service()?;
    let regions = service.regions();

    if args.json {
        let specs: Vec<&RegionSpec> = regions.iter().map(Region::spec).collect();
        return print_json(&specs);
    }

    println!(
        "{:>4}  {:<12} {:<10} {:<38} {:>11}  SHAPE",
        "CODE", "ID", "NAME", "BOUNDS", "CANVAS"
    );
    for region in regions {
        println!("{}", format_row(region));
    }
    println!();
    println!(
        "{} region(s), tested in {} order",
        regions.len(),
        service.detector().tie_break()
    );
    Ok(())
}

fn format_row(region: &Region) -> String {
    format!(
        "{:>4}  {:<12} {:<10} {:<38} {:>11}  {}",
        region.order_code(),
        region.id(),
        region.display_name(),
        region.bounds().to_string(),
        format!("{}x{}", region.canvas_width(), region.canvas_height()),
        region.shape_ref()
    )
}
