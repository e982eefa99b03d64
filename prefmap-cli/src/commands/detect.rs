//! Region detection command.

use clap::Args;
use prefmap::detect::{CandidateTrace, DetectionError, DetectionResult, TraceEntry};
use prefmap::geo::GeoPoint;
use prefmap::region::Region;
use prefmap::service::ServiceError;
use serde::Serialize;
use tracing::info;

use super::common::{print_json, LocationArgs};
use crate::error::CliError;
use crate::runner::{CliRunner, GlobalOptions};

/// Arguments for the detect command.
#[derive(Debug, Args)]
pub struct DetectArgs {
    #[command(flatten)]
    pub location: LocationArgs,

    /// Print the detection result as JSON
    #[arg(long)]
    pub json: bool,
}

/// JSON body printed when `--json` detection finds no region.
#[derive(Debug, Serialize)]
struct DetectionFailure<'a> {
    error: String,
    point: GeoPoint,
    candidate_trace: &'a [TraceEntry],
}

impl<'a> DetectionFailure<'a> {
    fn new(point: GeoPoint, err: &'a DetectionError) -> Self {
        Self {
            error: err.to_string(),
            point,
            candidate_trace: err.trace().map(CandidateTrace::entries).unwrap_or(&[]),
        }
    }
}

/// Detect which configured region contains a point.
pub fn run(options: &GlobalOptions, args: DetectArgs) -> Result<(), CliError> {
    let runner = CliRunner::new(options)?;
    runner.log_startup("detect");

    let point = args.location.resolve(&runner.config().resolver)?;
    let service = runner.create_service()?;
    let result = match service.detect(point) {
        Ok(result) => result,
        Err(ServiceError::Detection(err)) if args.json => {
            print_json(&DetectionFailure::new(point, &err))?;
            return Err(ServiceError::Detection(err).into());
        }
        Err(e) => return Err(e.into()),
    };

    info!(region = %result.region_id, %point, "Detected region");

    if args.json {
        return print_json(&result);
    }

    let region = service.region(&result.region_id)?;
    print_result(&result, region);
    Ok(())
}

fn print_result(result: &DetectionResult, region: &Region) {
    println!("Region:     {} ({})", region.display_name(), result.region_id);
    println!("Point:      {}", result.point);
    println!(
        "Raster:     {} on {}x{}",
        result.raster_point,
        region.canvas_width(),
        region.canvas_height()
    );
    println!("Candidates:");
    for (i, entry) in result.candidate_trace.iter().enumerate() {
        println!("  {}. {}", i + 1, entry);
    }
}
