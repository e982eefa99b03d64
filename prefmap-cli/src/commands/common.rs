//! Common types and utilities shared across CLI commands.

use clap::Args;
use prefmap::config::ResolverSettings;
use prefmap::geo::GeoPoint;
use prefmap::link::{resolve_point, ReqwestResolver};
use serde::Serialize;
use tracing::debug;

use crate::error::CliError;

/// Location of the point to look up: explicit coordinates or a map link.
#[derive(Debug, Clone, Args)]
pub struct LocationArgs {
    /// Latitude in decimal degrees
    #[arg(long, requires = "lng", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    /// Longitude in decimal degrees
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lng: Option<f64>,

    /// Map link carrying the coordinates ("?q=LAT,LNG" or "/@LAT,LNG");
    /// short links are expanded over the network
    #[arg(long, conflicts_with_all = ["lat", "lng"], required_unless_present = "lat")]
    pub url: Option<String>,
}

impl LocationArgs {
    /// Resolve to a coordinate, expanding `--url` with the configured resolver
    /// when it carries no coordinates itself.
    pub fn resolve(&self, settings: &ResolverSettings) -> Result<GeoPoint, CliError> {
        match (&self.url, self.lat, self.lng) {
            (Some(url), _, _) => {
                let resolver = ReqwestResolver::from_settings(settings)?;
                let point = resolve_point(&resolver, url)?;
                debug!(%url, %point, "Resolved map link");
                Ok(point)
            }
            (None, Some(lat), Some(lng)) => Ok(GeoPoint::new(lat, lng)),
            _ => Err(CliError::Usage(
                "Specify a location with --lat and --lng, or --url".to_string(),
            )),
        }
    }
}

/// Print `value` to stdout as pretty JSON.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
