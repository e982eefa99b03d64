//! High-level service facade for prefmap operations.
//!
//! This module wires configuration, shape assets, the region registry and
//! the detector together, so front ends only deal with coordinates and
//! region ids.
//!
//! # Example
//!
//! ```ignore
//! use prefmap::config::ConfigFile;
//! use prefmap::geo::GeoPoint;
//! use prefmap::service::PrefmapService;
//!
//! let service = PrefmapService::from_config(&ConfigFile::load()?)?;
//! let result = service.detect(GeoPoint::new(40.82, 140.74))?;
//! println!("{} at {}", result.region_id, result.raster_point);
//! ```

mod error;
mod facade;
mod report;

pub use error::ServiceError;
pub use facade::PrefmapService;
pub use report::ProjectionReport;
