//! prefmap - Locate coordinates within administrative regions
//!
//! This library decides which configured region (a prefecture, for example)
//! contains a latitude/longitude pair. Each region is a bounding box plus a
//! vector outline; detection narrows candidates by bounding box, projects the
//! point onto each candidate's raster canvas, and renders the outline to test
//! whether the pixel under the point is covered.
//!
//! # High-Level API
//!
//! For most use cases, the [`service`] module provides a simplified facade:
//!
//! ```ignore
//! use prefmap::config::ConfigFile;
//! use prefmap::geo::GeoPoint;
//! use prefmap::service::PrefmapService;
//!
//! let service = PrefmapService::from_config(&ConfigFile::load()?)?;
//! let result = service.detect(GeoPoint::new(40.82, 140.74))?;
//! println!("{}", result.region_id);
//! ```

pub mod asset;
pub mod candidate;
pub mod config;
pub mod detect;
pub mod geo;
pub mod link;
pub mod logging;
pub mod marker;
pub mod preview;
pub mod raster;
pub mod region;
pub mod service;

/// Version of the prefmap library and CLI.
///
/// This is synchronized across all components in the workspace.
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
        assert_eq!(VERSION, env!("CARGO_PKG_VERSION"));
    }
}
