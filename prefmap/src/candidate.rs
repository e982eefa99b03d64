//! Bounding-box candidate filter.
//!
//! Coarse first pass of detection: every region whose bounding box contains
//! the point is a candidate. Boxes overlap along coastlines and borders, so a
//! point may have several candidates; the shape test decides between them.

use crate::geo::GeoPoint;
use crate::region::{Region, RegionRegistry};

/// Regions whose bounding box contains `point`, edges inclusive.
///
/// Returned in ascending order-code order. Empty when no box matches; the
/// caller decides whether that is an error.
pub fn filter(point: GeoPoint, registry: &RegionRegistry) -> Vec<&Region> {
    // Registry iteration order is ascending order code
    registry
        .iter()
        .filter(|region| region.bounds().contains(point))
        .collect()
}
