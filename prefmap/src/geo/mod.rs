//! Coordinate projection module
//!
//! Provides the geographic and raster coordinate types, and the linear
//! projection that maps a geographic point onto a region's map canvas.
//!
//! A region's canvas is laid out so that its four corners coincide with the
//! four corners of the region's bounding box. Longitude maps to `x` left to
//! right; latitude maps to `y` top to bottom, so the northern edge is row 0.

mod types;


pub use types::{
    Bound, GeoBounds, GeoPoint, OutOfBoundsError, RasterPoint, MAX_LAT, MAX_LNG, MIN_LAT, MIN_LNG,
};

use crate::region::Region;

/// Projects a geographic point into a region's raster space.
///
/// # Arguments
///
/// * `point` - Geographic coordinate to project
/// * `region` - Region whose bounding box and canvas define the transform
///
/// # Returns
///
/// The raster position, or an [`OutOfBoundsError`] naming the violated edge
/// when the point lies strictly outside the region's bounding box. Points on
/// an edge are valid.
#[inline]
pub fn project(point: GeoPoint, region: &Region) -> Result<RasterPoint, OutOfBoundsError> {
    let bounds = region.bounds();
    if let Some(bound) = bounds.violated_bound(point) {
        return Err(OutOfBoundsError {
            region_id: region.id().to_string(),
            point,
            bound,
            bounds: *bounds,
        });
    }

    Ok(project_onto(
        point,
        bounds,
        region.canvas_width(),
        region.canvas_height(),
    ))
}

/// Applies the box-to-canvas transform without checking containment.
///
/// Points outside `bounds` land outside the canvas.
#[inline]
pub fn project_onto(point: GeoPoint, bounds: &GeoBounds, width: u32, height: u32) -> RasterPoint {
    let x = (point.lng - bounds.min_lng) / bounds.lng_span() * width as f64;
    let y = (bounds.max_lat - point.lat) / bounds.lat_span() * height as f64;
    RasterPoint { x, y }
}
