//! Geographic and raster coordinate type definitions

use std::fmt;

use serde::{Deserialize, Serialize};

/// Valid latitude range
pub const MIN_LAT: f64 = -90.0;
pub const MAX_LAT: f64 = 90.0;

/// Valid longitude range
pub const MIN_LNG: f64 = -180.0;
pub const MAX_LNG: f64 = 180.0;

/// A geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude, positive north
    pub lat: f64,
    /// Longitude, positive east
    pub lng: f64,
}

impl GeoPoint {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Returns true if both components are finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        (MIN_LAT..=MAX_LAT).contains(&self.lat) && (MIN_LNG..=MAX_LNG).contains(&self.lng)
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(lat={}, lng={})", self.lat, self.lng)
    }
}

/// A position in a region's raster space.
///
/// The origin is the top-left corner of the canvas; `y` grows downward.
/// Coordinates are kept as floats and only truncated when a pixel is sampled.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RasterPoint {
    pub x: f64,
    pub y: f64,
}

impl RasterPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Integer pixel containing this point, or `None` when the point lies
    /// outside `[0, width) x [0, height)` or is not finite.
    pub fn pixel(&self, width: u32, height: u32) -> Option<(u32, u32)> {
        let x = self.x.floor();
        let y = self.y.floor();
        if !(x >= 0.0 && y >= 0.0 && x < width as f64 && y < height as f64) {
            return None;
        }
        Some((x as u32, y as u32))
    }
}

impl fmt::Display for RasterPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x={:.1}, y={:.1})", self.x, self.y)
    }
}

/// One of the four edges of a bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bound {
    MinLat,
    MaxLat,
    MinLng,
    MaxLng,
}

impl Bound {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bound::MinLat => "min-lat",
            Bound::MaxLat => "max-lat",
            Bound::MinLng => "min-lng",
            Bound::MaxLng => "max-lng",
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Axis-aligned geographic bounding box.
///
/// All four edges are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    /// Southern edge
    pub min_lat: f64,
    /// Northern edge
    pub max_lat: f64,
    /// Western edge
    pub min_lng: f64,
    /// Eastern edge
    pub max_lng: f64,
}

impl GeoBounds {
    pub fn new(min_lat: f64, max_lat: f64, min_lng: f64, max_lng: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lng,
            max_lng,
        }
    }

    /// Returns true if the point lies inside the box or on one of its edges.
    #[inline]
    pub fn contains(&self, point: GeoPoint) -> bool {
        self.violated_bound(point).is_none()
    }

    /// Returns the first edge the point falls outside of, checking latitude
    /// before longitude. NaN components violate the minimum edge of their axis.
    #[allow(clippy::neg_cmp_op_on_partial_ord)]
    pub fn violated_bound(&self, point: GeoPoint) -> Option<Bound> {
        if !(point.lat >= self.min_lat) {
            Some(Bound::MinLat)
        } else if point.lat > self.max_lat {
            Some(Bound::MaxLat)
        } else if !(point.lng >= self.min_lng) {
            Some(Bound::MinLng)
        } else if point.lng > self.max_lng {
            Some(Bound::MaxLng)
        } else {
            None
        }
    }

    /// Checks that every edge is finite and that each axis has positive extent.
    ///
    /// Returns a description of the first problem found.
    pub fn check_well_formed(&self) -> Result<(), &'static str> {
        let edges = [self.min_lat, self.max_lat, self.min_lng, self.max_lng];
        if edges.iter().any(|v| !v.is_finite()) {
            return Err("all edges must be finite numbers");
        }
        if self.min_lat >= self.max_lat {
            return Err("min_lat must be less than max_lat");
        }
        if self.min_lng >= self.max_lng {
            return Err("min_lng must be less than max_lng");
        }
        Ok(())
    }

    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }
}

impl fmt::Display for GeoBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "lat {}..{}, lng {}..{}",
            self.min_lat, self.max_lat, self.min_lng, self.max_lng
        )
    }
}

/// Error returned when a point is projected into a region whose bounding box
/// does not contain it.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("Point {point} is outside region '{region_id}': {bound} bound violated ({bounds})")]
pub struct OutOfBoundsError {
    /// Region the projection was attempted against
    pub region_id: String,
    /// The offending point
    pub point: GeoPoint,
    /// First edge the point falls outside of
    pub bound: Bound,
    /// The region's bounding box
    pub bounds: GeoBounds,
}
