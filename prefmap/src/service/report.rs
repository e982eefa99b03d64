//! Projection report for a point on a chosen region.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::geo::{GeoBounds, GeoPoint, RasterPoint};

/// Where a coordinate lands on a specific region's canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionReport {
    pub region_id: String,
    pub display_name: String,
    /// Input coordinate
    pub input: GeoPoint,
    /// The region's bounding box
    pub bounds: GeoBounds,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Projected position on the canvas
    pub raster: RasterPoint,
    /// Whether the region's shape covers the projected pixel
    pub inside_shape: bool,
}

impl fmt::Display for ProjectionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Region:  {} ({})", self.region_id, self.display_name)?;
        writeln!(f, "Input:   {}", self.input)?;
        writeln!(f, "Bounds:  {}", self.bounds)?;
        writeln!(f, "Canvas:  {} x {}", self.canvas_width, self.canvas_height)?;
        writeln!(f, "Raster:  {}", self.raster)?;
        write!(
            f,
            "Shape:   {}",
            if self.inside_shape { "inside" } else { "outside" }
        )
    }
}
