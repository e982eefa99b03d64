//! Pixel-level containment test.

use super::{RasterBackend, ResvgBackend};
use crate::geo::RasterPoint;
use crate::region::Region;

/// Decides whether a raster point falls inside a region's rendered shape.
///
/// Each call renders onto its own surface, which is dropped before the call
/// returns; nothing is cached or shared between calls.
#[derive(Debug, Clone, Default)]
pub struct ShapeRasterTester<B = ResvgBackend> {
    backend: B,
}

impl ShapeRasterTester {
    /// Create a tester rendering with [`ResvgBackend`].
    pub fn resvg() -> Self {
        Self {
            backend: ResvgBackend,
        }
    }
}

impl<B: RasterBackend> ShapeRasterTester<B> {
    /// Create a tester using the given rendering backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Returns true if the pixel at `(floor(x), floor(y))` has non-zero alpha
    /// once the region's shape is rendered onto its canvas.
    ///
    /// Points outside `[0, width) x [0, height)` are outside the shape; this
    /// never errors. If a surface cannot be allocated the point is reported
    /// as outside and a warning is logged.
    pub fn contains_point(&self, region: &Region, point: RasterPoint) -> bool {
        let (width, height) = (region.canvas_width(), region.canvas_height());

        let Some((x, y)) = point.pixel(width, height) else {
            tracing::trace!(region = region.id(), %point, "Raster point outside canvas");
            return false;
        };

        let surface = match self.backend.render(region.shape(), width, height) {
            Ok(surface) => surface,
            Err(e) => {
                tracing::warn!(region = region.id(), error = %e, "Shape render failed");
                return false;
            }
        };

        let alpha = self.backend.sample_alpha(&surface, x, y);
        tracing::trace!(region = region.id(), x, y, alpha, "Sampled shape coverage");
        alpha != 0
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}
