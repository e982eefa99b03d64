//! Raster containment test for region shapes.
//!
//! Exact point-in-polygon geometry over arbitrary SVG outlines (curves,
//! holes, fill rules) is replaced by rendering: the region's shape is
//! rasterized onto its canvas and the alpha of a single pixel decides
//! containment. Accuracy is bounded by the canvas resolution; a point within
//! about one pixel of the outline may land on either side.
//!
//! Rendering is behind the [`RasterBackend`] trait. [`ResvgBackend`] is the
//! production implementation; tests may substitute their own.

mod backend;
mod tester;

pub use backend::{RasterBackend, ResvgBackend};
pub use tester::ShapeRasterTester;

/// Errors raised by a raster backend.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RasterError {
    #[error("Cannot allocate a {width}x{height} raster surface")]
    SurfaceAllocation { width: u32, height: u32 },
}
