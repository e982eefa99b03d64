//! Rendering backends.

use tiny_skia::{Pixmap, Transform};

use super::RasterError;
use crate::asset::ShapeAsset;

/// Vector rendering capability used by the shape tester.
///
/// `render` must be deterministic and must not share state between calls:
/// every call returns a fresh surface owned by the caller.
pub trait RasterBackend: Send + Sync {
    /// Offscreen surface produced by [`render`](Self::render).
    type Surface;

    /// Render `shape` scaled onto a `width` x `height` surface.
    ///
    /// The shape's own fill rules apply unchanged.
    fn render(
        &self,
        shape: &ShapeAsset,
        width: u32,
        height: u32,
    ) -> Result<Self::Surface, RasterError>;

    /// Alpha (coverage) of the pixel at `(x, y)`; 0 outside the surface.
    fn sample_alpha(&self, surface: &Self::Surface, x: u32, y: u32) -> u8;
}

/// Backend rendering with `resvg` into a `tiny-skia` pixmap.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResvgBackend;

impl RasterBackend for ResvgBackend {
    type Surface = Pixmap;

    fn render(
        &self,
        shape: &ShapeAsset,
        width: u32,
        height: u32,
    ) -> Result<Pixmap, RasterError> {
        let mut pixmap =
            Pixmap::new(width, height).ok_or(RasterError::SurfaceAllocation { width, height })?;

        let transform = Transform::from_scale(
            width as f32 / shape.width(),
            height as f32 / shape.height(),
        );
        resvg::render(shape.tree(), transform, &mut pixmap.as_mut());

        Ok(pixmap)
    }

    fn sample_alpha(&self, surface: &Pixmap, x: u32, y: u32) -> u8 {
        // Pixmap::pixel only checks the flat index, so x past the right edge
        // would read from the next row
        if x >= surface.width() || y >= surface.height() {
            return 0;
        }
        surface.pixel(x, y).map(|p| p.alpha()).unwrap_or(0)
    }
}
