//! PNG previews of a detected location.
//!
//! A preview is the region's shape rendered onto its canvas over a solid
//! background, with the location marker drawn on top.

use std::path::{Path, PathBuf};

use tiny_skia::{Color, FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Shader, Transform};

use crate::geo::RasterPoint;
use crate::marker::MarkerStyle;
use crate::raster::{RasterBackend, RasterError, ResvgBackend};
use crate::region::Region;

/// Background behind the region shape.
const BACKGROUND_RGBA: (u8, u8, u8, u8) = (255, 255, 255, 255);

/// Errors raised while producing a preview image.
#[derive(Debug, thiserror::Error)]
pub enum PreviewError {
    #[error("Failed to render preview: {0}")]
    Render(#[from] RasterError),

    #[error("Failed to write preview {path}: {reason}")]
    Write { path: PathBuf, reason: String },
}

/// Render `region` with a marker at `point`.
///
/// The image has the region's canvas size. Markers near the canvas edge are
/// clipped; a point outside the canvas yields the shape without a marker.
pub fn render_preview(
    region: &Region,
    point: RasterPoint,
    style: &MarkerStyle,
) -> Result<Pixmap, PreviewError> {
    let (width, height) = (region.canvas_width(), region.canvas_height());
    let shape = ResvgBackend.render(region.shape(), width, height)?;

    let mut pixmap =
        Pixmap::new(width, height).ok_or(RasterError::SurfaceAllocation { width, height })?;
    pixmap.fill(rgba_color(BACKGROUND_RGBA));
    pixmap.draw_pixmap(
        0,
        0,
        shape.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        None,
    );

    draw_marker(&mut pixmap, point, style);

    tracing::debug!(region = region.id(), %point, width, height, "Rendered preview");
    Ok(pixmap)
}

/// Draw the two marker circles centered on `point`.
fn draw_marker(pixmap: &mut Pixmap, point: RasterPoint, style: &MarkerStyle) {
    let (cx, cy) = (point.x as f32, point.y as f32);

    for (radius, rgba) in [
        (style.outer_radius, style.outer_rgba),
        (style.inner_radius, style.inner_rgba),
    ] {
        let Some(circle) = PathBuilder::from_circle(cx, cy, radius) else {
            continue;
        };
        let paint = Paint {
            shader: Shader::SolidColor(rgba_color(rgba)),
            anti_alias: true,
            ..Default::default()
        };
        pixmap.fill_path(&circle, &paint, FillRule::Winding, Transform::identity(), None);
    }
}

fn rgba_color((r, g, b, a): (u8, u8, u8, u8)) -> Color {
    Color::from_rgba8(r, g, b, a)
}

/// Write a preview as PNG, creating parent directories.
pub fn save_preview(pixmap: &Pixmap, path: &Path) -> Result<(), PreviewError> {
    let write_error = |reason: String| PreviewError::Write {
        path: path.to_path_buf(),
        reason,
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| write_error(e.to_string()))?;
    }
    pixmap
        .save_png(path)
        .map_err(|e| write_error(e.to_string()))?;

    tracing::info!(path = %path.display(), "Wrote preview");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::GeoBounds;
    use crate::test_support::region_with_svg;
    use tempfile::TempDir;

    /// 100x100 canvas with the left half filled black.
    fn half_region() -> Region {
        region_with_svg(
            "half",
            1,
            GeoBounds::new(40.0, 41.0, 140.0, 141.0),
            100,
            100,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100">
  <rect width="50" height="100" fill="black"/>
</svg>"#,
        )
    }

    fn rgba(pixmap: &Pixmap, x: u32, y: u32) -> (u8, u8, u8, u8) {
        let p = pixmap.pixel(x, y).unwrap().demultiply();
        (p.red(), p.green(), p.blue(), p.alpha())
    }

    #[test]
    fn test_preview_size_matches_canvas() {
        let pixmap = render_preview(
            &half_region(),
            RasterPoint::new(75.0, 50.0),
            &MarkerStyle::default(),
        )
        .unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (100, 100));
    }

    #[test]
    fn test_shape_over_background() {
        let pixmap = render_preview(
            &half_region(),
            RasterPoint::new(500.0, 500.0),
            &MarkerStyle::default(),
        )
        .unwrap();

        assert_eq!(rgba(&pixmap, 10, 10), (0, 0, 0, 255));
        assert_eq!(rgba(&pixmap, 90, 10), (255, 255, 255, 255));
    }

    #[test]
    fn test_marker_drawn_at_point() {
        let pixmap = render_preview(
            &half_region(),
            RasterPoint::new(25.0, 50.0),
            &MarkerStyle::default(),
        )
        .unwrap();

        // Inner dot is red, the ring between radius 10 and 15 is white
        assert_eq!(rgba(&pixmap, 25, 50), (255, 0, 0, 255));
        assert_eq!(rgba(&pixmap, 25, 37), (255, 255, 255, 255));
        // Outside the ring the black shape is untouched
        assert_eq!(rgba(&pixmap, 25, 80), (0, 0, 0, 255));
    }

    #[test]
    fn test_save_preview_writes_png() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("preview.png");
        let pixmap = render_preview(
            &half_region(),
            RasterPoint::new(25.0, 50.0),
            &MarkerStyle::default(),
        )
        .unwrap();

        save_preview(&pixmap, &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
        let loaded = Pixmap::load_png(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (100, 100));
    }

    #[test]
    fn test_save_preview_reports_path() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("file");
        std::fs::write(&blocker, "").unwrap();

        let pixmap = Pixmap::new(1, 1).unwrap();
        let err = save_preview(&pixmap, &blocker.join("preview.png")).unwrap_err();
        assert!(matches!(err, PreviewError::Write { .. }));
    }
}
