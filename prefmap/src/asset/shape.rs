//! Parsed vector outline of a region.

use std::fmt;
use std::sync::Arc;

use resvg::usvg;

use super::AssetError;

/// A region's vector outline, parsed once and shared read-only.
///
/// Holds both the normalized render tree and the original SVG text; the
/// tree drives rasterization, the text is what marker overlays are
/// written into.
#[derive(Clone)]
pub struct ShapeAsset {
    reference: String,
    tree: Arc<usvg::Tree>,
    source: Arc<str>,
}

impl ShapeAsset {
    /// Parse an SVG document.
    ///
    /// # Arguments
    ///
    /// * `reference` - Name used in error messages (usually the asset file name)
    /// * `data` - Raw SVG bytes, UTF-8 encoded
    ///
    /// # Errors
    ///
    /// [`AssetError::Parse`] if the document is not valid SVG or declares no
    /// usable size, [`AssetError::NoFilledPath`] if nothing in it is filled.
    pub fn from_svg_data(reference: &str, data: &[u8]) -> Result<Self, AssetError> {
        let source = std::str::from_utf8(data).map_err(|e| AssetError::Parse {
            reference: reference.to_string(),
            reason: format!("not valid UTF-8: {}", e),
        })?;
        Self::from_svg_str(reference, source)
    }

    /// Parse an SVG document from text.
    pub fn from_svg_str(reference: &str, source: &str) -> Result<Self, AssetError> {
        let tree = usvg::Tree::from_str(source, &usvg::Options::default()).map_err(|e| {
            AssetError::Parse {
                reference: reference.to_string(),
                reason: e.to_string(),
            }
        })?;

        if !has_filled_path(tree.root()) {
            return Err(AssetError::NoFilledPath(reference.to_string()));
        }

        Ok(Self {
            reference: reference.to_string(),
            tree: Arc::new(tree),
            source: Arc::from(source),
        })
    }

    /// Reference this asset was loaded from.
    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Intrinsic width in user units.
    pub fn width(&self) -> f32 {
        self.tree.size().width()
    }

    /// Intrinsic height in user units.
    pub fn height(&self) -> f32 {
        self.tree.size().height()
    }

    /// Intrinsic size rounded to whole pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width().round() as u32, self.height().round() as u32)
    }

    pub fn tree(&self) -> &usvg::Tree {
        &self.tree
    }

    /// Original SVG text.
    pub fn source(&self) -> &str {
        &self.source
    }
}

impl fmt::Debug for ShapeAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeAsset")
            .field("reference", &self.reference)
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

fn has_filled_path(group: &usvg::Group) -> bool {
    group.children().iter().any(|node| match node {
        usvg::Node::Group(child) => has_filled_path(child),
        usvg::Node::Path(path) => path.fill().is_some(),
        _ => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="80" viewBox="0 0 100 80">
  <path d="M0 0 H100 V80 H0 Z" fill="black"/>
</svg>"#;

    #[test]
    fn test_parses_size() {
        let shape = ShapeAsset::from_svg_str("square.svg", SQUARE).unwrap();
        assert_eq!(shape.width(), 100.0);
        assert_eq!(shape.height(), 80.0);
        assert_eq!(shape.pixel_size(), (100, 80));
        assert_eq!(shape.reference(), "square.svg");
    }

    #[test]
    fn test_keeps_source_text() {
        let shape = ShapeAsset::from_svg_str("square.svg", SQUARE).unwrap();
        assert_eq!(shape.source(), SQUARE);
    }

    #[test]
    fn test_size_from_viewbox_only() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 40 30">
  <rect width="40" height="30" fill="red"/>
</svg>"#;
        let shape = ShapeAsset::from_svg_str("vb.svg", svg).unwrap();
        assert_eq!(shape.pixel_size(), (40, 30));
    }

    #[test]
    fn test_nested_group_counts_as_filled() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
  <g transform="translate(1 1)"><g><path d="M0 0 H5 V5 Z" fill="blue"/></g></g>
</svg>"#;
        assert!(ShapeAsset::from_svg_str("nested.svg", svg).is_ok());
    }

    #[test]
    fn test_rejects_unfilled_document() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
  <path d="M0 0 H5 V5 Z" fill="none" stroke="black"/>
</svg>"#;
        let result = ShapeAsset::from_svg_str("outline.svg", svg);
        assert!(matches!(result, Err(AssetError::NoFilledPath(ref r)) if r == "outline.svg"));
    }

    #[test]
    fn test_rejects_malformed_xml() {
        let result = ShapeAsset::from_svg_str("broken.svg", "<svg><path");
        assert!(matches!(result, Err(AssetError::Parse { .. })));
    }

    #[test]
    fn test_rejects_non_utf8() {
        let result = ShapeAsset::from_svg_data("bin.svg", &[0xff, 0xfe, 0x00]);
        assert!(matches!(result, Err(AssetError::Parse { .. })));
    }

    #[test]
    fn test_debug_shows_reference() {
        let shape = ShapeAsset::from_svg_str("square.svg", SQUARE).unwrap();
        let debug = format!("{:?}", shape);
        assert!(debug.contains("square.svg"));
    }
}
