//! Location marker overlay for region SVGs.
//!
//! [`annotate_svg`] returns the region's own SVG text with a marker group
//! appended as the last child of the root element, so it draws on top of
//! everything else. The rest of the document is passed through untouched.

use std::fmt::Write as _;

use roxmltree::{Document, ParsingOptions};

use crate::geo::RasterPoint;

/// Errors raised while annotating an SVG document.
#[derive(Debug, thiserror::Error)]
pub enum MarkerError {
    #[error("Invalid SVG document: {0}")]
    Parse(#[from] roxmltree::Error),

    #[error("Root element is <{0}>, expected <svg>")]
    NotSvg(String),

    #[error("Invalid viewBox '{0}': expected four numbers")]
    InvalidViewBox(String),

    #[error("SVG root declares neither a viewBox nor numeric width and height")]
    MissingSize,
}

/// Appearance of the location marker: a filled outer ring under a filled
/// inner dot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerStyle {
    /// Outer circle radius in canvas pixels
    pub outer_radius: f32,
    /// Inner circle radius in canvas pixels
    pub inner_radius: f32,
    /// Outer circle color as (r, g, b, a)
    pub outer_rgba: (u8, u8, u8, u8),
    /// Inner circle color as (r, g, b, a)
    pub inner_rgba: (u8, u8, u8, u8),
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            outer_radius: 15.0,
            inner_radius: 10.0,
            outer_rgba: (255, 255, 255, 255),
            inner_rgba: (255, 0, 0, 255),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ViewBox {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

/// Append a location marker at `point` to an SVG document.
///
/// `point` is a position on the region's canvas. When the document declares
/// both a `viewBox` and a size, the point is mapped through the viewBox so
/// the marker lands where the renderer draws that pixel. A root without a
/// `viewBox` gets `viewBox="0 0 width height"`.
pub fn annotate_svg(
    svg_text: &str,
    point: RasterPoint,
    style: &MarkerStyle,
) -> Result<String, MarkerError> {
    // Map exports often carry a DOCTYPE
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };
    let doc = Document::parse_with_options(svg_text, options)?;
    let root = doc.root_element();
    if root.tag_name().name() != "svg" {
        return Err(MarkerError::NotSvg(root.tag_name().name().to_string()));
    }

    let width = root.attribute("width").and_then(parse_length);
    let height = root.attribute("height").and_then(parse_length);
    let view_box = match root.attribute("viewBox") {
        Some(raw) => Some(
            parse_view_box(raw).ok_or_else(|| MarkerError::InvalidViewBox(raw.to_string()))?,
        ),
        None => None,
    };

    let (added_view_box, cx, cy) = match (view_box, width, height) {
        (Some(vb), Some(w), Some(h)) => (
            None,
            vb.x + point.x * vb.width / w,
            vb.y + point.y * vb.height / h,
        ),
        (Some(vb), _, _) => (None, vb.x + point.x, vb.y + point.y),
        (None, Some(w), Some(h)) => (
            Some(format!(" viewBox=\"0 0 {} {}\"", w, h)),
            point.x,
            point.y,
        ),
        (None, _, _) => return Err(MarkerError::MissingSize),
    };

    let range = root.range();
    let element = &svg_text[range.clone()];
    let qualified_name: &str = element[1..]
        .split(|c: char| c.is_whitespace() || c == '/' || c == '>')
        .next()
        .unwrap_or("svg");
    let prefix = qualified_name
        .split_once(':')
        .map(|(p, _)| format!("{}:", p))
        .unwrap_or_default();
    let marker = marker_markup(&prefix, cx, cy, style);

    let name_end = range.start + 1 + qualified_name.len();
    let mut out = String::with_capacity(svg_text.len() + marker.len() + 64);
    out.push_str(&svg_text[..name_end]);
    if let Some(attr) = &added_view_box {
        out.push_str(attr);
    }

    if element.ends_with("/>") {
        out.push_str(&svg_text[name_end..range.end - 2]);
        out.push('>');
        out.push_str(&marker);
        let _ = write!(out, "</{}>", qualified_name);
    } else {
        // The root's closing tag is the last "</" inside its range
        let close_start = range.start + element.rfind("</").unwrap_or(element.len());
        out.push_str(&svg_text[name_end..close_start]);
        out.push_str(&marker);
        out.push_str(&svg_text[close_start..range.end]);
    }
    out.push_str(&svg_text[range.end..]);

    tracing::debug!(cx, cy, view_box_added = added_view_box.is_some(), "Added marker to SVG");
    Ok(out)
}

fn marker_markup(prefix: &str, cx: f64, cy: f64, style: &MarkerStyle) -> String {
    let mut markup = String::new();
    let _ = write!(
        markup,
        r#"<{p}g class="marker" style="pointer-events: none;">"#,
        p = prefix
    );
    for (radius, rgba) in [
        (style.outer_radius, style.outer_rgba),
        (style.inner_radius, style.inner_rgba),
    ] {
        let _ = write!(
            markup,
            r#"<{p}circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" stroke="none""#,
            p = prefix,
            cx = cx,
            cy = cy,
            r = radius,
            fill = hex_color(rgba),
        );
        if rgba.3 != 255 {
            let _ = write!(markup, r#" fill-opacity="{:.3}""#, rgba.3 as f32 / 255.0);
        }
        markup.push_str("/>");
    }
    let _ = write!(markup, "</{}g>", prefix);
    markup
}

fn hex_color((r, g, b, _): (u8, u8, u8, u8)) -> String {
    format!("#{:02x}{:02x}{:02x}", r, g, b)
}

/// Parse a plain or `px` length.
fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let value = value.strip_suffix("px").unwrap_or(value);
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

fn parse_view_box(value: &str) -> Option<ViewBox> {
    let numbers: Vec<f64> = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().ok())
        .collect::<Option<_>>()?;

    match numbers[..] {
        [x, y, width, height] if width > 0.0 && height > 0.0 => Some(ViewBox {
            x,
            y,
            width,
            height,
        }),
        _ => None,
    }
}
