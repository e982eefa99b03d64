//! Region shape assets.
//!
//! Each region references a vector outline (an SVG file) whose intrinsic
//! size matches the region's raster canvas. Assets are read and parsed once,
//! when the region registry is built, and shared read-only afterwards.
//!
//! # Example
//!
//! ```ignore
//! use prefmap::asset::{AssetLoader, SvgAssetLoader};
//!
//! let loader = SvgAssetLoader::new("maps");
//! let shape = loader.load("aomori.svg")?;
//! println!("{} is {}x{}", shape.reference(), shape.width(), shape.height());
//! ```

mod loader;
mod shape;

use std::path::PathBuf;

pub use loader::SvgAssetLoader;
pub use shape::ShapeAsset;

/// Errors raised while loading a shape asset.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// The referenced file does not exist
    #[error("Shape asset not found: {0}")]
    NotFound(PathBuf),

    /// The file exists but could not be read
    #[error("Failed to read shape asset {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a usable SVG document
    #[error("Failed to parse shape asset '{reference}': {reason}")]
    Parse { reference: String, reason: String },

    /// The document parsed but contains nothing filled
    #[error("Shape asset '{0}' contains no filled path")]
    NoFilledPath(String),
}

/// Source of region shape assets.
///
/// Implementations resolve a region's shape reference to parsed shape data.
/// The registry calls this once per region at construction time.
pub trait AssetLoader {
    /// Load and parse the asset named by `reference`.
    fn load(&self, reference: &str) -> Result<ShapeAsset, AssetError>;
}
