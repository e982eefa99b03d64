//! Region registry for prefecture detection.
//!
//! A [`Region`] is a configured administrative area: a geographic bounding
//! box, a unique ordering code, and a vector outline rendered onto a raster
//! canvas. The [`RegionRegistry`] is built once at startup from a list of
//! [`RegionSpec`]s, validated eagerly, and then shared read-only.
//!
//! # Example
//!
//! ```ignore
//! use prefmap::asset::SvgAssetLoader;
//! use prefmap::region::{builtin_regions, RegionRegistry};
//!
//! let loader = SvgAssetLoader::new("maps");
//! let registry = RegionRegistry::load(builtin_regions(), &loader)?;
//! for region in registry.all() {
//!     println!("{:02} {}", region.order_code(), region.display_name());
//! }
//! ```

mod catalog;
mod registry;

use serde::{Deserialize, Serialize};

use crate::asset::ShapeAsset;
use crate::geo::GeoBounds;

pub use catalog::{builtin_regions, load_region_table, parse_region_table, CatalogError};
pub use registry::{ConfigError, RegionRegistry, RegistryError};

/// Static configuration for one region, before its shape asset is loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionSpec {
    /// Stable identifier (e.g. "aomori")
    pub id: String,
    /// Human-readable name (e.g. "青森県")
    pub display_name: String,
    /// Unique ordering code; lower codes are tested first on overlap
    pub order_code: u32,
    /// Geographic bounding box of the region's outline
    pub bounds: GeoBounds,
    /// Shape asset reference, relative to the maps directory
    pub shape_ref: String,
    /// Canvas width in pixels; must match the asset's intrinsic width
    pub canvas_width: u32,
    /// Canvas height in pixels; must match the asset's intrinsic height
    pub canvas_height: u32,
}

/// A region with its shape asset attached.
///
/// Cheap to clone; the parsed shape is shared.
#[derive(Debug, Clone)]
pub struct Region {
    spec: RegionSpec,
    shape: ShapeAsset,
}

impl Region {
    /// Pair a region spec with its loaded shape.
    ///
    /// No validation happens here; [`RegionRegistry::new`] checks the
    /// spec against the shape.
    pub fn new(spec: RegionSpec, shape: ShapeAsset) -> Self {
        Self { spec, shape }
    }

    pub fn id(&self) -> &str {
        &self.spec.id
    }

    pub fn display_name(&self) -> &str {
        &self.spec.display_name
    }

    pub fn order_code(&self) -> u32 {
        self.spec.order_code
    }

    pub fn bounds(&self) -> &GeoBounds {
        &self.spec.bounds
    }

    pub fn shape_ref(&self) -> &str {
        &self.spec.shape_ref
    }

    pub fn canvas_width(&self) -> u32 {
        self.spec.canvas_width
    }

    pub fn canvas_height(&self) -> u32 {
        self.spec.canvas_height
    }

    pub fn shape(&self) -> &ShapeAsset {
        &self.shape
    }

    pub fn spec(&self) -> &RegionSpec {
        &self.spec
    }
}
