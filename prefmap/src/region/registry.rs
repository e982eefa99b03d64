//! Validated, immutable table of regions.

use std::collections::{HashMap, HashSet};

use super::{CatalogError, Region, RegionSpec};
use crate::asset::{AssetError, AssetLoader};
use crate::geo::GeoBounds;

/// Malformed static region configuration.
///
/// Always fatal: a registry that fails validation must not serve lookups.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("No regions configured")]
    NoRegions,

    #[error("Duplicate region id '{0}'")]
    DuplicateId(String),

    #[error("Regions '{first}' and '{second}' share order code {code}")]
    DuplicateOrderCode {
        code: u32,
        first: String,
        second: String,
    },

    #[error("Region '{region}' has malformed bounds ({bounds}): {reason}")]
    MalformedBounds {
        region: String,
        bounds: GeoBounds,
        reason: &'static str,
    },

    #[error("Region '{region}' has an empty canvas ({width}x{height})")]
    EmptyCanvas {
        region: String,
        width: u32,
        height: u32,
    },

    #[error(
        "Region '{region}' canvas is {width}x{height} but its shape asset is {asset_width}x{asset_height}"
    )]
    CanvasMismatch {
        region: String,
        width: u32,
        height: u32,
        asset_width: f32,
        asset_height: f32,
    },
}

/// Errors raised while building a registry from configuration.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Invalid region configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Failed to load region table: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Failed to load shape for region '{region}': {source}")]
    Asset {
        region: String,
        #[source]
        source: AssetError,
    },
}

/// Immutable set of regions, ordered by ascending order code.
///
/// Construction validates everything up front; after that the registry is
/// read-only and safe to share across threads.
#[derive(Debug, Clone)]
pub struct RegionRegistry {
    regions: Vec<Region>,
}

impl RegionRegistry {
    /// Build a registry from regions whose shapes are already loaded.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the list is empty, if ids or order codes
    /// repeat, if a bounding box is malformed, or if a canvas is empty or
    /// disagrees with its shape's intrinsic size.
    pub fn new(mut regions: Vec<Region>) -> Result<Self, ConfigError> {
        validate_specs(regions.iter().map(Region::spec))?;

        for region in &regions {
            let (asset_width, asset_height) = region.shape().pixel_size();
            if (asset_width, asset_height) != (region.canvas_width(), region.canvas_height()) {
                return Err(ConfigError::CanvasMismatch {
                    region: region.id().to_string(),
                    width: region.canvas_width(),
                    height: region.canvas_height(),
                    asset_width: region.shape().width(),
                    asset_height: region.shape().height(),
                });
            }
        }

        regions.sort_by_key(Region::order_code);
        Ok(Self { regions })
    }

    /// Build a registry from specs, loading each region's shape through `loader`.
    ///
    /// Specs are validated before any asset is touched. Asset failures are
    /// fatal and name the region they belong to.
    pub fn load<L>(specs: Vec<RegionSpec>, loader: &L) -> Result<Self, RegistryError>
    where
        L: AssetLoader + ?Sized,
    {
        validate_specs(specs.iter())?;

        let mut regions = Vec::with_capacity(specs.len());
        for spec in specs {
            let shape = match loader.load(&spec.shape_ref) {
                Ok(shape) => shape,
                Err(source) => {
                    tracing::error!(
                        region = %spec.id,
                        shape = %spec.shape_ref,
                        error = %source,
                        "Failed to load shape asset"
                    );
                    return Err(RegistryError::Asset {
                        region: spec.id,
                        source,
                    });
                }
            };
            regions.push(Region::new(spec, shape));
        }

        let registry = Self::new(regions)?;
        tracing::info!(count = registry.len(), "Built region registry");
        Ok(registry)
    }

    /// All regions, ascending by order code.
    pub fn all(&self) -> &[Region] {
        &self.regions
    }

    /// Iterate regions in ascending order-code order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    /// Look up a region by id.
    pub fn get(&self, id: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.id() == id)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

fn validate_specs<'a, I>(specs: I) -> Result<(), ConfigError>
where
    I: IntoIterator<Item = &'a RegionSpec>,
{
    let mut ids: HashSet<&str> = HashSet::new();
    let mut codes: HashMap<u32, &str> = HashMap::new();

    for spec in specs {
        if !ids.insert(spec.id.as_str()) {
            return Err(ConfigError::DuplicateId(spec.id.clone()));
        }
        if let Some(first) = codes.insert(spec.order_code, spec.id.as_str()) {
            return Err(ConfigError::DuplicateOrderCode {
                code: spec.order_code,
                first: first.to_string(),
                second: spec.id.clone(),
            });
        }
        spec.bounds
            .check_well_formed()
            .map_err(|reason| ConfigError::MalformedBounds {
                region: spec.id.clone(),
                bounds: spec.bounds,
                reason,
            })?;
        if spec.canvas_width == 0 || spec.canvas_height == 0 {
            return Err(ConfigError::EmptyCanvas {
                region: spec.id.clone(),
                width: spec.canvas_width,
                height: spec.canvas_height,
            });
        }
    }

    if ids.is_empty() {
        return Err(ConfigError::NoRegions);
    }
    Ok(())
}
