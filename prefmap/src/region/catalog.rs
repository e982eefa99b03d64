//! Region tables: the built-in table and INI region files.
//!
//! A region file has one section per region id:
//!
//! ```ini
//! [aomori]
//! name = 青森県
//! code = 2
//! min_lat = 40.2
//! max_lat = 41.6
//! min_lng = 139.5
//! max_lng = 141.6
//! svg_file = aomori.svg
//! width = 2107
//! height = 2044
//! ```
//!
//! Sections are returned in file order; the registry sorts them by code.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use ini::{Ini, Properties};

use super::RegionSpec;
use crate::geo::GeoBounds;

/// Errors raised while reading a region table.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Region table not found: {0}")]
    NotFound(PathBuf),

    #[error("Failed to read region table: {0}")]
    ReadError(#[from] ini::Error),

    #[error("Region table: [{section}] is missing required key '{key}'")]
    MissingKey { section: String, key: String },

    #[error("Region table: {section}.{key} = '{value}' - {reason}")]
    InvalidValue {
        section: String,
        key: String,
        value: String,
        reason: String,
    },
}

/// The built-in region table.
pub fn builtin_regions() -> Vec<RegionSpec> {
    vec![RegionSpec {
        id: "aomori".to_string(),
        display_name: "青森県".to_string(),
        order_code: 2,
        bounds: GeoBounds::new(40.2, 41.6, 139.5, 141.6),
        shape_ref: "aomori.svg".to_string(),
        canvas_width: 2107,
        canvas_height: 2044,
    }]
}

/// Load a region table from an INI file.
pub fn load_region_table<P: AsRef<Path>>(path: P) -> Result<Vec<RegionSpec>, CatalogError> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(CatalogError::NotFound(path.to_path_buf()));
    }

    let ini = Ini::load_from_file(path)?;
    let specs = parse_region_table(&ini)?;
    tracing::debug!(path = %path.display(), count = specs.len(), "Loaded region table");
    Ok(specs)
}

/// Convert a parsed INI document into region specs.
///
/// Keys outside any section are ignored. Every key listed in the module
/// documentation is required.
pub fn parse_region_table(ini: &Ini) -> Result<Vec<RegionSpec>, CatalogError> {
    let mut specs = Vec::new();

    for (name, section) in ini.iter() {
        let Some(id) = name else {
            continue;
        };

        let display_name = required(section, id, "name")?.trim().to_string();
        let order_code = parse_key(section, id, "code", "must be a non-negative integer")?;
        let bounds = GeoBounds::new(
            parse_key(section, id, "min_lat", "must be a decimal latitude")?,
            parse_key(section, id, "max_lat", "must be a decimal latitude")?,
            parse_key(section, id, "min_lng", "must be a decimal longitude")?,
            parse_key(section, id, "max_lng", "must be a decimal longitude")?,
        );
        let shape_ref = required(section, id, "svg_file")?.trim().to_string();
        let canvas_width = parse_key(section, id, "width", "must be a positive integer (pixels)")?;
        let canvas_height =
            parse_key(section, id, "height", "must be a positive integer (pixels)")?;

        specs.push(RegionSpec {
            id: id.to_string(),
            display_name,
            order_code,
            bounds,
            shape_ref,
            canvas_width,
            canvas_height,
        });
    }

    Ok(specs)
}

fn required<'a>(section: &'a Properties, id: &str, key: &str) -> Result<&'a str, CatalogError> {
    section.get(key).ok_or_else(|| CatalogError::MissingKey {
        section: id.to_string(),
        key: key.to_string(),
    })
}

fn parse_key<T: FromStr>(
    section: &Properties,
    id: &str,
    key: &str,
    reason: &str,
) -> Result<T, CatalogError> {
    let raw = required(section, id, key)?;
    raw.trim().parse().map_err(|_| CatalogError::InvalidValue {
        section: id.to_string(),
        key: key.to_string(),
        value: raw.to_string(),
        reason: reason.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const TABLE: &str = r#"
[iwate]
name = 岩手県
code = 3
min_lat = 38.7
max_lat = 40.5
min_lng = 140.6
max_lng = 142.1
svg_file = iwate.svg
width = 1500
height = 1800

[aomori]
name = 青森県
code = 2
min_lat = 40.2
max_lat = 41.6
min_lng = 139.5
max_lng = 141.6
svg_file = aomori.svg
width = 2107
height = 2044
"#;

    #[test]
    fn test_builtin_table_has_aomori() {
        let regions = builtin_regions();
        assert_eq!(regions.len(), 1);

        let aomori = &regions[0];
        assert_eq!(aomori.id, "aomori");
        assert_eq!(aomori.order_code, 2);
        assert_eq!(aomori.bounds, GeoBounds::new(40.2, 41.6, 139.5, 141.6));
        assert_eq!((aomori.canvas_width, aomori.canvas_height), (2107, 2044));
        assert!(aomori.bounds.check_well_formed().is_ok());
    }

    #[test]
    fn test_parses_sections_in_file_order() {
        let ini = Ini::load_from_str(TABLE).unwrap();
        let specs = parse_region_table(&ini).unwrap();

        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].id, "iwate");
        assert_eq!(specs[0].display_name, "岩手県");
        assert_eq!(specs[0].order_code, 3);
        assert_eq!(specs[0].bounds.max_lng, 142.1);
        assert_eq!(specs[1], builtin_regions()[0]);
    }

    #[test]
    fn test_missing_key() {
        let ini = Ini::load_from_str("[north]\nname = North\ncode = 1\n").unwrap();
        let err = parse_region_table(&ini).unwrap_err();
        match err {
            CatalogError::MissingKey { section, key } => {
                assert_eq!(section, "north");
                assert_eq!(key, "min_lat");
            }
            other => panic!("expected MissingKey, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_number() {
        let table = TABLE.replace("min_lat = 38.7", "min_lat = north");
        let ini = Ini::load_from_str(&table).unwrap();
        let err = parse_region_table(&ini).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidValue { ref section, ref key, ref value, .. }
                if section == "iwate" && key == "min_lat" && value == "north"
        ));
    }

    #[test]
    fn test_negative_code_rejected() {
        let table = TABLE.replace("code = 3", "code = -3");
        let ini = Ini::load_from_str(&table).unwrap();
        assert!(matches!(
            parse_region_table(&ini),
            Err(CatalogError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("regions.ini");
        std::fs::write(&path, TABLE).unwrap();

        let specs = load_region_table(&path).unwrap();
        assert_eq!(specs.len(), 2);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_region_table("/nonexistent/regions.ini");
        assert!(matches!(result, Err(CatalogError::NotFound(_))));
    }
}
