//! Filesystem loader for SVG shape assets.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{AssetError, AssetLoader, ShapeAsset};

/// Loads SVG shape assets from a maps directory.
///
/// References are file names relative to the directory
/// (e.g. `aomori.svg` resolves to `<directory>/aomori.svg`).
#[derive(Debug, Clone)]
pub struct SvgAssetLoader {
    directory: PathBuf,
}

impl SvgAssetLoader {
    /// Create a loader rooted at `directory`.
    pub fn new<P: AsRef<Path>>(directory: P) -> Self {
        Self {
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// Directory assets are resolved against.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Full path of the asset named by `reference`.
    pub fn path_for(&self, reference: &str) -> PathBuf {
        self.directory.join(reference)
    }
}

impl AssetLoader for SvgAssetLoader {
    fn load(&self, reference: &str) -> Result<ShapeAsset, AssetError> {
        let path = self.path_for(reference);

        let data = fs::read(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => AssetError::NotFound(path.clone()),
            _ => AssetError::Io {
                path: path.clone(),
                source: e,
            },
        })?;

        let shape = ShapeAsset::from_svg_data(reference, &data)?;

        tracing::debug!(
            path = %path.display(),
            width = shape.width(),
            height = shape.height(),
            "Loaded shape asset"
        );

        Ok(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SQUARE: &str = r#"<svg xmlns="http://www.w3.org/2000/svg" width="20" height="20">
  <rect width="20" height="20" fill="black"/>
</svg>"#;

    #[test]
    fn test_loads_from_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("square.svg"), SQUARE).unwrap();

        let loader = SvgAssetLoader::new(dir.path());
        let shape = loader.load("square.svg").unwrap();

        assert_eq!(shape.pixel_size(), (20, 20));
        assert_eq!(shape.reference(), "square.svg");
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = TempDir::new().unwrap();
        let loader = SvgAssetLoader::new(dir.path());

        let result = loader.load("missing.svg");
        match result {
            Err(AssetError::NotFound(path)) => {
                assert_eq!(path, dir.path().join("missing.svg"));
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("junk.svg"), "this is not svg").unwrap();

        let loader = SvgAssetLoader::new(dir.path());
        assert!(matches!(
            loader.load("junk.svg"),
            Err(AssetError::Parse { .. })
        ));
    }

    #[test]
    fn test_directory_reference_is_io_error() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("nested.svg")).unwrap();

        let loader = SvgAssetLoader::new(dir.path());
        let result = loader.load("nested.svg");
        assert!(matches!(result, Err(AssetError::Io { .. })));
    }

    #[test]
    fn test_path_for_joins_directory() {
        let loader = SvgAssetLoader::new("maps");
        assert_eq!(loader.path_for("aomori.svg"), PathBuf::from("maps/aomori.svg"));
        assert_eq!(loader.directory(), Path::new("maps"));
    }
}
