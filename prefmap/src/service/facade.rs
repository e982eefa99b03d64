//! PrefmapService facade.

use std::sync::Arc;

use tiny_skia::Pixmap;
use tracing::info;

use super::{ProjectionReport, ServiceError};
use crate::asset::SvgAssetLoader;
use crate::config::ConfigFile;
use crate::detect::{DetectionResult, RegionDetector, TieBreak};
use crate::geo::{self, GeoPoint};
use crate::marker::{self, MarkerStyle};
use crate::preview;
use crate::raster::ShapeRasterTester;
use crate::region::{builtin_regions, load_region_table, Region, RegionRegistry, RegistryError};

/// Detection, projection and rendering over one region registry.
///
/// Built once; every operation is read-only, so the service can be shared
/// across threads behind an `Arc`.
#[derive(Debug, Clone)]
pub struct PrefmapService {
    registry: Arc<RegionRegistry>,
    detector: RegionDetector,
    tester: ShapeRasterTester,
    marker_style: MarkerStyle,
}

impl PrefmapService {
    /// Build the service described by `config`.
    ///
    /// Loads the region table (`[maps] regions_file`, or the built-in table)
    /// and every shape asset from `[maps] directory`.
    pub fn from_config(config: &ConfigFile) -> Result<Self, ServiceError> {
        let specs = match &config.maps.regions_file {
            Some(path) => load_region_table(path).map_err(RegistryError::from)?,
            None => builtin_regions(),
        };

        let loader = SvgAssetLoader::new(&config.maps.directory);
        let registry = RegionRegistry::load(specs, &loader)?;

        info!(
            regions = registry.len(),
            maps = %config.maps.directory.display(),
            tie_break = %config.detection.tie_break,
            "Prefmap service ready"
        );

        Ok(Self::new(Arc::new(registry), config.detection.tie_break))
    }

    /// Build the service over an already loaded registry.
    pub fn new(registry: Arc<RegionRegistry>, tie_break: TieBreak) -> Self {
        let tester = ShapeRasterTester::resvg();
        let detector =
            RegionDetector::new(Arc::clone(&registry), tester.clone()).with_tie_break(tie_break);
        Self {
            registry,
            detector,
            tester,
            marker_style: MarkerStyle::default(),
        }
    }

    /// Use `style` for markers and previews.
    pub fn with_marker_style(mut self, style: MarkerStyle) -> Self {
        self.marker_style = style;
        self
    }

    /// Detect the region containing `point`.
    pub fn detect(&self, point: GeoPoint) -> Result<DetectionResult, ServiceError> {
        check_point(point)?;
        Ok(self.detector.detect(point)?)
    }

    /// Project `point` onto the canvas of the region `region_id`.
    ///
    /// The point must lie within that region's bounding box; it does not
    /// have to lie inside the region's shape.
    pub fn project_into(
        &self,
        region_id: &str,
        point: GeoPoint,
    ) -> Result<ProjectionReport, ServiceError> {
        check_point(point)?;
        let region = self.region(region_id)?;
        let raster = geo::project(point, region)?;
        let inside_shape = self.tester.contains_point(region, raster);

        tracing::debug!(
            region = region_id,
            %point,
            %raster,
            inside_shape,
            "Projected point"
        );

        Ok(ProjectionReport {
            region_id: region.id().to_string(),
            display_name: region.display_name().to_string(),
            input: point,
            bounds: *region.bounds(),
            canvas_width: region.canvas_width(),
            canvas_height: region.canvas_height(),
            raster,
            inside_shape,
        })
    }

    /// The region SVG with a marker at `point`.
    pub fn marker_svg(&self, region_id: &str, point: GeoPoint) -> Result<String, ServiceError> {
        let report = self.project_into(region_id, point)?;
        let region = self.region(region_id)?;
        Ok(marker::annotate_svg(
            region.shape().source(),
            report.raster,
            &self.marker_style,
        )?)
    }

    /// Detect the region containing `point` and render a marked preview of it.
    pub fn preview(&self, point: GeoPoint) -> Result<(DetectionResult, Pixmap), ServiceError> {
        let result = self.detect(point)?;
        let region = self.region(&result.region_id)?;
        let pixmap = preview::render_preview(region, result.raster_point, &self.marker_style)?;
        Ok((result, pixmap))
    }

    /// Configured regions in ascending order code.
    pub fn regions(&self) -> &[Region] {
        self.registry.all()
    }

    /// Look up a region by id.
    pub fn region(&self, id: &str) -> Result<&Region, ServiceError> {
        self.registry
            .get(id)
            .ok_or_else(|| ServiceError::UnknownRegion {
                id: id.to_string(),
                known: self.registry.iter().map(|r| r.id().to_string()).collect(),
            })
    }

    pub fn registry(&self) -> &Arc<RegionRegistry> {
        &self.registry
    }

    pub fn detector(&self) -> &RegionDetector {
        &self.detector
    }
}

fn check_point(point: GeoPoint) -> Result<(), ServiceError> {
    if point.is_valid() {
        Ok(())
    } else {
        Err(ServiceError::InvalidCoordinates { point })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::DetectionError;
    use crate::geo::{GeoBounds, RasterPoint};
    use crate::test_support::{filled_rect_svg, region};
    use std::fs;
    use tempfile::TempDir;

    fn service() -> PrefmapService {
        let registry = RegionRegistry::new(vec![
            region("north", 1, GeoBounds::new(40.0, 41.0, 140.0, 141.0), 100, 100),
            region("south", 2, GeoBounds::new(39.0, 40.0, 140.0, 141.0), 100, 100),
        ])
        .unwrap();
        PrefmapService::new(Arc::new(registry), TieBreak::LowestCode)
    }

    #[test]
    fn test_detect() {
        let result = service().detect(GeoPoint::new(40.5, 140.5)).unwrap();
        assert_eq!(result.region_id, "north");
    }

    #[test]
    fn test_detect_shared_edge() {
        // On north's southern edge the point projects one row past its
        // canvas, so the test falls through to south's top row
        let result = service().detect(GeoPoint::new(40.0, 140.5)).unwrap();
        assert_eq!(result.region_id, "south");
        assert_eq!(result.raster_point, RasterPoint::new(50.0, 0.0));
        assert_eq!(result.candidate_trace.region_ids(), vec!["north", "south"]);
    }

    #[test]
    fn test_detect_rejects_invalid_point() {
        let err = service().detect(GeoPoint::new(95.0, 140.5)).unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCoordinates { .. }));
    }

    #[test]
    fn test_detect_no_candidate() {
        let err = service().detect(GeoPoint::new(35.0, 140.5)).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Detection(DetectionError::NoCandidate { .. })
        ));
    }

    #[test]
    fn test_project_into() {
        let report = service()
            .project_into("south", GeoPoint::new(39.25, 140.75))
            .unwrap();

        assert_eq!(report.region_id, "south");
        assert_eq!(report.raster, RasterPoint::new(75.0, 75.0));
        assert_eq!((report.canvas_width, report.canvas_height), (100, 100));
        assert!(report.inside_shape);
    }

    #[test]
    fn test_project_into_outside_bounds() {
        let err = service()
            .project_into("south", GeoPoint::new(40.5, 140.5))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Projection(ref e) if e.region_id == "south"));
    }

    #[test]
    fn test_unknown_region() {
        let err = service()
            .project_into("tokyo", GeoPoint::new(40.5, 140.5))
            .unwrap_err();
        match err {
            ServiceError::UnknownRegion { id, known } => {
                assert_eq!(id, "tokyo");
                assert_eq!(known, vec!["north", "south"]);
            }
            other => panic!("Expected UnknownRegion, got {:?}", other),
        }
    }

    #[test]
    fn test_marker_svg() {
        let svg = service()
            .marker_svg("north", GeoPoint::new(40.5, 140.5))
            .unwrap();
        assert!(svg.contains(r#"<g class="marker""#));
        assert!(svg.contains(r#"cx="50" cy="50""#));
    }

    #[test]
    fn test_preview() {
        let (result, pixmap) = service().preview(GeoPoint::new(39.5, 140.5)).unwrap();
        assert_eq!(result.region_id, "south");
        assert_eq!((pixmap.width(), pixmap.height()), (100, 100));
    }

    #[test]
    fn test_regions_sorted() {
        let service = service();
        let ids: Vec<&str> = service.regions().iter().map(|r| r.id()).collect();
        assert_eq!(ids, vec!["north", "south"]);
    }

    #[test]
    fn test_from_config_with_region_table() {
        let temp_dir = TempDir::new().unwrap();
        let maps = temp_dir.path().join("maps");
        fs::create_dir_all(&maps).unwrap();
        fs::write(maps.join("north.svg"), filled_rect_svg(100, 100)).unwrap();

        let table = temp_dir.path().join("regions.ini");
        fs::write(
            &table,
            r#"
[north]
name = North
code = 1
min_lat = 40.0
max_lat = 41.0
min_lng = 140.0
max_lng = 141.0
svg_file = north.svg
width = 100
height = 100
"#,
        )
        .unwrap();

        let mut config = ConfigFile::default();
        config.maps.directory = maps;
        config.maps.regions_file = Some(table);
        config.detection.tie_break = TieBreak::HighestCode;

        let service = PrefmapService::from_config(&config).unwrap();
        assert_eq!(service.regions().len(), 1);
        assert_eq!(service.detector().tie_break(), TieBreak::HighestCode);
        assert_eq!(
            service.detect(GeoPoint::new(40.5, 140.5)).unwrap().region_id,
            "north"
        );
    }

    #[test]
    fn test_from_config_missing_asset() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = ConfigFile::default();
        config.maps.directory = temp_dir.path().to_path_buf();

        let err = PrefmapService::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Registry(RegistryError::Asset { ref region, .. }) if region == "aomori"
        ));
    }

    #[test]
    fn test_from_config_missing_table() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = ConfigFile::default();
        config.maps.regions_file = Some(temp_dir.path().join("missing.ini"));

        let err = PrefmapService::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            ServiceError::Registry(RegistryError::Catalog(_))
        ));
    }

    fn _assert_send_sync<T: Send + Sync>() {}
    fn _assert_service_bounds() {
        _assert_send_sync::<PrefmapService>();
    }
}
