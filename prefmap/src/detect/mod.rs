//! Region detection.
//!
//! [`RegionDetector`] chains the three stages of detection:
//!
//! ```text
//! GeoPoint
//!   └── candidate::filter      bounding boxes containing the point
//!         └── geo::project     per candidate: raster position on its canvas
//!               └── ShapeRasterTester::contains_point
//!                              first candidate whose shape covers the pixel wins
//! ```
//!
//! Every candidate considered is recorded in the [`CandidateTrace`], so a
//! failed detection can explain which regions were near and why each one
//! was rejected.
//!
//! # Thread Safety
//!
//! The detector holds only immutable data and allocates a fresh raster
//! surface for each shape test, so one instance can serve any number of
//! threads concurrently.

mod types;

use std::sync::Arc;

use tracing::{debug, instrument};

pub use types::{
    CandidateTrace, DetectionError, DetectionResult, TieBreak, TraceEntry, TraceReason,
};

use crate::candidate;
use crate::geo::{self, GeoPoint};
use crate::raster::{RasterBackend, ResvgBackend, ShapeRasterTester};
use crate::region::{Region, RegionRegistry};

/// Detects which region contains a geographic point.
#[derive(Debug, Clone)]
pub struct RegionDetector<B = ResvgBackend> {
    registry: Arc<RegionRegistry>,
    tester: ShapeRasterTester<B>,
    tie_break: TieBreak,
}

impl RegionDetector {
    /// Create a detector rendering shapes with [`ResvgBackend`].
    pub fn with_resvg(registry: Arc<RegionRegistry>) -> Self {
        Self::new(registry, ShapeRasterTester::resvg())
    }
}

impl<B: RasterBackend> RegionDetector<B> {
    /// Create a detector over `registry` using the lowest-code tie-break.
    pub fn new(registry: Arc<RegionRegistry>, tester: ShapeRasterTester<B>) -> Self {
        Self {
            registry,
            tester,
            tie_break: TieBreak::default(),
        }
    }

    /// Set the order in which overlapping candidates are tested.
    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn tie_break(&self) -> TieBreak {
        self.tie_break
    }

    pub fn registry(&self) -> &RegionRegistry {
        &self.registry
    }

    /// Detect the region containing `point`.
    ///
    /// # Errors
    ///
    /// * [`DetectionError::NoCandidate`] - no bounding box contains the point
    /// * [`DetectionError::NoMatch`] - boxes matched but no shape covers the
    ///   point; carries the full candidate trace
    #[instrument(level = "debug", skip(self), fields(lat = point.lat, lng = point.lng))]
    pub fn detect(&self, point: GeoPoint) -> Result<DetectionResult, DetectionError> {
        let mut candidates = candidate::filter(point, &self.registry);
        if candidates.is_empty() {
            debug!("No bounding box contains point");
            return Err(DetectionError::NoCandidate { point });
        }

        if self.tie_break == TieBreak::HighestCode {
            candidates.reverse();
        }

        debug!(
            candidates = ?candidates.iter().map(|r| r.id()).collect::<Vec<_>>(),
            "Bounding-box candidates"
        );

        self.test_candidates(point, candidates)
    }

    /// Shape-test `candidates` in the given order; the first match wins.
    ///
    /// Candidates whose box rejects the point are traced as
    /// `projection-failed` and skipped.
    fn test_candidates(
        &self,
        point: GeoPoint,
        candidates: Vec<&Region>,
    ) -> Result<DetectionResult, DetectionError> {
        let mut trace = CandidateTrace::default();
        for region in candidates {
            let raster_point = match geo::project(point, region) {
                Ok(raster_point) => raster_point,
                Err(e) => {
                    debug!(region = region.id(), error = %e, "Projection failed");
                    trace.push(TraceEntry::rejected(
                        region.id(),
                        TraceReason::ProjectionFailed,
                        None,
                    ));
                    continue;
                }
            };

            if self.tester.contains_point(region, raster_point) {
                debug!(region = region.id(), %raster_point, "Point inside shape");
                trace.push(TraceEntry::accepted(region.id(), raster_point));
                return Ok(DetectionResult {
                    region_id: region.id().to_string(),
                    point,
                    raster_point,
                    candidate_trace: trace,
                });
            }

            debug!(region = region.id(), %raster_point, "Point outside shape");
            trace.push(TraceEntry::rejected(
                region.id(),
                TraceReason::OutsideShape,
                Some(raster_point),
            ));
        }

        Err(DetectionError::NoMatch { point, trace })
    }
}
