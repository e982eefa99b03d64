//! Detection result and trace types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geo::{GeoPoint, RasterPoint};

/// Why a candidate was accepted or rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TraceReason {
    /// The projected pixel is covered by the region's shape
    InsideShape,
    /// The projected pixel is not covered by the region's shape
    OutsideShape,
    /// The point could not be projected into the region's canvas
    ProjectionFailed,
}

impl TraceReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            TraceReason::InsideShape => "inside-shape",
            TraceReason::OutsideShape => "outside-shape",
            TraceReason::ProjectionFailed => "projection-failed",
        }
    }
}

impl fmt::Display for TraceReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One candidate considered during detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceEntry {
    pub region_id: String,
    pub included: bool,
    pub reason: TraceReason,
    /// Raster position tested, absent when projection failed
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub raster_point: Option<RasterPoint>,
}

impl TraceEntry {
    pub fn accepted(region_id: &str, raster_point: RasterPoint) -> Self {
        Self {
            region_id: region_id.to_string(),
            included: true,
            reason: TraceReason::InsideShape,
            raster_point: Some(raster_point),
        }
    }

    pub fn rejected(region_id: &str, reason: TraceReason, raster_point: Option<RasterPoint>) -> Self {
        Self {
            region_id: region_id.to_string(),
            included: false,
            reason,
            raster_point,
        }
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let verdict = if self.included { "accepted" } else { "rejected" };
        write!(f, "{} {} ({})", self.region_id, verdict, self.reason)?;
        if let Some(point) = self.raster_point {
            write!(f, " at {}", point)?;
        }
        Ok(())
    }
}

/// Ordered record of every candidate considered during one detection.
///
/// Diagnostic only; the detected region is authoritative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateTrace(Vec<TraceEntry>);

impl CandidateTrace {
    pub fn push(&mut self, entry: TraceEntry) {
        self.0.push(entry);
    }

    pub fn entries(&self) -> &[TraceEntry] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = &TraceEntry> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Region ids in the order they were considered.
    pub fn region_ids(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.region_id.as_str()).collect()
    }
}

impl fmt::Display for CandidateTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return f.write_str("no candidates");
        }
        for (i, entry) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", entry)?;
        }
        Ok(())
    }
}

/// Successful detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectionResult {
    /// Detected region
    pub region_id: String,
    /// Input coordinate
    pub point: GeoPoint,
    /// Position of the point on the detected region's canvas
    pub raster_point: RasterPoint,
    /// Every candidate considered, ending with the accepted one
    pub candidate_trace: CandidateTrace,
}

/// Detection failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DetectionError {
    /// The point lies outside every configured bounding box
    #[error("Point {point} is not in any known region (outside every region's bounding box)")]
    NoCandidate { point: GeoPoint },

    /// The point lies in at least one bounding box but in no region's shape
    #[error("Point {point} is inside {} bounding box(es) but not inside any region shape: {trace}", .trace.len())]
    NoMatch {
        point: GeoPoint,
        trace: CandidateTrace,
    },
}

impl DetectionError {
    /// Candidate trace for near misses; empty for [`DetectionError::NoCandidate`].
    pub fn trace(&self) -> Option<&CandidateTrace> {
        match self {
            DetectionError::NoCandidate { .. } => None,
            DetectionError::NoMatch { trace, .. } => Some(trace),
        }
    }
}

/// Order in which overlapping candidates are shape-tested.
///
/// The first candidate whose shape covers the point wins, so this decides
/// ambiguous points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TieBreak {
    /// Ascending order code; the lowest-coded region wins
    #[default]
    LowestCode,
    /// Descending order code; the highest-coded region wins
    HighestCode,
}

impl TieBreak {
    pub fn as_str(&self) -> &'static str {
        match self {
            TieBreak::LowestCode => "lowest-code",
            TieBreak::HighestCode => "highest-code",
        }
    }
}

impl fmt::Display for TieBreak {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TieBreak {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('_', "-").as_str() {
            "lowest-code" => Ok(TieBreak::LowestCode),
            "highest-code" => Ok(TieBreak::HighestCode),
            other => Err(format!("unknown tie-break policy '{}'", other)),
        }
    }
}
