//! Service error types.

use std::fmt;

use crate::detect::DetectionError;
use crate::geo::{GeoPoint, OutOfBoundsError};
use crate::link::LinkError;
use crate::marker::MarkerError;
use crate::preview::PreviewError;
use crate::region::RegistryError;

/// Errors that can occur during service operations.
#[derive(Debug)]
pub enum ServiceError {
    /// Region table or shape assets could not be loaded
    Registry(RegistryError),
    /// Detection found no region
    Detection(DetectionError),
    /// Point lies outside the requested region's bounding box
    Projection(OutOfBoundsError),
    /// No region with the requested id
    UnknownRegion { id: String, known: Vec<String> },
    /// Coordinate outside the valid latitude/longitude ranges
    InvalidCoordinates { point: GeoPoint },
    /// Map link could not be resolved
    Link(LinkError),
    /// Marker could not be added to the region SVG
    Marker(MarkerError),
    /// Preview could not be rendered or written
    Preview(PreviewError),
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry(e) => write!(f, "Region setup failed: {}", e),
            Self::Detection(e) => write!(f, "{}", e),
            Self::Projection(e) => write!(f, "{}", e),
            Self::UnknownRegion { id, known } => {
                write!(
                    f,
                    "Unknown region '{}' (known regions: {})",
                    id,
                    known.join(", ")
                )
            }
            Self::InvalidCoordinates { point } => write!(
                f,
                "Invalid coordinates {}: latitude must be within [-90, 90] and longitude within [-180, 180]",
                point
            ),
            Self::Link(e) => write!(f, "{}", e),
            Self::Marker(e) => write!(f, "Marker error: {}", e),
            Self::Preview(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Registry(e) => Some(e),
            Self::Detection(e) => Some(e),
            Self::Projection(e) => Some(e),
            Self::Link(e) => Some(e),
            Self::Marker(e) => Some(e),
            Self::Preview(e) => Some(e),
            Self::UnknownRegion { .. } | Self::InvalidCoordinates { .. } => None,
        }
    }
}

impl From<RegistryError> for ServiceError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

impl From<DetectionError> for ServiceError {
    fn from(e: DetectionError) -> Self {
        Self::Detection(e)
    }
}

impl From<OutOfBoundsError> for ServiceError {
    fn from(e: OutOfBoundsError) -> Self {
        Self::Projection(e)
    }
}

impl From<LinkError> for ServiceError {
    fn from(e: LinkError) -> Self {
        Self::Link(e)
    }
}

impl From<MarkerError> for ServiceError {
    fn from(e: MarkerError) -> Self {
        Self::Marker(e)
    }
}

impl From<PreviewError> for ServiceError {
    fn from(e: PreviewError) -> Self {
        Self::Preview(e)
    }
}
