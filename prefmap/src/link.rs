//! Map link resolution.
//!
//! Shared map links carry coordinates in one of two places:
//!
//! - a `q` query parameter: `https://maps.google.com/?q=40.82,140.74`
//! - an `@` path segment: `https://www.google.com/maps/@40.82,140.74,15z`
//!
//! Short links (`https://maps.app.goo.gl/...`) carry neither and must be
//! expanded by following their redirects first; [`resolve_point`] does both.

use std::time::Duration;

use reqwest::Url;
use tracing::debug;

use crate::config::ResolverSettings;
use crate::geo::GeoPoint;

/// Errors raised while turning a map link into a coordinate.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("Invalid map link '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("No coordinates found in map link '{0}' (expected '?q=LAT,LNG' or '/@LAT,LNG,...')")]
    NoCoordinates(String),

    #[error("Invalid coordinate '{value}' in map link '{url}'")]
    InvalidCoordinate { url: String, value: String },

    #[error("Coordinate {point} in map link '{url}' is outside latitude [-90, 90] / longitude [-180, 180]")]
    OutOfRange { url: String, point: GeoPoint },

    #[error("Failed to expand map link '{url}': {message}")]
    Http { url: String, message: String },
}

/// Expands shortened map links.
///
/// This abstraction allows the network to be replaced in tests.
pub trait LinkResolver: Send + Sync {
    /// Follow redirects from `url` and return the final URL.
    fn expand(&self, url: &str) -> Result<String, LinkError>;
}

/// Link resolver issuing a blocking HEAD request and following redirects.
#[derive(Debug, Clone)]
pub struct ReqwestResolver {
    client: reqwest::blocking::Client,
}

impl ReqwestResolver {
    /// Creates a resolver with the given timeout and user agent.
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, LinkError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(user_agent)
            .build()
            .map_err(|e| LinkError::Http {
                url: String::new(),
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client })
    }

    /// Creates a resolver from the `[resolver]` config section.
    pub fn from_settings(settings: &ResolverSettings) -> Result<Self, LinkError> {
        Self::new(settings.timeout, &settings.user_agent)
    }
}

impl LinkResolver for ReqwestResolver {
    fn expand(&self, url: &str) -> Result<String, LinkError> {
        let response = self.client.head(url).send().map_err(|e| LinkError::Http {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        // Some link shorteners answer HEAD on the final hop with an error
        // status; the final URL is still the one carrying the coordinates.
        debug!(
            url,
            status = %response.status(),
            expanded = %response.url(),
            "Expanded map link"
        );

        Ok(response.url().to_string())
    }
}

/// Extract the coordinate carried by a map link.
///
/// The `q` query parameter takes precedence over an `@` path segment.
pub fn extract_lat_lng(url: &str) -> Result<GeoPoint, LinkError> {
    let parsed = Url::parse(url.trim()).map_err(|e| LinkError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;

    let query = parsed
        .query_pairs()
        .find(|(key, _)| key == "q")
        .map(|(_, value)| value.into_owned());

    let (lat, lng) = if let Some(value) = query {
        let mut parts = value.split(',');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(lat), Some(lng), None) => (lat.to_string(), lng.to_string()),
            _ => {
                return Err(LinkError::InvalidCoordinate {
                    url: url.to_string(),
                    value,
                })
            }
        }
    } else if let Some((_, tail)) = parsed.path().split_once('@') {
        let mut parts = tail.split(',');
        match (parts.next(), parts.next()) {
            (Some(lat), Some(lng)) => (lat.to_string(), lng.to_string()),
            _ => {
                return Err(LinkError::InvalidCoordinate {
                    url: url.to_string(),
                    value: tail.to_string(),
                })
            }
        }
    } else {
        return Err(LinkError::NoCoordinates(url.to_string()));
    };

    let point = GeoPoint::new(parse_degrees(url, &lat)?, parse_degrees(url, &lng)?);
    if !point.is_valid() {
        return Err(LinkError::OutOfRange {
            url: url.to_string(),
            point,
        });
    }

    Ok(point)
}

fn parse_degrees(url: &str, value: &str) -> Result<f64, LinkError> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| LinkError::InvalidCoordinate {
            url: url.to_string(),
            value: value.to_string(),
        })
}

/// Resolve a map link to a coordinate.
///
/// Links that already carry coordinates are parsed directly; anything else
/// is expanded through `resolver` and parsed again.
pub fn resolve_point<R: LinkResolver + ?Sized>(
    resolver: &R,
    url: &str,
) -> Result<GeoPoint, LinkError> {
    match extract_lat_lng(url) {
        Err(LinkError::NoCoordinates(_)) => {
            let expanded = resolver.expand(url)?;
            extract_lat_lng(&expanded)
        }
        other => other,
    }
}
