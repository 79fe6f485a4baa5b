//! Routing-service request rendering.

use bl_core::{AnalysisConfig, GeoPoint};

/// A point-to-point route request with step geometry and full annotations.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteRequest {
    pub start:   GeoPoint,
    pub end:     GeoPoint,
    pub profile: String,
}

impl RouteRequest {
    pub fn new(start: GeoPoint, end: GeoPoint, profile: impl Into<String>) -> Self {
        Self { start, end, profile: profile.into() }
    }

    /// Request using the profile named in `config`.
    pub fn from_config(start: GeoPoint, end: GeoPoint, config: &AnalysisConfig) -> Self {
        Self::new(start, end, config.routing_profile.clone())
    }

    /// Render the request URL against `host`.  Coordinates are emitted
    /// longitude first, as the service expects.
    pub fn url(&self, host: &str) -> String {
        format!(
            "{}/route/v1/{}/{},{};{},{}?steps=true&annotations=true&geometries=geojson&overview=full",
            host.trim_end_matches('/'),
            self.profile,
            self.start.lon,
            self.start.lat,
            self.end.lon,
            self.end.lat,
        )
    }
}
