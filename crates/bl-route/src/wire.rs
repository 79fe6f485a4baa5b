//! Routing-service response types.
//!
//! Only the fields the pipeline reads are modelled; everything else in the
//! response is ignored by serde.  Every collection defaults to empty so a
//! response missing legs, steps, or annotations still parses and simply
//! flattens to an empty table.

use std::io::Read;

use serde::Deserialize;

use bl_core::NodeId;

use crate::{RouteError, RouteResult};

/// Top-level routing response.
#[derive(Debug, Clone, Deserialize)]
pub struct RouteResponse {
    pub code: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub routes: Vec<Route>,
}

impl RouteResponse {
    /// Parse a response from any JSON source.
    pub fn from_json_reader<R: Read>(reader: R) -> RouteResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Check the service status and take the first (best) route.
    pub fn into_first_route(self) -> RouteResult<Route> {
        if self.code != "Ok" {
            return Err(RouteError::Service {
                message: self.message.unwrap_or_default(),
                code:    self.code,
            });
        }
        self.routes.into_iter().next().ok_or(RouteError::NoRoute)
    }
}

/// One route: an ordered list of legs between consecutive waypoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Route {
    #[serde(default)]
    pub distance: f64,
    #[serde(default)]
    pub duration: f64,
    #[serde(default)]
    pub legs: Vec<RouteLeg>,
}

/// A leg between two waypoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteLeg {
    #[serde(default)]
    pub steps: Vec<RouteStep>,
    #[serde(default)]
    pub annotation: Option<Annotation>,
}

/// One turn-by-turn step carrying its own geometry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RouteStep {
    #[serde(default)]
    pub geometry: StepGeometry,
    #[serde(default)]
    pub name: String,
}

/// GeoJSON `LineString` geometry; coordinates are `[lon, lat]`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StepGeometry {
    #[serde(default)]
    pub coordinates: Vec<[f64; 2]>,
}

/// Per-leg annotation block.
///
/// `nodes` has one entry per node; `distance`, `duration` and `speed` have
/// one entry per edge between consecutive nodes (one fewer than `nodes`).
/// `speed` is in metres per second.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Annotation {
    #[serde(default)]
    pub distance: Vec<f64>,
    #[serde(default)]
    pub duration: Vec<f64>,
    #[serde(default)]
    pub speed: Vec<f64>,
    #[serde(default)]
    pub nodes: Vec<NodeId>,
}
