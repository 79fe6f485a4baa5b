//! Geometry-service (Overpass) response element types.
//!
//! A response is a flat `elements` array mixing two record shapes,
//! discriminated by `"type"`:
//!
//! ```json
//! { "type": "count", "id": 0, "tags": { "ways": "12", "total": "12" } }
//! { "type": "way", "id": 4711, "nodes": [..], "tags": { "maxspeed": "100" } }
//! { "type": "way", "id": 4712, "bounds": { "minlat": .. }, "geometry": [{ "lat": .., "lon": .. }] }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use bl_core::{BoundingBox, GeoPoint, NodeId, WayId};

use crate::{ObstacleError, ObstacleResult};

/// One record of the `elements` array.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OverpassElement {
    Count(OverpassCount),
    Way(OverpassWay),
}

/// `out count` record.  Counts are transmitted as strings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OverpassCount {
    #[serde(default)]
    pub tags: BTreeMap<String, String>,
}

impl OverpassCount {
    /// The `ways` count, parsed.
    pub fn ways(&self) -> ObstacleResult<usize> {
        let raw = self
            .tags
            .get("ways")
            .ok_or_else(|| ObstacleError::MalformedResponse("count record has no `ways` tag".into()))?;
        raw.trim().parse::<usize>().map_err(|_| {
            ObstacleError::MalformedResponse(format!("count record `ways` tag {raw:?} is not a number"))
        })
    }
}

/// A way record.  Which optional fields are present depends on the output
/// mode the query requested (`body` vs. `ids geom`).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OverpassWay {
    pub id: WayId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bounds: Option<BoundingBox>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub geometry: Vec<WayPoint>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeId>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tags: BTreeMap<String, String>,
}

impl OverpassWay {
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Reported bounds, falling back to the box around the geometry.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        self.bounds
            .or_else(|| BoundingBox::enclosing(self.geometry.iter().map(|p| GeoPoint::new(p.lat, p.lon))))
    }
}

/// One vertex of a way geometry.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct WayPoint {
    pub lat: f64,
    pub lon: f64,
}
