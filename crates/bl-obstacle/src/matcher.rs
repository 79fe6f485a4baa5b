//! Obstacle Matcher.
//!
//! Each obstacle is assigned to the single route node nearest (haversine) to
//! the centre of its bounding box.  The scan is O(nodes × obstacles), which
//! at route scale (hundreds of nodes, tens of obstacles) is cheaper than
//! building an index.  Ties go to the node first in traversal order.

use serde::Serialize;

use bl_core::{BoundingBox, GeoPoint, NodeId, WayId};
use bl_route::NodeTable;

use crate::dataset::{AttributeDataset, ObstacleAttributes};
use crate::response::ObstacleResponse;

/// Obstacle classification.  Supplied by the caller from the response group.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    Bridge,
    Tunnel,
}

/// An externally reported obstacle, ready for matching.
#[derive(Clone, Debug, PartialEq)]
pub struct Obstacle {
    pub id:         WayId,
    pub kind:       ObstacleKind,
    pub bounds:     BoundingBox,
    /// Static attributes; `None` if the way is absent from the dataset.
    pub attributes: Option<ObstacleAttributes>,
}

impl Obstacle {
    /// Build the obstacle list from a split response: tunnel group first,
    /// then bridge-crossing group.  Bridges pick up their attributes from
    /// `dataset`; tunnels carry none.  Ways without any geometry cannot be
    /// located and are dropped.
    pub fn collect(response: &ObstacleResponse, dataset: &AttributeDataset) -> Vec<Obstacle> {
        let tunnels = response.tunnels.iter().map(|w| (w, ObstacleKind::Tunnel));
        let bridges = response.bridges.iter().map(|w| (w, ObstacleKind::Bridge));

        tunnels
            .chain(bridges)
            .filter_map(|(way, kind)| {
                let Some(bounds) = way.bounding_box() else {
                    log::warn!("obstacle way {} has no geometry; skipped", way.id);
                    return None;
                };
                let attributes = match kind {
                    ObstacleKind::Bridge => {
                        let found = dataset.get(way.id).cloned();
                        if found.is_none() {
                            log::debug!("bridge way {} not in attribute dataset", way.id);
                        }
                        found
                    }
                    ObstacleKind::Tunnel => None,
                };
                Some(Obstacle { id: way.id, kind, bounds, attributes })
            })
            .collect()
    }
}

/// Association between one obstacle and its nearest route node.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleMatch {
    pub obstacle_id:     WayId,
    pub kind:            ObstacleKind,
    pub nearest_node_id: NodeId,
    pub center:          GeoPoint,
    #[serde(flatten)]
    pub attributes:      Option<ObstacleAttributes>,
}

/// Node of `table` nearest to `point`, first in traversal order on ties.
/// `None` only for an empty table.
pub fn nearest_node(table: &NodeTable, point: GeoPoint) -> Option<NodeId> {
    let mut best: Option<(NodeId, f64)> = None;
    for node in table {
        let d = point.distance_m(node.coordinates);
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((node.id, d));
        }
    }
    best.map(|(id, _)| id)
}

/// Match every obstacle to its nearest node.  An empty table yields no
/// matches.
pub fn match_obstacles(table: &NodeTable, obstacles: &[Obstacle]) -> Vec<ObstacleMatch> {
    if table.is_empty() {
        log::warn!("no route nodes; {} obstacle(s) left unmatched", obstacles.len());
        return Vec::new();
    }

    obstacles
        .iter()
        .filter_map(|o| {
            let center = o.bounds.center();
            nearest_node(table, center).map(|nearest_node_id| ObstacleMatch {
                obstacle_id: o.id,
                kind: o.kind,
                nearest_node_id,
                center,
                attributes: o.attributes.clone(),
            })
        })
        .collect()
}
