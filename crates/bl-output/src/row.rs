//! Export row types.

use rustc_hash::FxHashMap;
use serde::Serialize;

use bl_core::NodeId;
use bl_netsim::NetworkMetrics;
use bl_obstacle::{ObstacleKind, ObstacleMatch, ObstructionTable};
use bl_route::NodeTable;

/// One route node with everything derived for it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeRecord {
    pub id:                   NodeId,
    /// Reconciled speed, km/h.
    pub speed:                f64,
    /// `[lat, lon]`.
    pub coordinates:          [f64; 2],
    pub distance_along_route: f64,
    pub segment_length:       f64,
    pub obstructed_distance:  f64,
    pub obstructed_time:      f64,
    pub elapsed_time:         f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub burst_length:         Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_rtt:              Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pkts_to_rtt_norm:     Option<f64>,
}

/// Join the node table with obstruction totals and metrics, in route order.
pub fn node_records(
    table: &NodeTable,
    obstructions: &ObstructionTable,
    metrics: &FxHashMap<NodeId, NetworkMetrics>,
) -> Vec<NodeRecord> {
    table
        .iter()
        .map(|n| {
            let o = obstructions.get(n.id).unwrap_or_default();
            let m = metrics.get(&n.id);
            NodeRecord {
                id: n.id,
                speed: n.speed_kmh,
                coordinates: [n.coordinates.lat, n.coordinates.lon],
                distance_along_route: n.distance_along_route_m,
                segment_length: n.segment_length_m,
                obstructed_distance: o.distance_m,
                obstructed_time: o.time_secs,
                elapsed_time: n.elapsed_secs,
                burst_length: m.map(|m| m.burst_length),
                max_rtt: m.map(|m| m.max_rtt),
                pkts_to_rtt_norm: m.map(|m| m.pkts_to_rtt_norm),
            }
        })
        .collect()
}

/// Contents of `RouteData.json`.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteDataExport {
    pub route_data: Vec<NodeRecord>,
    /// Bridge matches.
    pub obstacles:  Vec<ObstacleMatch>,
    pub tunnels:    Vec<ObstacleMatch>,
}

impl RouteDataExport {
    /// Split `matches` by kind alongside the node records.
    pub fn new(route_data: Vec<NodeRecord>, matches: &[ObstacleMatch]) -> Self {
        let (tunnels, obstacles) = matches.iter().cloned().partition(|m| m.kind == ObstacleKind::Tunnel);
        Self { route_data, obstacles, tunnels }
    }
}
