//! Route Flattener.
//!
//! Turns the nested `legs → steps → coordinates` structure plus the per-leg
//! annotation arrays into one ordered list of composite [`RouteNode`]s.
//!
//! # Alignment
//!
//! ```text
//! node i:        0      1      2    …   N-1
//! edge i:           0      1        …
//! speed[i]     = 0      e0     e1   …         (km/h, edge arriving at node)
//! segment[i]   = 0      e0     e1   …         (metres)
//! distance[i]  = 0      Σe0    Σe0..e1 …      (metres)
//! elapsed[i]   = 0      Σd0    Σd0..d1 …      (seconds)
//! ```
//!
//! Consecutive step geometries share their boundary coordinate; every step
//! after the very first drops its leading coordinate.  Legs likewise share
//! their boundary node id, which is dropped from every leg after the first
//! when it repeats the previous leg's last id.

use bl_core::{GeoPoint, NodeId};

use crate::table::{NodeTable, RouteNode};
use crate::wire::Route;

const MPS_TO_KMH: f64 = 3.6;

/// Flatten `route` into a [`NodeTable`].
///
/// A route with no legs, steps, or annotations yields an empty table.  Nodes
/// lacking a coordinate, speed, or distance at their position are skipped.
pub fn flatten_route(route: &Route) -> NodeTable {
    let coordinates: Vec<GeoPoint> = route
        .legs
        .iter()
        .flat_map(|leg| leg.steps.iter())
        .enumerate()
        .flat_map(|(i, step)| {
            let skip = if i == 0 { 0 } else { 1 };
            step.geometry.coordinates.iter().skip(skip).copied().map(GeoPoint::from_lon_lat)
        })
        .collect();

    let mut ids: Vec<NodeId> = Vec::new();
    let mut edge_distance: Vec<f64> = Vec::new();
    let mut edge_duration: Vec<f64> = Vec::new();
    let mut edge_speed_kmh: Vec<f64> = Vec::new();

    for annotation in route.legs.iter().filter_map(|leg| leg.annotation.as_ref()) {
        let skip = match (ids.last(), annotation.nodes.first()) {
            (Some(last), Some(first)) if last == first => 1,
            _ => 0,
        };
        ids.extend(annotation.nodes.iter().skip(skip).copied());
        edge_distance.extend_from_slice(&annotation.distance);
        edge_duration.extend_from_slice(&annotation.duration);
        edge_speed_kmh.extend(annotation.speed.iter().map(|mps| mps * MPS_TO_KMH));
    }

    if ids.is_empty() || coordinates.is_empty() {
        log::warn!("route has no annotated nodes or no geometry; node table is empty");
        return NodeTable::empty();
    }

    let cumulative_distance = prefix_sums(&edge_distance);
    let cumulative_duration = prefix_sums(&edge_duration);

    let mut skipped = 0usize;
    let nodes: Vec<RouteNode> = ids
        .iter()
        .enumerate()
        .filter_map(|(i, &id)| {
            let node = build_node(
                id,
                i,
                &coordinates,
                &edge_speed_kmh,
                &edge_distance,
                &cumulative_distance,
                &cumulative_duration,
            );
            if node.is_none() {
                skipped += 1;
            }
            node
        })
        .collect();

    if skipped > 0 {
        log::warn!("skipped {skipped} route node(s) with missing coordinates or annotations");
    }
    log::debug!("flattened route into {} nodes", nodes.len());

    NodeTable::from_nodes(nodes)
}

fn build_node(
    id: NodeId,
    i: usize,
    coordinates: &[GeoPoint],
    edge_speed_kmh: &[f64],
    edge_distance: &[f64],
    cumulative_distance: &[f64],
    cumulative_duration: &[f64],
) -> Option<RouteNode> {
    let coordinates = *coordinates.get(i)?;
    let (speed, segment) = if i == 0 {
        (0.0, 0.0)
    } else {
        (*edge_speed_kmh.get(i - 1)?, *edge_distance.get(i - 1)?)
    };
    let distance = *cumulative_distance.get(i)?;
    let elapsed = cumulative_duration.get(i).copied().unwrap_or(0.0);

    Some(RouteNode {
        id,
        coordinates,
        route_speed_kmh: speed,
        speed_kmh: speed,
        distance_along_route_m: distance,
        segment_length_m: segment,
        elapsed_secs: elapsed,
    })
}

/// Prefix sums with a leading zero: `[a, b, c] → [0, a, a+b, a+b+c]`.
fn prefix_sums(values: &[f64]) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len() + 1);
    let mut acc = 0.0;
    out.push(acc);
    for v in values {
        acc += v;
        out.push(acc);
    }
    out
}
