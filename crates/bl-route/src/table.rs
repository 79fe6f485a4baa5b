//! Node Data Table: the per-node record set for one route.
//!
//! # Layout
//!
//! Nodes are stored once, in traversal order, as composite records; a hash
//! index maps `NodeId → position`.  Traversal order is the order nodes appear
//! in the flattened route, never the numeric order of their ids.
//!
//! If a route revisits the same node id, only the last occurrence is kept
//! (at its own traversal position).

use rustc_hash::FxHashMap;

use bl_core::{GeoPoint, NodeId};

/// One physical waypoint on the route.
#[derive(Clone, Debug, PartialEq)]
pub struct RouteNode {
    pub id:          NodeId,
    pub coordinates: GeoPoint,
    /// Speed (km/h) of the segment arriving at this node as reported by the
    /// routing service.  The first node is 0.
    pub route_speed_kmh: f64,
    /// Speed (km/h) after reconciliation.  Equals `route_speed_kmh` until
    /// [`reconcile_speeds`](crate::reconcile_speeds) has run.
    pub speed_kmh: f64,
    /// Cumulative distance from route start, metres.
    pub distance_along_route_m: f64,
    /// Length of the segment ending at this node, metres.  0 for the first node.
    pub segment_length_m: f64,
    /// Cumulative routed travel time from route start, seconds.
    pub elapsed_secs: f64,
}

impl RouteNode {
    /// Time (s) needed to traverse the segment ending here at the reconciled
    /// speed, or `None` when the speed is not positive.
    #[inline]
    pub fn segment_time_secs(&self) -> Option<f64> {
        if self.speed_kmh > 0.0 {
            Some(self.segment_length_m / (self.speed_kmh / 3.6))
        } else {
            None
        }
    }
}

/// Ordered, id-indexed collection of [`RouteNode`]s.
#[derive(Clone, Debug, Default)]
pub struct NodeTable {
    nodes: Vec<RouteNode>,
    index: FxHashMap<NodeId, usize>,
}

impl NodeTable {
    /// An empty table: "no route available".
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from nodes in traversal order.  Duplicate ids keep their last
    /// occurrence.
    pub fn from_nodes(nodes: Vec<RouteNode>) -> Self {
        let total = nodes.len();
        let mut seen: FxHashMap<NodeId, ()> = FxHashMap::default();
        let mut kept: Vec<RouteNode> = nodes
            .into_iter()
            .rev()
            .filter(|n| seen.insert(n.id, ()).is_none())
            .collect();
        kept.reverse();

        if kept.len() != total {
            log::warn!(
                "route revisits {} node id(s); keeping last occurrence of each",
                total - kept.len()
            );
        }

        let index = kept.iter().enumerate().map(|(i, n)| (n.id, i)).collect();
        Self { nodes: kept, index }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&RouteNode> {
        self.index.get(&id).map(|&i| &self.nodes[i])
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.index.contains_key(&id)
    }

    /// Position of `id` in traversal order.
    pub fn position(&self, id: NodeId) -> Option<usize> {
        self.index.get(&id).copied()
    }

    /// Nodes in traversal order.
    pub fn nodes(&self) -> &[RouteNode] {
        &self.nodes
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RouteNode> {
        self.nodes.iter()
    }

    /// Node ids in traversal order.
    pub fn ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    /// Elapsed time at the last node, i.e. the route's total duration.
    pub fn total_elapsed_secs(&self) -> f64 {
        self.nodes.last().map_or(0.0, |n| n.elapsed_secs)
    }

    /// Overwrite reconciled speeds positionally.  Only the reconciler calls
    /// this, with one value per node.
    pub(crate) fn set_speeds(&mut self, speeds: Vec<f64>) {
        debug_assert_eq!(speeds.len(), self.nodes.len());
        for (node, speed) in self.nodes.iter_mut().zip(speeds) {
            node.speed_kmh = speed;
        }
    }
}

impl<'a> IntoIterator for &'a NodeTable {
    type Item = &'a RouteNode;
    type IntoIter = std::slice::Iter<'a, RouteNode>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
