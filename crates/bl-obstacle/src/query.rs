//! Obstacle query rendering.
//!
//! The geometry service cannot be asked "which ways does this route use"
//! directly.  Instead the flattened node list is split into even- and
//! odd-indexed halves: a highway way touching nodes from *both* halves must
//! contain two consecutive route nodes, so it is part of the route itself.
//! Ways merely touching a route node (side streets) only ever match one half.
//!
//! The rendered query emits, in this order:
//!
//! 1. count of route ways
//! 2. route way bodies (tags incl. `maxspeed`, node lists)
//! 3. count of tunnels on the route
//! 4. tunnel geometries
//! 5. geometries of bridges crossing over the route, excluding
//!    `man_made=bridge` outlines and ways adjacent to route nodes

use std::fmt::Write;

use bl_core::NodeId;

/// Even/odd partition of a route's node ids plus the server timeout.
#[derive(Clone, Debug, PartialEq)]
pub struct ObstacleQuery {
    pub even_nodes:   Vec<NodeId>,
    pub odd_nodes:    Vec<NodeId>,
    pub timeout_secs: u32,
}

impl ObstacleQuery {
    /// Partition `nodes` (in traversal order) by index parity.
    pub fn from_route_nodes<I: IntoIterator<Item = NodeId>>(nodes: I, timeout_secs: u32) -> Self {
        let (even, odd): (Vec<_>, Vec<_>) = nodes.into_iter().enumerate().partition(|(i, _)| i % 2 == 0);
        Self {
            even_nodes: even.into_iter().map(|(_, n)| n).collect(),
            odd_nodes:  odd.into_iter().map(|(_, n)| n).collect(),
            timeout_secs,
        }
    }

    /// Render the query text.
    pub fn render(&self) -> String {
        let mut q = String::new();
        // Writing into a String cannot fail.
        let _ = write!(
            q,
            "[out:json][timeout: {timeout}];\n\
             node(id: {even});\n\
             way(bn)[highway]->.route_a;\n\
             ._ -> .nodes_a;\n\
             node(id: {odd});\n\
             way(bn)[highway]->.route_b;\n\
             ._ -> .nodes_b;\n\
             (.nodes_a; .nodes_b;)->._;\n\
             way(bn)->.adjacent;\n\
             \n\
             way.route_a.route_b->.route;\n\
             .route out count;\n\
             .route out body;\n\
             \n\
             way.route[tunnel]->.tunnels;\n\
             .tunnels out count;\n\
             .tunnels out geom;\n\
             \n\
             (.route; - way.route[man_made=\"bridge\"];)->.route;\n\
             way(around.route:0)[bridge][man_made!=\"bridge\"]->.bridges;\n\
             (.bridges; - .adjacent;)->.crossing;\n\
             .crossing out ids geom;",
            timeout = self.timeout_secs,
            even = join_ids(&self.even_nodes),
            odd = join_ids(&self.odd_nodes),
        );
        q
    }

    /// Form-encoded POST body (`data=<query>`).
    pub fn form_body(&self) -> String {
        form_urlencoded::Serializer::new(String::new()).append_pair("data", &self.render()).finish()
    }
}

fn join_ids(ids: &[NodeId]) -> String {
    let mut out = String::with_capacity(ids.len() * 11);
    for (i, id) in ids.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        let _ = write!(out, "{}", id.0);
    }
    out
}
