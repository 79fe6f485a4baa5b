//! Obstruction Aggregator.
//!
//! Folds obstacle matches into per-node obstructed distance and time:
//!
//! ```text
//! segment_time = segment_length / (speed_kmh / 3.6)          (s)
//! ratio        = width / segment_length
//! time        += segment_time * ratio
//! distance    += width
//! ```
//!
//! # Width resolution (first available wins)
//!
//! 1. survey width, only when positive and paired with a non-empty survey
//!    name
//! 2. map `width` tag
//! 3. lane-count estimate
//! 4. nearest-neighbour imputed width
//!
//! A survey name covers the full physical structure, while the map often
//! splits one bridge into a way per carriageway.  Every obstacle after the
//! first sharing a survey name therefore contributes zero.
//!
//! Only bridges are folded in; tunnels carry no width data.

use rustc_hash::{FxHashMap, FxHashSet};

use bl_core::NodeId;
use bl_route::NodeTable;

use crate::dataset::ObstacleAttributes;
use crate::matcher::{ObstacleKind, ObstacleMatch};

/// Where an obstacle's width came from.
#[derive(Clone, Debug, PartialEq)]
pub enum WidthSource {
    /// Survey width plus the survey name used for deduplication.
    Survey { width: f64, name: String },
    Osm(f64),
    Estimated(f64),
    Imputed(f64),
}

impl WidthSource {
    pub fn width_m(&self) -> f64 {
        match self {
            WidthSource::Survey { width, .. } => *width,
            WidthSource::Osm(w) | WidthSource::Estimated(w) | WidthSource::Imputed(w) => *w,
        }
    }
}

/// Resolve the width of one obstacle, or `None` if no source has one.
pub fn resolve_width(attributes: &ObstacleAttributes) -> Option<WidthSource> {
    let survey_width = attributes.bast_width.filter(|w| *w > 0.0);
    let survey_name = attributes.bast_name.as_ref().filter(|n| !n.is_empty());
    if let (Some(width), Some(name)) = (survey_width, survey_name) {
        return Some(WidthSource::Survey { width, name: name.clone() });
    }
    attributes
        .osm_width
        .map(WidthSource::Osm)
        .or_else(|| attributes.est_width.map(WidthSource::Estimated))
        .or_else(|| attributes.nn_width.map(WidthSource::Imputed))
}

/// Accumulated obstruction at one node.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Obstruction {
    /// Metres of the segment ending at this node that lie under bridges.
    pub distance_m: f64,
    /// Seconds spent under bridges on that segment.
    pub time_secs:  f64,
}

/// Per-node obstruction totals, seeded at zero for every node of the table
/// they were computed from.
#[derive(Clone, Debug, Default)]
pub struct ObstructionTable {
    totals: FxHashMap<NodeId, Obstruction>,
}

impl ObstructionTable {
    /// All-zero totals for every node in `table`.
    pub fn zeroed(table: &NodeTable) -> Self {
        Self { totals: table.ids().map(|id| (id, Obstruction::default())).collect() }
    }

    pub fn get(&self, id: NodeId) -> Option<Obstruction> {
        self.totals.get(&id).copied()
    }

    /// Obstructed time at `id`, 0 if unknown.
    pub fn time_secs(&self, id: NodeId) -> f64 {
        self.totals.get(&id).map_or(0.0, |o| o.time_secs)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty()
    }

    /// Nodes with non-zero obstructed time, unordered.
    pub fn obstructed(&self) -> impl Iterator<Item = (NodeId, Obstruction)> + '_ {
        self.totals.iter().filter(|(_, o)| o.time_secs != 0.0).map(|(&id, &o)| (id, o))
    }

    /// Sum of obstructed time over all nodes.
    pub fn total_time_secs(&self) -> f64 {
        self.totals.values().map(|o| o.time_secs).sum()
    }

    fn add(mut self, id: NodeId, contribution: Obstruction) -> Self {
        if let Some(total) = self.totals.get_mut(&id) {
            total.distance_m += contribution.distance_m;
            total.time_secs += contribution.time_secs;
        }
        self
    }
}

/// Fold `matches` into a fresh [`ObstructionTable`] over `table`.
pub fn aggregate_obstructions(table: &NodeTable, matches: &[ObstacleMatch]) -> ObstructionTable {
    let mut used_names: FxHashSet<String> = FxHashSet::default();

    let result = matches
        .iter()
        .filter(|m| m.kind == ObstacleKind::Bridge)
        .fold(ObstructionTable::zeroed(table), |acc, m| {
            let Some(node) = table.get(m.nearest_node_id) else {
                log::warn!("obstacle {} matched unknown node {}", m.obstacle_id, m.nearest_node_id);
                return acc;
            };
            let Some(source) = m.attributes.as_ref().and_then(resolve_width) else {
                log::warn!("obstacle {} has no width from any source; skipped", m.obstacle_id);
                return acc;
            };

            if let WidthSource::Survey { name, .. } = &source {
                if !used_names.insert(name.clone()) {
                    log::debug!("obstacle {} repeats survey structure {name:?}; counted once", m.obstacle_id);
                    return acc;
                }
            }

            if node.segment_length_m <= 0.0 {
                log::debug!("obstacle {} matched zero-length segment at {}; no contribution", m.obstacle_id, node.id);
                return acc;
            }

            let width = source.width_m();
            let time_secs = match node.segment_time_secs() {
                Some(segment_time) => segment_time * (width / node.segment_length_m),
                None => {
                    log::debug!("node {} has no positive speed; obstruction time is 0", node.id);
                    0.0
                }
            };

            acc.add(node.id, Obstruction { distance_m: width, time_secs })
        });

    log::debug!(
        "aggregated {} obstacle match(es); {:.2} s obstructed in total",
        matches.len(),
        result.total_time_secs()
    );
    result
}
