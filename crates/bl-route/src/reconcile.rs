//! Speed Reconciler.
//!
//! The routing service's graph search tops out near a fixed ceiling
//! (~110 km/h) regardless of the true road speed.  For every node at or above
//! that ceiling that has a `maxspeed` tag from the obstacle lookup, the tag
//! replaces the routed speed.  Afterwards every node is clamped to the
//! configured global maximum.
//!
//! | Tag          | Effect                                   |
//! |--------------|------------------------------------------|
//! | `none`       | unrestricted, i.e. the global maximum    |
//! | *number*     | that many km/h                           |
//! | anything else| [`RouteError::SpeedLimitParse`]          |
//!
//! An unparseable tag aborts the whole pass; the table keeps its previous
//! speeds rather than silently falling back to the routed value.

use rustc_hash::FxHashMap;

use bl_core::{AnalysisConfig, NodeId};

use crate::{NodeTable, RouteError, RouteResult};

/// A parsed `maxspeed` tag.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SpeedLimit {
    /// `maxspeed=none`: no legal limit.
    Unlimited,
    /// Numeric limit in km/h.
    Kmh(f64),
}

impl SpeedLimit {
    /// Parse a raw tag value.  Returns `None` for non-numeric values other
    /// than `none`.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("none") {
            return Some(SpeedLimit::Unlimited);
        }
        tag.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite() && *v >= 0.0)
            .map(SpeedLimit::Kmh)
    }

    /// Speed in km/h, `f64::INFINITY` for `Unlimited`.
    #[inline]
    pub fn kmh(self) -> f64 {
        match self {
            SpeedLimit::Unlimited => f64::INFINITY,
            SpeedLimit::Kmh(v) => v,
        }
    }
}

/// Raw `maxspeed` tag per route node.
///
/// When several ways supply a tag for the same node, the first one inserted
/// wins; no conflict resolution is attempted.
#[derive(Clone, Debug, Default)]
pub struct SpeedLimitTags {
    tags: FxHashMap<NodeId, String>,
}

impl SpeedLimitTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `tag` for `node` unless the node already has one.
    pub fn insert_first(&mut self, node: NodeId, tag: impl Into<String>) {
        self.tags.entry(node).or_insert_with(|| tag.into());
    }

    pub fn get(&self, node: NodeId) -> Option<&str> {
        self.tags.get(&node).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }
}

/// Reconcile every node's speed from its routed speed, `tags`, and the caps
/// in `config`.
///
/// Idempotent: the input to each pass is `route_speed_kmh`, never a
/// previously reconciled value.  On error the table is left untouched.
pub fn reconcile_speeds(
    table: &mut NodeTable,
    tags: &SpeedLimitTags,
    config: &AnalysisConfig,
) -> RouteResult<()> {
    let ceiling = config.routing_speed_ceiling_kmh;
    let max_speed = config.max_speed_kmh;
    let mut substituted = 0usize;

    let speeds = table
        .iter()
        .map(|node| {
            let mut speed = node.route_speed_kmh;
            if speed >= ceiling {
                if let Some(tag) = tags.get(node.id) {
                    let limit = SpeedLimit::parse(tag).ok_or_else(|| {
                        log::error!("node {}: speed limit tag {tag:?} is not numeric", node.id);
                        RouteError::SpeedLimitParse { node: node.id, tag: tag.to_owned() }
                    })?;
                    speed = limit.kmh();
                    substituted += 1;
                }
            }
            Ok(speed.min(max_speed))
        })
        .collect::<RouteResult<Vec<f64>>>()?;

    table.set_speeds(speeds);
    log::debug!(
        "reconciled speeds: {substituted} node(s) took their speed limit, cap {max_speed} km/h"
    );
    Ok(())
}
