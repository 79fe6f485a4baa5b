//! Reconfiguration Loss Injector.
//!
//! The cellular link reconfigures at a fixed cadence along elapsed route
//! time, independent of any bridge.  At each tick `T = k * interval`
//! (`k >= 1`, `T` strictly below the route's total elapsed time):
//!
//! 1. the vehicle is on the segment after the last node with
//!    `elapsed < T`;
//! 2. that node's speed selects a [`SpeedBucket`];
//! 3. one delay is drawn for the bucket;
//! 4. if the vehicle is still under the node's bridge obstruction
//!    (`elapsed + obstructed_time > T`) the delay is folded into the node's
//!    obstruction entry, otherwise it is added to the entry at `T`.
//!
//! The timeline starts from the per-node obstruction times, keyed by each
//! node's elapsed time.

use std::collections::BTreeMap;

use bl_core::NodeId;
use bl_obstacle::ObstructionTable;
use bl_route::NodeTable;

use crate::{DelaySampler, SpeedBucket};

/// Where a planned reconfiguration's delay is booked.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Placement {
    /// Added to the obstruction entry of the node, keyed at its elapsed time.
    FoldIntoNode { node_elapsed_secs: f64 },
    /// Added at the reconfiguration time.  A node whose elapsed time falls
    /// on the same millisecond keeps its obstruction loss.
    NewEntry,
}

/// One planned reconfiguration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ReconfigSlot {
    pub at_secs:   f64,
    pub node:      NodeId,
    pub bucket:    SpeedBucket,
    pub placement: Placement,
}

/// Plan every reconfiguration along `table`.  Pure; draws nothing.
pub fn plan_reconfigurations(
    table: &NodeTable,
    obstructions: &ObstructionTable,
    interval_secs: f64,
) -> Vec<ReconfigSlot> {
    if interval_secs.is_nan() || interval_secs <= 0.0 {
        log::warn!("reconfiguration interval {interval_secs} is not positive; no reconfigurations planned");
        return Vec::new();
    }

    let nodes = table.nodes();
    let total = table.total_elapsed_secs();

    (1u64..)
        .map(|k| k as f64 * interval_secs)
        .take_while(|&t| t < total)
        .filter_map(|t| {
            // Elapsed time is non-decreasing along the route.
            let before = nodes.partition_point(|n| n.elapsed_secs < t);
            let node = nodes.get(before.checked_sub(1)?)?;
            let obstructed = obstructions.time_secs(node.id);
            let placement = if node.elapsed_secs + obstructed > t {
                Placement::FoldIntoNode { node_elapsed_secs: node.elapsed_secs }
            } else {
                Placement::NewEntry
            };
            Some(ReconfigSlot {
                at_secs: t,
                node: node.id,
                bucket: SpeedBucket::for_speed(node.speed_kmh),
                placement,
            })
        })
        .collect()
}

/// Sparse elapsed-time → loss-seconds mapping.
///
/// Keys are whole milliseconds of elapsed route time.  Zero-loss entries are
/// kept internally (they come from unobstructed nodes) but never yielded.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LossTimeline {
    entries: BTreeMap<u64, f64>,
}

#[inline]
fn key(secs: f64) -> u64 {
    (secs * 1000.0).round() as u64
}

impl LossTimeline {
    /// Timeline holding each node's bridge-obstruction time at its elapsed
    /// time.  Nodes sharing a millisecond key are summed.
    pub fn seeded(table: &NodeTable, obstructions: &ObstructionTable) -> Self {
        let mut timeline = Self::default();
        for node in table {
            timeline.add(node.elapsed_secs, obstructions.time_secs(node.id));
        }
        timeline
    }

    fn add(&mut self, at_secs: f64, loss_secs: f64) {
        *self.entries.entry(key(at_secs)).or_insert(0.0) += loss_secs;
    }

    /// Loss at `at_secs` (to the millisecond), 0 if absent.
    pub fn get(&self, at_secs: f64) -> f64 {
        self.entries.get(&key(at_secs)).copied().unwrap_or(0.0)
    }

    /// `(timestamp_secs, loss_secs)` in ascending time order, non-zero only.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.entries
            .iter()
            .filter(|(_, loss)| **loss != 0.0)
            .map(|(&ms, &loss)| (ms as f64 / 1000.0, loss))
    }

    /// Number of non-zero entries.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn total_loss_secs(&self) -> f64 {
        self.entries.values().sum()
    }
}

/// Build the loss timeline for a route: bridge obstruction plus one sampled
/// reconfiguration delay per planned slot.
pub fn inject_reconfiguration_loss<S: DelaySampler + ?Sized>(
    table: &NodeTable,
    obstructions: &ObstructionTable,
    interval_secs: f64,
    sampler: &mut S,
) -> LossTimeline {
    let slots = plan_reconfigurations(table, obstructions, interval_secs);
    let mut timeline = LossTimeline::seeded(table, obstructions);

    let mut folded = 0usize;
    for slot in &slots {
        let delay = sampler.sample_secs(slot.bucket);
        match slot.placement {
            Placement::FoldIntoNode { node_elapsed_secs } => {
                folded += 1;
                timeline.add(node_elapsed_secs, delay);
            }
            Placement::NewEntry => timeline.add(slot.at_secs, delay),
        }
    }

    log::debug!(
        "injected {} reconfiguration(s), {folded} folded into bridge obstruction; {} timeline entries",
        slots.len(),
        timeline.len()
    );
    timeline
}
