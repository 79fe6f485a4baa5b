//! Network Metric Derivation.
//!
//! Linear fits from a drive-test calibration, mapping seconds of bridge
//! obstruction to link impairment.  The literals must stay exactly as they
//! are so results match earlier analysis runs.

use rustc_hash::FxHashMap;

use bl_core::NodeId;
use bl_obstacle::ObstructionTable;

pub const BURST_LENGTH_SLOPE: f64 = 56.52436265101327;
pub const BURST_LENGTH_INTERCEPT: f64 = 1.7883695471513976;
pub const MAX_RTT_SLOPE: f64 = 328.81459346950214;
pub const MAX_RTT_INTERCEPT: f64 = 222.29597475535095;
pub const PKTS_TO_RTT_NORM_SLOPE: f64 = 0.08430682594537886;
pub const PKTS_TO_RTT_NORM_INTERCEPT: f64 = -8.401958514887447;

/// Impairment estimates for one obstructed node.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NetworkMetrics {
    pub burst_length:     f64,
    /// Milliseconds.
    pub max_rtt:          f64,
    pub pkts_to_rtt_norm: f64,
}

impl NetworkMetrics {
    pub fn from_obstruction_time(t_secs: f64) -> Self {
        let burst_length = t_secs * BURST_LENGTH_SLOPE + BURST_LENGTH_INTERCEPT;
        let max_rtt = t_secs * MAX_RTT_SLOPE + MAX_RTT_INTERCEPT;
        let pkts_to_rtt_norm = max_rtt * PKTS_TO_RTT_NORM_SLOPE + PKTS_TO_RTT_NORM_INTERCEPT;
        Self { burst_length, max_rtt, pkts_to_rtt_norm }
    }
}

/// Metrics for every node with non-zero obstruction time.
pub fn derive_metrics(obstructions: &ObstructionTable) -> FxHashMap<NodeId, NetworkMetrics> {
    obstructions
        .obstructed()
        .map(|(id, o)| (id, NetworkMetrics::from_obstruction_time(o.time_secs)))
        .collect()
}
