//! `bl-netsim` — network impairment layered on top of bridge obstruction.
//!
//! | Module        | Contents                                                 |
//! |---------------|----------------------------------------------------------|
//! | [`bucket`]    | `SpeedBucket` (upper-bound speed classes)                |
//! | [`dataset`]   | `ReconfigDataset`, CSV loader for empirical delays       |
//! | [`sampler`]   | `DelaySampler` trait, `EmpiricalSampler`, `SequenceSampler` |
//! | [`inject`]    | `plan_reconfigurations`, `inject_reconfiguration_loss`, `LossTimeline` |
//! | [`metrics`]   | `NetworkMetrics`, `derive_metrics`                       |
//! | [`error`]     | `NetsimError`, `NetsimResult<T>`                         |
//!
//! Injection is split in two: [`plan_reconfigurations`] decides *where* each
//! periodic reconfiguration lands (pure, deterministic), and
//! [`inject_reconfiguration_loss`] draws one delay per planned slot from a
//! [`DelaySampler`].  Tests substitute a [`SequenceSampler`] for the seeded
//! [`EmpiricalSampler`].

pub mod bucket;
pub mod dataset;
pub mod error;
pub mod inject;
pub mod metrics;
pub mod sampler;


pub use bucket::SpeedBucket;
pub use dataset::ReconfigDataset;
pub use error::{NetsimError, NetsimResult};
pub use inject::{LossTimeline, Placement, ReconfigSlot, inject_reconfiguration_loss, plan_reconfigurations};
pub use metrics::{NetworkMetrics, derive_metrics};
pub use sampler::{DelaySampler, EmpiricalSampler, SequenceSampler};
