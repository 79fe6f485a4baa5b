//! Delay sources for the loss injector.

use bl_core::SimRng;

use crate::{ReconfigDataset, SpeedBucket};

const NANOS_PER_SEC: f64 = 1_000_000_000.0;

/// Source of reconfiguration delays.
///
/// The injector calls [`sample_secs`](Self::sample_secs) once per planned
/// reconfiguration, in ascending time order.
pub trait DelaySampler {
    /// One delay in seconds for a vehicle travelling in `bucket`.
    fn sample_secs(&mut self, bucket: SpeedBucket) -> f64;
}

/// Uniform draw from the empirical dataset, reproducible from the seed.
pub struct EmpiricalSampler {
    dataset: ReconfigDataset,
    rng:     SimRng,
}

impl EmpiricalSampler {
    pub fn new(dataset: ReconfigDataset, rng: SimRng) -> Self {
        Self { dataset, rng }
    }

    pub fn dataset(&self) -> &ReconfigDataset {
        &self.dataset
    }
}

impl DelaySampler for EmpiricalSampler {
    fn sample_secs(&mut self, bucket: SpeedBucket) -> f64 {
        match self.rng.choose(self.dataset.samples(bucket)) {
            Some(&ns) => ns as f64 / NANOS_PER_SEC,
            None => {
                log::warn!("no delay samples for bucket {bucket}; reconfiguration adds no loss");
                0.0
            }
        }
    }
}

/// Replays a fixed list of delays (seconds), cycling when exhausted, and
/// records which bucket each draw was made for.
#[derive(Clone, Debug, Default)]
pub struct SequenceSampler {
    delays:    Vec<f64>,
    next:      usize,
    requested: Vec<SpeedBucket>,
}

impl SequenceSampler {
    pub fn new(delays: Vec<f64>) -> Self {
        Self { delays, next: 0, requested: Vec::new() }
    }

    /// Buckets requested so far, in call order.
    pub fn requested(&self) -> &[SpeedBucket] {
        &self.requested
    }
}

impl DelaySampler for SequenceSampler {
    fn sample_secs(&mut self, bucket: SpeedBucket) -> f64 {
        self.requested.push(bucket);
        if self.delays.is_empty() {
            return 0.0;
        }
        let delay = self.delays[self.next % self.delays.len()];
        self.next += 1;
        delay
    }
}
