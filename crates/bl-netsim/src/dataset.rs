//! Empirical reconfiguration-delay dataset.
//!
//! # CSV format
//!
//! One row per measured reconfiguration.  Durations are nanoseconds.
//!
//! ```csv
//! speed_bucket,duration_ns
//! 70,48000000
//! 70,51500000
//! 110,62000000
//! unbounded,90500000
//! ```
//!
//! `speed_bucket` is one of `70`, `90`, `110`, `130`, `unbounded`.  Buckets
//! without rows are allowed; sampling from them yields no delay.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use crate::{NetsimError, NetsimResult, SpeedBucket};

#[derive(Deserialize)]
struct DelayRecord {
    speed_bucket: String,
    duration_ns:  u64,
}

/// Measured reconfiguration durations, grouped by speed bucket.
#[derive(Clone, Debug, Default)]
pub struct ReconfigDataset {
    samples: [Vec<u64>; 5],
}

impl ReconfigDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the dataset from a CSV file.
    pub fn load_path(path: &Path) -> NetsimResult<Self> {
        let file = std::fs::File::open(path).map_err(NetsimError::Io)?;
        Self::load_reader(file)
    }

    /// Like [`load_path`](Self::load_path) but accepts any `Read` source.
    pub fn load_reader<R: Read>(reader: R) -> NetsimResult<Self> {
        let mut csv_reader = csv::Reader::from_reader(reader);
        let mut dataset = Self::new();

        for result in csv_reader.deserialize::<DelayRecord>() {
            let row = result.map_err(|e| NetsimError::Parse(e.to_string()))?;
            let bucket: SpeedBucket = row.speed_bucket.parse()?;
            dataset.push(bucket, row.duration_ns);
        }

        for bucket in SpeedBucket::ALL {
            let n = dataset.samples(bucket).len();
            if n == 0 {
                log::warn!("delay dataset has no samples for bucket {bucket}");
            } else {
                log::debug!("delay dataset: {n} sample(s) for bucket {bucket}");
            }
        }
        Ok(dataset)
    }

    pub fn push(&mut self, bucket: SpeedBucket, duration_ns: u64) {
        self.samples[bucket.index()].push(duration_ns);
    }

    /// Durations (ns) recorded for `bucket`.
    pub fn samples(&self, bucket: SpeedBucket) -> &[u64] {
        &self.samples[bucket.index()]
    }

    pub fn len(&self) -> usize {
        self.samples.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.iter().all(Vec::is_empty)
    }
}
