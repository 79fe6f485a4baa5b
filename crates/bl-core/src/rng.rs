//! Seeded, reproducible RNG for the stochastic parts of the analysis.
//!
//! Only the reconfiguration-loss overlay draws random numbers.  Wrapping the
//! generator here keeps the `rand` version pinned in one place and makes
//! every run reproducible from `AnalysisConfig::seed`.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// Analysis-level RNG.  Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Choose a uniformly random element from a slice.
    /// Returns `None` if the slice is empty.
    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
