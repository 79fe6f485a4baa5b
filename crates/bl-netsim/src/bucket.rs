//! Speed classes for the empirical delay dataset.

use std::fmt;
use std::str::FromStr;

use crate::NetsimError;

/// A speed class, named by its exclusive upper bound in km/h.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpeedBucket {
    Below70,
    Below90,
    Below110,
    Below130,
    Unbounded,
}

impl SpeedBucket {
    /// All buckets in ascending order.
    pub const ALL: [SpeedBucket; 5] = [
        SpeedBucket::Below70,
        SpeedBucket::Below90,
        SpeedBucket::Below110,
        SpeedBucket::Below130,
        SpeedBucket::Unbounded,
    ];

    /// First bucket whose upper bound strictly exceeds `speed_kmh`.
    pub fn for_speed(speed_kmh: f64) -> Self {
        Self::ALL
            .into_iter()
            .find(|b| b.upper_kmh().is_some_and(|upper| speed_kmh < upper))
            .unwrap_or(SpeedBucket::Unbounded)
    }

    /// Exclusive upper bound, `None` for [`Unbounded`](Self::Unbounded).
    pub fn upper_kmh(self) -> Option<f64> {
        match self {
            SpeedBucket::Below70 => Some(70.0),
            SpeedBucket::Below90 => Some(90.0),
            SpeedBucket::Below110 => Some(110.0),
            SpeedBucket::Below130 => Some(130.0),
            SpeedBucket::Unbounded => None,
        }
    }

    /// Dense index, `0..5`.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Label used in the delay dataset.
    pub fn label(self) -> &'static str {
        match self {
            SpeedBucket::Below70 => "70",
            SpeedBucket::Below90 => "90",
            SpeedBucket::Below110 => "110",
            SpeedBucket::Below130 => "130",
            SpeedBucket::Unbounded => "unbounded",
        }
    }
}

impl fmt::Display for SpeedBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SpeedBucket {
    type Err = NetsimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|b| b.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| NetsimError::Parse(format!("unknown speed bucket {s:?}")))
    }
}
