//! Analysis configuration.
//!
//! One `AnalysisConfig` drives a whole session: the speed cap applied by the
//! reconciler, the reconfiguration cadence, the RNG seed, and the endpoints
//! used when rendering requests for the external services.

use crate::{CoreError, CoreResult};

/// Top-level analysis configuration.
///
/// Every field has a default, so a JSON file only needs to name the values
/// it overrides.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AnalysisConfig {
    /// Global speed cap in km/h applied after speed-limit substitution.
    pub max_speed_kmh: f64,

    /// Speed (km/h) at or above which the routing service is assumed to have
    /// capped the true road speed.
    pub routing_speed_ceiling_kmh: f64,

    /// Cadence of simulated network reconfigurations, in seconds of elapsed
    /// route time.
    pub reconfig_interval_secs: f64,

    /// Master RNG seed.  The same seed always produces identical timelines.
    pub seed: u64,

    /// Base URL of the routing service.
    pub routing_host: String,

    /// Routing profile (`car`, `bike`, `foot`).
    pub routing_profile: String,

    /// Server-side timeout embedded in the obstacle query, in seconds.
    pub overpass_timeout_secs: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_speed_kmh:             130.0,
            routing_speed_ceiling_kmh: 110.0,
            reconfig_interval_secs:    15.0,
            seed:                      42,
            routing_host:              "https://router.project-osrm.org".to_owned(),
            routing_profile:           "car".to_owned(),
            overpass_timeout_secs:     500,
        }
    }
}

impl AnalysisConfig {
    /// Reject values that would make the pipeline meaningless.
    pub fn validate(&self) -> CoreResult<()> {
        if self.max_speed_kmh.is_nan() || self.max_speed_kmh <= 0.0 {
            return Err(CoreError::Config(format!(
                "max_speed_kmh must be positive, got {}",
                self.max_speed_kmh
            )));
        }
        if self.reconfig_interval_secs.is_nan() || self.reconfig_interval_secs <= 0.0 {
            return Err(CoreError::Config(format!(
                "reconfig_interval_secs must be positive, got {}",
                self.reconfig_interval_secs
            )));
        }
        if self.routing_speed_ceiling_kmh.is_nan() {
            return Err(CoreError::Config("routing_speed_ceiling_kmh is NaN".to_owned()));
        }
        Ok(())
    }

    /// Load and validate a config from any JSON source.
    #[cfg(feature = "serde")]
    pub fn from_json_reader<R: std::io::Read>(reader: R) -> CoreResult<Self> {
        let config: AnalysisConfig =
            serde_json::from_reader(reader).map_err(|e| CoreError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Like [`from_json_reader`](Self::from_json_reader) but opens `path`.
    #[cfg(feature = "serde")]
    pub fn from_json_path(path: &std::path::Path) -> CoreResult<Self> {
        let file = std::fs::File::open(path)?;
        Self::from_json_reader(std::io::BufReader::new(file))
    }
}
