//! Engine configuration models.
//!
//! Every field defaults so that an absent config file yields a working
//! engine pointed at the standard deployment buckets.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Global engine configuration, loaded from `rfx.toml`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(default)]
pub struct EngineConfig {
    /// Object-store region.
    pub region: String,

    /// Bucket the user's submitted documents are uploaded to.
    pub input_bucket: String,

    /// Bucket the pipeline writes artifacts to; all fetches read from here.
    pub output_bucket: String,

    /// Lifetime of lazily minted download links, in seconds.
    pub signed_url_ttl_secs: u64,

    pub progress: ProgressConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            region: "us-east-1".to_string(),
            input_bucket: "presales-rfp-inputs".to_string(),
            output_bucket: "presales-rfp-outputs".to_string(),
            signed_url_ttl_secs: 900,
            progress: ProgressConfig::default(),
        }
    }
}

/// Tuning for the simulated progress indicator.
///
/// The simulation starts at `floor` and each tick advances by
/// `approach_factor` of the remaining distance to `ceiling`, so it slows
/// as it climbs and never reaches 100 on its own.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, TS)]
#[serde(default)]
pub struct ProgressConfig {
    /// Starting percentage.
    pub floor: f64,

    /// Asymptotic upper bound, strictly below 100.
    pub ceiling: f64,

    /// Tick cadence in milliseconds.
    pub tick_ms: u64,

    /// Fraction of the remaining distance consumed per tick, in (0, 1).
    pub approach_factor: f64,
}

impl Default for ProgressConfig {
    fn default() -> Self {
        Self {
            floor: 5.0,
            ceiling: 95.0,
            tick_ms: 400,
            approach_factor: 0.08,
        }
    }
}
