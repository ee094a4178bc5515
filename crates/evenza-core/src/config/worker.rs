//! Background sweep worker configuration.

use serde::{Deserialize, Serialize};

/// Settings for the scheduled-announcement sweep task.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerConfig {
    /// Whether the sweep worker is enabled.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Interval in seconds between sweep ticks.
    #[serde(default = "default_sweep_interval")]
    pub sweep_interval_seconds: u64,
}

fn default_true() -> bool {
    true
}

fn default_sweep_interval() -> u64 {
    60
}
