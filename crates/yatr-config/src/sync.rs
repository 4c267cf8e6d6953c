use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::env_or;

/// Upper bound for the sync interval, one year
const MAX_INTERVAL_HOURS: u64 = 24 * 365;

fn default_enabled() -> bool {
    true
}

fn default_interval_hours() -> u64 {
    24 * 7
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SyncConfig {
    /// Periodically refresh the supported language list
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_interval_hours")]
    pub interval_hours: u64,
}

impl SyncConfig {
    pub fn new() -> Self {
        Self {
            enabled: env_or("YATR_SYNC_ENABLED", default_enabled()),
            interval_hours: env_or("YATR_SYNC_INTERVAL_HOURS", default_interval_hours()),
        }
    }

    pub fn interval(&self) -> Duration {
        // zero would make tokio's interval panic
        let hours = self.interval_hours.clamp(1, MAX_INTERVAL_HOURS);
        Duration::from_secs(hours * 60 * 60)
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval_hours: default_interval_hours(),
        }
    }
}
