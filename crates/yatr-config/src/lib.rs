use std::env;

use serde::{Deserialize, Serialize};

use self::storage::StorageConfig;
use self::sync::SyncConfig;
use self::translator::TranslatorConfig;

pub mod storage;
pub mod sync;
pub mod translator;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub storage: StorageConfig,
    pub sync: SyncConfig,
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        Config {
            translator: TranslatorConfig::new(),
            storage: StorageConfig::new(),
            sync: SyncConfig::new(),
        }
    }
}

/// Read and parse an env var, falling back when it is unset or malformed
pub(crate) fn env_or<T: std::str::FromStr>(key: &str, fallback: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(fallback)
}
