use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "yatr.redb".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Database file holding the languages and history tables
    #[serde(default = "default_path")]
    pub path: String,
}

impl StorageConfig {
    pub fn new() -> Self {
        let path = env::var("YATR_DB_PATH").unwrap_or_else(|_| default_path());

        Self { path }
    }

    pub fn db_path(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}
