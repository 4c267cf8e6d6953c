use std::env;

use serde::{Deserialize, Serialize};

use crate::env_or;

fn default_api_url() -> String {
    "https://translate.yandex.net/api/v1.5/tr.json".to_string()
}

fn default_ui_lang() -> String {
    "en".to_string()
}

fn default_timeout_seconds() -> u64 {
    15
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Language the remote uses for language display names
    #[serde(default = "default_ui_lang")]
    pub ui_lang: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl TranslatorConfig {
    pub fn new() -> Self {
        let defaults = Self::default();

        Self {
            api_key: env::var("YATR_API_KEY").unwrap_or(defaults.api_key),
            api_url: env::var("YATR_API_URL").unwrap_or(defaults.api_url),
            ui_lang: env::var("YATR_UI_LANG").unwrap_or(defaults.ui_lang),
            timeout_seconds: env_or("YATR_TIMEOUT_SECONDS", defaults.timeout_seconds),
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            ui_lang: default_ui_lang(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
