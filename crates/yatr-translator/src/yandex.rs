use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use yatr_config::translator::TranslatorConfig;

use crate::{ProviderMetadata, TranslateError, TranslationApi};

const SUPPORTED_LANGUAGES_PATH: &str = "getLangs";
const TRANSLATE_PATH: &str = "translate";

#[derive(Clone)]
pub struct YandexTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    ui_lang: String,
}

impl YandexTranslator {
    pub fn from_config(config: &TranslatorConfig) -> Result<Self, TranslateError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            api_url: config.api_url.clone(),
            ui_lang: config.ui_lang.clone(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_url.trim_end_matches('/'), path)
    }

    async fn get(&self, path: &str, params: &[(&str, &str)]) -> Result<String, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        let url = self.endpoint(path);
        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status {} for {}", status, url);

        match status {
            StatusCode::TOO_MANY_REQUESTS => return Err(TranslateError::RateLimitExceeded),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(TranslateError::AuthenticationError);
            }
            s if !s.is_success() => return Err(TranslateError::HttpStatus(s.as_u16())),
            _ => {}
        }

        Ok(response.text().await?)
    }
}

#[async_trait]
impl TranslationApi for YandexTranslator {
    async fn supported_languages(&self) -> Result<String, TranslateError> {
        self.get(SUPPORTED_LANGUAGES_PATH, &[("ui", self.ui_lang.as_str())])
            .await
    }

    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String, TranslateError> {
        let direction = format!("{from}-{to}");

        self.get(TRANSLATE_PATH, &[("text", text), ("lang", direction.as_str())])
            .await
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Yandex.Translate".to_string(),
            requires_api_key: true,
            free_tier_available: true,
        }
    }
}
