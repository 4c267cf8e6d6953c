use std::sync::Arc;

use yatr_translator::{TranslateError, TranslateResponse, TranslationApi};
use yatr_types::{LangPair, TranslateItem};

use crate::error::{Error, Result};
use crate::history::TranslationHistoryStore;

/// Where a resolution was answered from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Cached,
    Remote,
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub items: Vec<TranslateItem>,
    pub source: ResolutionSource,
}

impl Resolution {
    pub fn is_cached(&self) -> bool {
        self.source == ResolutionSource::Cached
    }
}

/// Cache-first translation: history is consulted before the remote API and
/// every remote answer is written back to history.
pub struct TranslateResolver {
    api: Arc<dyn TranslationApi>,
    history: Arc<TranslationHistoryStore>,
}

impl TranslateResolver {
    pub fn new(api: Arc<dyn TranslationApi>, history: Arc<TranslationHistoryStore>) -> Self {
        Self { api, history }
    }

    pub fn history(&self) -> &TranslationHistoryStore {
        &self.history
    }

    pub async fn resolve(&self, text: &str, pair: &LangPair) -> Result<Resolution> {
        if text.trim().is_empty() {
            return Err(Error::InvalidRequest("nothing to translate".to_string()));
        }
        if !pair.is_valid() {
            return Err(Error::InvalidRequest(format!(
                "invalid language pair {:?}",
                pair.direction()
            )));
        }

        match self.history.lookup(text, pair.from_code(), pair.to_code()) {
            Ok(items) if !items.is_empty() => {
                tracing::debug!("Cache hit for {} ({})", text, pair.direction());
                return Ok(Resolution {
                    items,
                    source: ResolutionSource::Cached,
                });
            }
            Ok(_) => tracing::debug!("Cache miss for {} ({})", text, pair.direction()),
            Err(e) => tracing::warn!("History lookup failed, asking remote: {e}"),
        }

        let raw = self
            .api
            .translate(text, pair.from_code(), pair.to_code())
            .await?;

        let response = TranslateResponse::parse(&raw)?;
        if !response.is_success() {
            return Err(Error::RemoteUnavailable(TranslateError::ApiError(format!(
                "service returned code {}",
                response.code
            ))));
        }

        let candidates = response.into_items(text, pair);
        if candidates.is_empty() {
            tracing::warn!("Remote returned no translation for {}", pair.direction());
        }

        let items = self.history.add_all(&candidates)?;

        Ok(Resolution {
            items,
            source: ResolutionSource::Remote,
        })
    }
}
