use std::sync::Arc;

use yatr_translator::{TranslationApi, parse_languages};
use yatr_types::LangPair;

use crate::cache::LanguageCache;
use crate::error::Result;
use crate::language::LanguageGraph;

/// Supported languages, cached locally and fetched on demand
pub struct LanguageService {
    api: Arc<dyn TranslationApi>,
    cache: LanguageCache,
}

impl LanguageService {
    pub fn new(api: Arc<dyn TranslationApi>, cache: LanguageCache) -> Self {
        Self { api, cache }
    }

    pub fn cache(&self) -> &LanguageCache {
        &self.cache
    }

    /// Graph from the cached list, fetching it first if the cache is empty
    /// or unreadable
    pub async fn graph(&self) -> Result<LanguageGraph> {
        let pairs = match self.cache.load() {
            Ok(pairs) if !pairs.is_empty() => pairs,
            Ok(_) => {
                tracing::info!("Language cache empty, fetching from remote");
                self.sync().await?
            }
            Err(e) => {
                tracing::warn!("Language cache unavailable, fetching from remote: {e}");
                let pairs = self.fetch().await?;
                if let Err(e) = self.cache.refresh(&pairs) {
                    tracing::warn!("Could not store fetched languages: {e}");
                }
                pairs
            }
        };

        Ok(LanguageGraph::build(&pairs))
    }

    /// Fetch the language list and replace the cached one
    pub async fn sync(&self) -> Result<Vec<LangPair>> {
        let pairs = self.fetch().await?;
        self.cache.refresh(&pairs)?;

        Ok(pairs)
    }

    async fn fetch(&self) -> Result<Vec<LangPair>> {
        let raw = self.api.supported_languages().await?;
        let pairs = parse_languages(&raw)?;
        tracing::info!("Fetched {} language pairs", pairs.len());

        Ok(pairs)
    }
}
