use std::sync::Arc;

use yatr_types::LangPair;

use crate::storage::{LanguageRow, Storage, StorageError};

/// Last fetched list of supported language pairs
#[derive(Clone)]
pub struct LanguageCache {
    storage: Arc<dyn Storage>,
}

impl LanguageCache {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// Replace the stored list with `pairs` in one step
    pub fn refresh(&self, pairs: &[LangPair]) -> Result<(), StorageError> {
        if pairs.is_empty() {
            tracing::warn!("Refreshing with an empty language list, cache will be cleared");
        }

        let rows: Vec<LanguageRow> = pairs.iter().map(LanguageRow::from).collect();
        self.storage.replace_languages(rows)?;

        tracing::info!("Language cache refreshed with {} pairs", pairs.len());
        Ok(())
    }

    /// Every stored pair, empty if never populated
    pub fn load(&self) -> Result<Vec<LangPair>, StorageError> {
        let rows = self.storage.languages()?;
        Ok(rows.into_iter().map(LangPair::from).collect())
    }

    pub fn is_empty(&self) -> Result<bool, StorageError> {
        Ok(self.storage.languages()?.is_empty())
    }
}
