use std::sync::{Arc, Mutex};

use yatr_types::{HistoryFilter, TranslateItem};

use crate::error::{Error, Result};
use crate::storage::{HistoryRow, NewHistoryRow, Storage, StorageError};

/// Persisted log of translations with favorites
pub struct TranslationHistoryStore {
    storage: Arc<dyn Storage>,
    /// Serializes check-then-write sequences
    write_lock: Mutex<()>,
}

impl TranslationHistoryStore {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    /// True if a row equal to `item` (text, translation and codes) is stored
    pub fn exists(&self, item: &TranslateItem) -> Result<bool> {
        Ok(self.find_stored(item)?.is_some())
    }

    /// Store `item` unless an identical translation is already present.
    ///
    /// Returns the stored row, either the new one or the existing duplicate.
    pub fn add(&self, item: &TranslateItem) -> Result<TranslateItem> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;

        if let Some(existing) = self.find_stored(item)? {
            tracing::debug!("Already in history: {:?}", item.text_to_translate);
            return Ok(existing);
        }

        let row = self.storage.insert_history(NewHistoryRow::from(item))?;
        tracing::debug!("Added history row {}", row.id);

        Ok(row.into())
    }

    pub fn add_all(&self, items: &[TranslateItem]) -> Result<Vec<TranslateItem>> {
        items.iter().map(|item| self.add(item)).collect()
    }

    /// Rows produced for exactly this text and direction, oldest first
    pub fn lookup(&self, text: &str, from_code: &str, to_code: &str) -> Result<Vec<TranslateItem>> {
        let rows = self.storage.query_history(&|row: &HistoryRow| {
            row.text_to_translate == text && row.from_code == from_code && row.to_code == to_code
        })?;

        Ok(rows.into_iter().map(TranslateItem::from).collect())
    }

    /// Flip the favorite flag of a stored item
    pub fn toggle_favorite(&self, item: &TranslateItem) -> Result<TranslateItem> {
        let id = item
            .id
            .ok_or_else(|| Error::InvalidReference("item was never saved".to_string()))?;

        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;

        let mut row = self
            .storage
            .query_history(&|row: &HistoryRow| row.id == id)?
            .into_iter()
            .next()
            .ok_or_else(|| Error::InvalidReference(format!("no history row with id {id}")))?;

        row.favorite = !row.favorite;

        if !self.storage.update_history(&row)? {
            return Err(Error::InvalidReference(format!("history row {id} vanished")));
        }

        tracing::debug!("History row {} favorite: {}", id, row.favorite);

        Ok(row.into())
    }

    /// Rows whose source or translated text contains `query`
    /// (case-insensitive), newest first.
    ///
    /// An empty or missing query matches everything the filter admits.
    pub fn search(&self, query: Option<&str>, filter: HistoryFilter) -> Result<Vec<TranslateItem>> {
        let needle = query
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let mut rows = self.storage.query_history(&|row: &HistoryRow| {
            if !filter.admits(row.favorite) {
                return false;
            }

            match &needle {
                Some(needle) => {
                    row.text_to_translate.to_lowercase().contains(needle)
                        || row.translated_text.to_lowercase().contains(needle)
                }
                None => true,
            }
        })?;

        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(rows.into_iter().map(TranslateItem::from).collect())
    }

    /// Delete the whole history
    pub fn clear(&self) -> Result<usize> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::Poisoned)?;

        let removed = self.storage.clear_history()?;
        tracing::info!("Cleared {} history rows", removed);

        Ok(removed)
    }

    /// Stored row equal to `item`, if any
    fn find_stored(&self, item: &TranslateItem) -> Result<Option<TranslateItem>> {
        let text = item.text_to_translate.as_str();

        // Substring candidates, then exact comparison on the full tuple
        let candidates = self
            .storage
            .query_history(&|row: &HistoryRow| row.text_to_translate.contains(text))?;

        Ok(candidates
            .into_iter()
            .map(TranslateItem::from)
            .find(|stored| stored == item))
    }
}
