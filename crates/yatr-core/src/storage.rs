//! Row store behind the language cache and the translation history.
//!
//! Two logical tables: `languages` and `history`. Backends must make
//! [`Storage::replace_languages`] atomic with respect to readers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use yatr_types::{LangPair, TranslateItem};

pub mod database;
pub mod memory;

pub use database::RedbStorage;
pub use memory::MemoryStorage;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] redb::Error),

    #[error("Storage lock poisoned")]
    Poisoned,
}

macro_rules! impl_from_redb {
    ($($err:ty),* $(,)?) => {
        $(
            impl From<$err> for StorageError {
                fn from(e: $err) -> Self {
                    StorageError::Database(e.into())
                }
            }
        )*
    };
}

impl_from_redb!(
    redb::DatabaseError,
    redb::TransactionError,
    redb::TableError,
    redb::StorageError,
    redb::CommitError,
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageRow {
    pub from_code: String,
    pub to_code: String,
    pub from_name: String,
    pub to_name: String,
}

/// History row before the store assigned its id and timestamp
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewHistoryRow {
    pub text_to_translate: String,
    pub translated_text: String,
    pub from_code: String,
    pub to_code: String,
    pub favorite: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRow {
    pub id: i64,
    pub text_to_translate: String,
    pub translated_text: String,
    pub from_code: String,
    pub to_code: String,
    pub favorite: bool,
    pub created_at: DateTime<Utc>,
}

pub trait Storage: Send + Sync {
    /// All language rows, in insertion order
    fn languages(&self) -> Result<Vec<LanguageRow>, StorageError>;

    /// Delete every language row and insert `rows` as one atomic step
    fn replace_languages(&self, rows: Vec<LanguageRow>) -> Result<(), StorageError>;

    /// Insert a row, assigning an increasing id and the insertion time
    fn insert_history(&self, row: NewHistoryRow) -> Result<HistoryRow, StorageError>;

    /// Rows matching `predicate`, in insertion order
    fn query_history(
        &self,
        predicate: &dyn Fn(&HistoryRow) -> bool,
    ) -> Result<Vec<HistoryRow>, StorageError>;

    /// Overwrite the row with the same id. Returns false if no such row.
    fn update_history(&self, row: &HistoryRow) -> Result<bool, StorageError>;

    /// Delete every history row, returning how many were removed
    fn clear_history(&self) -> Result<usize, StorageError>;
}

impl NewHistoryRow {
    /// Stamp the row with its id. `created_at` never goes below the previous
    /// row's, even if the wall clock steps back.
    pub(crate) fn into_row(self, id: i64, previous: Option<&HistoryRow>) -> HistoryRow {
        let now = Utc::now();
        let created_at = match previous {
            Some(last) if last.created_at > now => last.created_at,
            _ => now,
        };

        HistoryRow {
            id,
            text_to_translate: self.text_to_translate,
            translated_text: self.translated_text,
            from_code: self.from_code,
            to_code: self.to_code,
            favorite: self.favorite,
            created_at,
        }
    }
}

/// In-memory tables behind [`MemoryStorage`]
#[derive(Debug, Clone, Default)]
pub(crate) struct Tables {
    pub languages: Vec<LanguageRow>,
    pub history: Vec<HistoryRow>,
    pub last_id: i64,
}

impl Tables {
    pub fn insert_history(&mut self, row: NewHistoryRow) -> HistoryRow {
        self.last_id += 1;

        let row = row.into_row(self.last_id, self.history.last());
        self.history.push(row.clone());

        row
    }

    pub fn query_history(&self, predicate: &dyn Fn(&HistoryRow) -> bool) -> Vec<HistoryRow> {
        self.history
            .iter()
            .filter(|row| predicate(row))
            .cloned()
            .collect()
    }

    pub fn update_history(&mut self, row: &HistoryRow) -> bool {
        match self.history.iter_mut().find(|r| r.id == row.id) {
            Some(existing) => {
                *existing = row.clone();
                true
            }
            None => false,
        }
    }

    pub fn clear_history(&mut self) -> usize {
        let removed = self.history.len();
        self.history.clear();
        removed
    }
}

impl From<&LangPair> for LanguageRow {
    fn from(pair: &LangPair) -> Self {
        Self {
            from_code: pair.from_code().to_string(),
            to_code: pair.to_code().to_string(),
            from_name: pair.from_name().to_string(),
            to_name: pair.to_name().to_string(),
        }
    }
}

impl From<LanguageRow> for LangPair {
    fn from(row: LanguageRow) -> Self {
        LangPair::new(row.from_code, row.to_code, row.from_name, row.to_name)
    }
}

impl From<&TranslateItem> for NewHistoryRow {
    fn from(item: &TranslateItem) -> Self {
        Self {
            text_to_translate: item.text_to_translate.clone(),
            translated_text: item.translated_text.clone(),
            from_code: item.lang_pair.from_code().to_string(),
            to_code: item.lang_pair.to_code().to_string(),
            favorite: item.is_favorite,
        }
    }
}

impl From<HistoryRow> for TranslateItem {
    fn from(row: HistoryRow) -> Self {
        TranslateItem {
            id: Some(row.id),
            is_favorite: row.favorite,
            text_to_translate: row.text_to_translate,
            translated_text: row.translated_text,
            lang_pair: LangPair::from_codes(row.from_code, row.to_code),
            created_at: Some(row.created_at),
        }
    }
}
