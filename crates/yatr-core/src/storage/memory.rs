use std::sync::RwLock;

use super::{HistoryRow, LanguageRow, NewHistoryRow, Storage, StorageError, Tables};

/// Volatile storage, useful for tests and as a fallback when the database cannot be
/// opened
#[derive(Debug, Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn languages(&self) -> Result<Vec<LanguageRow>, StorageError> {
        let tables = self.tables.read().map_err(|_| StorageError::Poisoned)?;
        Ok(tables.languages.clone())
    }

    fn replace_languages(&self, rows: Vec<LanguageRow>) -> Result<(), StorageError> {
        let mut tables = self.tables.write().map_err(|_| StorageError::Poisoned)?;
        tables.languages = rows;
        Ok(())
    }

    fn insert_history(&self, row: NewHistoryRow) -> Result<HistoryRow, StorageError> {
        let mut tables = self.tables.write().map_err(|_| StorageError::Poisoned)?;
        Ok(tables.insert_history(row))
    }

    fn query_history(
        &self,
        predicate: &dyn Fn(&HistoryRow) -> bool,
    ) -> Result<Vec<HistoryRow>, StorageError> {
        let tables = self.tables.read().map_err(|_| StorageError::Poisoned)?;
        Ok(tables.query_history(predicate))
    }

    fn update_history(&self, row: &HistoryRow) -> Result<bool, StorageError> {
        let mut tables = self.tables.write().map_err(|_| StorageError::Poisoned)?;
        Ok(tables.update_history(row))
    }

    fn clear_history(&self) -> Result<usize, StorageError> {
        let mut tables = self.tables.write().map_err(|_| StorageError::Poisoned)?;
        Ok(tables.clear_history())
    }
}
