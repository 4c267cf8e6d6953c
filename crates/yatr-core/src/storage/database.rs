use std::fs;
use std::path::{Path, PathBuf};

use redb::{Database, ReadableTable, ReadableTableMetadata, TableDefinition, WriteTransaction};

use super::{HistoryRow, LanguageRow, NewHistoryRow, Storage, StorageError};

/// Key: position in the fetched list, Value: serialized LanguageRow
const LANGUAGES_TABLE: TableDefinition<u64, &str> = TableDefinition::new("languages");

/// Key: row id, Value: serialized HistoryRow
const HISTORY_TABLE: TableDefinition<i64, &str> = TableDefinition::new("history");

/// Counters that must survive deleting every row
const META_TABLE: TableDefinition<&str, i64> = TableDefinition::new("meta");

const LAST_HISTORY_ID: &str = "last_history_id";

/// Storage in a redb database file.
///
/// Every trait call is one transaction, so readers see either the state
/// before a write or after it.
pub struct RedbStorage {
    path: PathBuf,
    db: Database,
}

impl RedbStorage {
    /// Open or create the database at `path`
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let db = Database::create(&path)?;

        // Create the tables so read transactions can always open them
        let txn = db.begin_write()?;
        {
            let _languages = txn.open_table(LANGUAGES_TABLE)?;
            let _history = txn.open_table(HISTORY_TABLE)?;
            let _meta = txn.open_table(META_TABLE)?;
        }
        txn.commit()?;

        {
            let txn = db.begin_read()?;
            tracing::info!(
                "Opened {} ({} languages, {} history rows)",
                path.display(),
                txn.open_table(LANGUAGES_TABLE)?.len()?,
                txn.open_table(HISTORY_TABLE)?.len()?
            );
        }

        Ok(Self { path, db })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Run `f` in a write transaction, committing only if it succeeds
    fn write<R>(
        &self,
        f: impl FnOnce(&WriteTransaction) -> Result<R, StorageError>,
    ) -> Result<R, StorageError> {
        let txn = self.db.begin_write()?;
        let result = f(&txn)?;
        txn.commit()?;

        Ok(result)
    }
}

impl Storage for RedbStorage {
    fn languages(&self) -> Result<Vec<LanguageRow>, StorageError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(LANGUAGES_TABLE)?;

        let mut rows: Vec<LanguageRow> = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            rows.push(serde_json::from_str(value.value())?);
        }

        Ok(rows)
    }

    fn replace_languages(&self, rows: Vec<LanguageRow>) -> Result<(), StorageError> {
        self.write(|txn| {
            let mut table = txn.open_table(LANGUAGES_TABLE)?;

            let mut keys = Vec::new();
            for entry in table.iter()? {
                let (key, _) = entry?;
                keys.push(key.value());
            }
            for key in keys {
                table.remove(key)?;
            }

            for (position, row) in (0u64..).zip(&rows) {
                let serialized = serde_json::to_string(row)?;
                table.insert(position, serialized.as_str())?;
            }

            Ok(())
        })
    }

    fn insert_history(&self, row: NewHistoryRow) -> Result<HistoryRow, StorageError> {
        self.write(|txn| {
            let mut history = txn.open_table(HISTORY_TABLE)?;
            let mut meta = txn.open_table(META_TABLE)?;

            let previous: Option<HistoryRow> = match history.last()? {
                Some((_, value)) => Some(serde_json::from_str(value.value())?),
                None => None,
            };

            // Never hand out an id twice, even after a clear or when the
            // counter is missing
            let counter = meta.get(LAST_HISTORY_ID)?.map(|v| v.value()).unwrap_or(0);
            let last_key = previous.as_ref().map(|r| r.id).unwrap_or(0);
            let id = counter.max(last_key) + 1;

            let row = row.into_row(id, previous.as_ref());
            let serialized = serde_json::to_string(&row)?;
            history.insert(id, serialized.as_str())?;
            meta.insert(LAST_HISTORY_ID, id)?;

            Ok(row)
        })
    }

    fn query_history(
        &self,
        predicate: &dyn Fn(&HistoryRow) -> bool,
    ) -> Result<Vec<HistoryRow>, StorageError> {
        let txn = self.db.begin_read()?;
        let table = txn.open_table(HISTORY_TABLE)?;

        let mut rows = Vec::new();
        for entry in table.iter()? {
            let (_, value) = entry?;
            let row: HistoryRow = serde_json::from_str(value.value())?;
            if predicate(&row) {
                rows.push(row);
            }
        }

        Ok(rows)
    }

    fn update_history(&self, row: &HistoryRow) -> Result<bool, StorageError> {
        self.write(|txn| {
            let mut table = txn.open_table(HISTORY_TABLE)?;

            if table.get(row.id)?.is_none() {
                return Ok(false);
            }

            let serialized = serde_json::to_string(row)?;
            table.insert(row.id, serialized.as_str())?;

            Ok(true)
        })
    }

    fn clear_history(&self) -> Result<usize, StorageError> {
        self.write(|txn| {
            let mut table = txn.open_table(HISTORY_TABLE)?;

            let mut keys = Vec::new();
            for entry in table.iter()? {
                let (key, _) = entry?;
                keys.push(key.value());
            }
            for key in &keys {
                table.remove(*key)?;
            }

            Ok(keys.len())
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn language(from: &str, to: &str) -> LanguageRow {
        LanguageRow {
            from_code: from.to_string(),
            to_code: to.to_string(),
            from_name: from.to_string(),
            to_name: to.to_string(),
        }
    }

    fn new_row(text: &str) -> NewHistoryRow {
        NewHistoryRow {
            text_to_translate: text.to_string(),
            translated_text: text.chars().rev().collect(),
            from_code: "en".to_string(),
            to_code: "ru".to_string(),
            favorite: false,
        }
    }

    #[test]
    fn test_reopen_keeps_data() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("yatr.redb");

        {
            let storage = RedbStorage::open(&path).unwrap();
            storage.replace_languages(vec![language("en", "ru")]).unwrap();
            storage.insert_history(new_row("hello")).unwrap();
            storage.insert_history(new_row("world")).unwrap();
        }

        let storage = RedbStorage::open(&path).unwrap();
        assert_eq!(storage.languages().unwrap(), vec![language("en", "ru")]);

        let rows = storage.query_history(&|_| true).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].text_to_translate, "hello");

        // ids keep increasing across reopen
        let next = storage.insert_history(new_row("again")).unwrap();
        assert_eq!(next.id, 3);
    }

    #[test]
    fn test_replace_keeps_fetched_order() {
        let dir = tempfile::tempdir().unwrap();
        let storage = RedbStorage::open(dir.path().join("yatr.redb")).unwrap();

        storage
            .replace_languages(vec![language("en", "ru"), language("ru", "en"), language("en", "fr")])
            .unwrap();
        storage
            .replace_languages(vec![language("fr", "en"), language("de", "en")])
            .unwrap();

        assert_eq!(
            storage.languages().unwrap(),
            vec![language("fr", "en"), language("de", "en")]
        );
    }

    #[test]
    fn test_ids_not_reused_after_clear() {
        let dir = tempfile::tempdir().unwrap();
        let storage = RedbStorage::open(dir.path().join("yatr.redb")).unwrap();
        storage.insert_history(new_row("a")).unwrap();
        storage.insert_history(new_row("b")).unwrap();

        assert_eq!(storage.clear_history().unwrap(), 2);
        let next = storage.insert_history(new_row("c")).unwrap();

        assert_eq!(next.id, 3);
        assert_eq!(storage.query_history(&|_| true).unwrap(), vec![next]);
    }

    #[test]
    fn test_next_id_follows_stored_rows_without_counter() {
        let dir = tempfile::tempdir().unwrap();
        let storage = RedbStorage::open(dir.path().join("yatr.redb")).unwrap();

        // Rows written without the id counter
        storage
            .write(|txn| {
                let mut table = txn.open_table(HISTORY_TABLE)?;
                for id in [4, 7] {
                    let row = new_row("old").into_row(id, None);
                    table.insert(id, serde_json::to_string(&row)?.as_str())?;
                }
                Ok(())
            })
            .unwrap();

        let next = storage.insert_history(new_row("new")).unwrap();

        assert_eq!(next.id, 8);
        let mut favorite = next.clone();
        favorite.favorite = true;
        assert!(storage.update_history(&favorite).unwrap());
        let favorites = storage.query_history(&|r| r.favorite).unwrap();
        assert_eq!(favorites, vec![favorite]);
    }

    #[test]
    fn test_created_at_never_goes_back() {
        let dir = tempfile::tempdir().unwrap();
        let storage = RedbStorage::open(dir.path().join("yatr.redb")).unwrap();
        let future = Utc::now() + chrono::Duration::hours(1);

        storage
            .write(|txn| {
                let mut table = txn.open_table(HISTORY_TABLE)?;
                let mut row = new_row("skewed").into_row(1, None);
                row.created_at = future;
                table.insert(1, serde_json::to_string(&row)?.as_str())?;
                Ok(())
            })
            .unwrap();

        let next = storage.insert_history(new_row("later")).unwrap();

        assert_eq!(next.created_at, future);
    }

    #[test]
    fn test_failed_transaction_keeps_previous_state() {
        let dir = tempfile::tempdir().unwrap();
        let storage = RedbStorage::open(dir.path().join("yatr.redb")).unwrap();
        storage.replace_languages(vec![language("en", "ru")]).unwrap();

        let result: Result<(), StorageError> = storage.write(|txn| {
            let mut table = txn.open_table(LANGUAGES_TABLE)?;
            table.remove(0)?;
            Err(StorageError::Poisoned)
        });

        assert!(result.is_err());
        assert_eq!(storage.languages().unwrap(), vec![language("en", "ru")]);
    }

    #[test]
    fn test_update_missing_row() {
        let dir = tempfile::tempdir().unwrap();
        let storage = RedbStorage::open(dir.path().join("yatr.redb")).unwrap();
        let mut row = storage.insert_history(new_row("a")).unwrap();
        row.id = 99;

        assert!(!storage.update_history(&row).unwrap());
    }
}
