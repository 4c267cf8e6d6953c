use std::io;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use yatr_translator::{ProviderMetadata, TranslateError, TranslationApi};

use crate::storage::{
    HistoryRow, LanguageRow, MemoryStorage, NewHistoryRow, Storage, StorageError,
};

pub const LANGUAGES_BODY: &str = r#"{
    "dirs": ["en-ru", "en-fr", "ru-en", "fr-en"],
    "langs": { "en": "English", "ru": "Russian", "fr": "French" }
}"#;

pub const HELLO_BODY: &str = r#"{ "code": 200, "lang": "en-ru", "text": ["привет"] }"#;

/// Canned remote that records how often it was called
pub struct MockApi {
    languages: Mutex<Result<String, u16>>,
    translation: Mutex<Result<String, u16>>,
    pub language_calls: AtomicUsize,
    pub translate_calls: AtomicUsize,
}

impl MockApi {
    pub fn new() -> Self {
        Self {
            languages: Mutex::new(Ok(LANGUAGES_BODY.to_string())),
            translation: Mutex::new(Ok(HELLO_BODY.to_string())),
            language_calls: AtomicUsize::new(0),
            translate_calls: AtomicUsize::new(0),
        }
    }

    pub fn with_translation(body: &str) -> Self {
        let api = Self::new();
        api.set_translation(Ok(body.to_string()));
        api
    }

    /// `Err(status)` simulates an HTTP failure
    pub fn set_translation(&self, body: Result<String, u16>) {
        *self.translation.lock().unwrap() = body;
    }

    pub fn set_languages(&self, body: Result<String, u16>) {
        *self.languages.lock().unwrap() = body;
    }

    pub fn translate_calls(&self) -> usize {
        self.translate_calls.load(Ordering::SeqCst)
    }

    pub fn language_calls(&self) -> usize {
        self.language_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationApi for MockApi {
    async fn supported_languages(&self) -> Result<String, TranslateError> {
        self.language_calls.fetch_add(1, Ordering::SeqCst);
        self.languages
            .lock()
            .unwrap()
            .clone()
            .map_err(TranslateError::HttpStatus)
    }

    async fn translate(&self, _text: &str, _from: &str, _to: &str) -> Result<String, TranslateError> {
        self.translate_calls.fetch_add(1, Ordering::SeqCst);
        self.translation
            .lock()
            .unwrap()
            .clone()
            .map_err(TranslateError::HttpStatus)
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "mock".to_string(),
            requires_api_key: false,
            free_tier_available: true,
        }
    }
}

/// Memory storage that fails on demand
#[derive(Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    failing_reads: AtomicUsize,
    failing_writes: AtomicBool,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `count` reads fail
    pub fn fail_reads(&self, count: usize) {
        self.failing_reads.store(count, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.failing_writes.store(fail, Ordering::SeqCst);
    }

    fn check_read(&self) -> Result<(), StorageError> {
        let failed = self
            .failing_reads
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();

        if failed {
            return Err(StorageError::Io(io::Error::other("read failed")));
        }
        Ok(())
    }

    fn check_write(&self) -> Result<(), StorageError> {
        if self.failing_writes.load(Ordering::SeqCst) {
            return Err(StorageError::Io(io::Error::other("write failed")));
        }
        Ok(())
    }
}

impl Storage for FlakyStorage {
    fn languages(&self) -> Result<Vec<LanguageRow>, StorageError> {
        self.check_read()?;
        self.inner.languages()
    }

    fn replace_languages(&self, rows: Vec<LanguageRow>) -> Result<(), StorageError> {
        self.check_write()?;
        self.inner.replace_languages(rows)
    }

    fn insert_history(&self, row: NewHistoryRow) -> Result<HistoryRow, StorageError> {
        self.check_write()?;
        self.inner.insert_history(row)
    }

    fn query_history(
        &self,
        predicate: &dyn Fn(&HistoryRow) -> bool,
    ) -> Result<Vec<HistoryRow>, StorageError> {
        self.check_read()?;
        self.inner.query_history(predicate)
    }

    fn update_history(&self, row: &HistoryRow) -> Result<bool, StorageError> {
        self.check_write()?;
        self.inner.update_history(row)
    }

    fn clear_history(&self) -> Result<usize, StorageError> {
        self.check_write()?;
        self.inner.clear_history()
    }
}
