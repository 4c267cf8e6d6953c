pub mod cache;
pub mod error;
pub mod history;
pub mod language;
pub mod resolver;
pub mod service;
pub mod storage;
pub mod sync;

pub use cache::LanguageCache;
pub use error::{Error, Result};
pub use history::TranslationHistoryStore;
pub use language::LanguageGraph;
pub use resolver::{Resolution, ResolutionSource, TranslateResolver};
pub use service::LanguageService;
pub use storage::{MemoryStorage, RedbStorage, Storage, StorageError};
pub use sync::SyncScheduler;
