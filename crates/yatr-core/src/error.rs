use yatr_translator::{ParseError, TranslateError};

use crate::storage::StorageError;

/// Failures surfaced by the caching layer
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Bad input, retrying without changing it will fail again
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Remote unavailable: {0}")]
    RemoteUnavailable(#[from] TranslateError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Operation needs an entity that was never persisted
    #[error("Invalid reference: {0}")]
    InvalidReference(String),
}

impl Error {
    /// Only remote failures are worth retrying as-is
    pub fn is_retryable(&self) -> bool {
        matches!(self, Error::RemoteUnavailable(_))
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
