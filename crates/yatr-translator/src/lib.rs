pub mod response;
pub mod yandex;

pub use response::{ParseError, TranslateResponse, parse_languages};
pub use yandex::YandexTranslator;

/// Remote translation service, as seen by the caching layer.
///
/// Implementations return the raw response body; decoding lives in
/// [`response`] so every provider shares one parser.
#[async_trait::async_trait]
pub trait TranslationApi: Send + Sync {
    /// Fetch the supported directions and language names
    async fn supported_languages(&self) -> Result<String, TranslateError>;

    /// Translate text from source to target language
    async fn translate(&self, text: &str, from: &str, to: &str) -> Result<String, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("HTTP status {0}")]
    HttpStatus(u16),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}
