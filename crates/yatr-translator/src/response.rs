//! Decoding of the translate service payloads.
//!
//! Language list: `{ "dirs": ["en-ru", ...], "langs": { "en": "English", ... } }`
//!
//! Translation: `{ "code": 200, "lang": "en-ru", "text": ["привет"] }`

use std::collections::HashMap;

use serde::Deserialize;
use yatr_types::{LangPair, TranslateItem};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Missing field: {0}")]
    MissingField(&'static str),
}

#[derive(Debug, Deserialize)]
struct LanguagesJson {
    dirs: Option<Vec<String>>,
    langs: Option<HashMap<String, String>>,
}

/// Parse the supported languages payload into pairs.
///
/// Directions that cannot be split or whose codes have no display name are
/// skipped with a warning; the rest of the list is still usable.
pub fn parse_languages(raw: &str) -> Result<Vec<LangPair>, ParseError> {
    let json: LanguagesJson = serde_json::from_str(raw)?;
    let dirs = json.dirs.ok_or(ParseError::MissingField("dirs"))?;
    let langs = json.langs.ok_or(ParseError::MissingField("langs"))?;

    let mut pairs = Vec::with_capacity(dirs.len());

    for dir in &dirs {
        let Some(pair) = LangPair::from_direction(dir, "", "") else {
            tracing::warn!("Skipping direction without separator: {dir:?}");
            continue;
        };

        if !pair.is_valid() {
            tracing::warn!("Skipping direction with empty code: {dir:?}");
            continue;
        }

        let names = (langs.get(pair.from_code()), langs.get(pair.to_code()));
        let (Some(from_name), Some(to_name)) = names else {
            tracing::warn!("Skipping direction {dir:?}: no display name");
            continue;
        };

        pairs.push(pair.with_names(from_name.as_str(), to_name.as_str()));
    }

    tracing::debug!("Parsed {} of {} directions", pairs.len(), dirs.len());

    Ok(pairs)
}

/// Body of a translate call
#[derive(Debug, Clone, Deserialize)]
pub struct TranslateResponse {
    pub code: i64,
    #[serde(default)]
    pub lang: Option<String>,
    #[serde(default)]
    pub text: Option<Vec<String>>,
}

impl TranslateResponse {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The service reports its own status code inside the body
    pub fn is_success(&self) -> bool {
        (200..=299).contains(&self.code)
    }

    /// One item per returned variant, all sharing the source text and pair.
    ///
    /// Items are keyed on the requested pair so later lookups for the same
    /// request find them, even if the service echoes another direction.
    pub fn into_items(self, source_text: &str, requested: &LangPair) -> Vec<TranslateItem> {
        if let Some(lang) = &self.lang {
            if *lang != requested.direction() {
                tracing::warn!(
                    "Service answered {lang} for requested {}",
                    requested.direction()
                );
            }
        }

        let pair = LangPair::from_codes(requested.from_code(), requested.to_code());

        self.text
            .unwrap_or_default()
            .into_iter()
            .map(|translated| TranslateItem::new(source_text, translated, pair.clone()))
            .collect()
    }
}
