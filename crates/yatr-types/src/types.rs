use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Separator used by the remote API for translation directions (`en-ru`)
pub const DIRECTION_SEPARATOR: char = '-';

/// A single source -> destination language pair with display names
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LangPair {
    from_code: String,
    to_code: String,
    from_name: String,
    to_name: String,
}

impl LangPair {
    pub fn new(
        from_code: impl Into<String>,
        to_code: impl Into<String>,
        from_name: impl Into<String>,
        to_name: impl Into<String>,
    ) -> Self {
        Self {
            from_code: from_code.into(),
            to_code: to_code.into(),
            from_name: from_name.into(),
            to_name: to_name.into(),
        }
    }

    /// Pair that only knows its codes, as stored in history rows
    pub fn from_codes(from_code: impl Into<String>, to_code: impl Into<String>) -> Self {
        Self::new(from_code, to_code, String::new(), String::new())
    }

    /// Parse an API direction string such as `en-ru`.
    ///
    /// Returns `None` when the separator is missing. Empty halves are kept,
    /// use [`LangPair::is_valid`] to reject them.
    pub fn from_direction(
        direction: &str,
        from_name: impl Into<String>,
        to_name: impl Into<String>,
    ) -> Option<Self> {
        let (from, to) = direction.split_once(DIRECTION_SEPARATOR)?;
        Some(Self::new(from, to, from_name, to_name))
    }

    pub fn from_code(&self) -> &str {
        &self.from_code
    }

    pub fn to_code(&self) -> &str {
        &self.to_code
    }

    pub fn from_name(&self) -> &str {
        &self.from_name
    }

    pub fn to_name(&self) -> &str {
        &self.to_name
    }

    /// Direction string understood by the translate endpoint
    pub fn direction(&self) -> String {
        format!("{}{}{}", self.from_code, DIRECTION_SEPARATOR, self.to_code)
    }

    /// Both codes present. Equal codes are allowed.
    pub fn is_valid(&self) -> bool {
        !self.from_code.trim().is_empty() && !self.to_code.trim().is_empty()
    }

    /// Exchange source and destination, codes and names together
    pub fn swap(&mut self) {
        std::mem::swap(&mut self.from_code, &mut self.to_code);
        std::mem::swap(&mut self.from_name, &mut self.to_name);
    }

    /// Same pair with names attached
    pub fn with_names(mut self, from_name: impl Into<String>, to_name: impl Into<String>) -> Self {
        self.from_name = from_name.into();
        self.to_name = to_name.into();
        self
    }

    fn same_codes(&self, other: &LangPair) -> bool {
        self.from_code == other.from_code && self.to_code == other.to_code
    }
}

impl Default for LangPair {
    fn default() -> Self {
        Self::new("en", "ru", "English", "Russian")
    }
}

/// A translation result, persisted as one history row
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslateItem {
    /// Assigned by storage, `None` until the item has been saved
    pub id: Option<i64>,
    pub is_favorite: bool,
    pub text_to_translate: String,
    pub translated_text: String,
    pub lang_pair: LangPair,
    /// Insertion time, set by storage
    pub created_at: Option<DateTime<Utc>>,
}

impl TranslateItem {
    pub fn new(
        text_to_translate: impl Into<String>,
        translated_text: impl Into<String>,
        lang_pair: LangPair,
    ) -> Self {
        Self {
            id: None,
            is_favorite: false,
            text_to_translate: text_to_translate.into(),
            translated_text: translated_text.into(),
            lang_pair,
            created_at: None,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// True when this item was produced for `text` in the given direction
    pub fn matches_request(&self, text: &str, from_code: &str, to_code: &str) -> bool {
        self.text_to_translate == text
            && self.lang_pair.from_code() == from_code
            && self.lang_pair.to_code() == to_code
    }
}

// Identity is the translation itself: id, favorite flag and timestamps are
// bookkeeping and names are not stored with history.
impl PartialEq for TranslateItem {
    fn eq(&self, other: &Self) -> bool {
        self.text_to_translate == other.text_to_translate
            && self.translated_text == other.translated_text
            && self.lang_pair.same_codes(&other.lang_pair)
    }
}

impl Eq for TranslateItem {}

/// Which history rows a search should consider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryFilter {
    #[default]
    All,
    FavoriteOnly,
}

impl HistoryFilter {
    pub fn admits(&self, is_favorite: bool) -> bool {
        match self {
            HistoryFilter::All => true,
            HistoryFilter::FavoriteOnly => is_favorite,
        }
    }
}
