pub mod types;

pub use types::{HistoryFilter, LangPair, TranslateItem};
