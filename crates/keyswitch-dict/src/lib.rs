//! Word dictionaries for keyswitch.
//!
//! # Architecture
//!
//! - [`format`] -- Binary dictionary header parsing, validation and encoding
//! - [`region`] -- Read-only byte regions (memory-mapped or owned) with bounds-checked reads
//! - [`filter`] -- Probabilistic membership filter (Bloom filter)
//! - [`index`] -- Exact, partitioned word index over either storage
//! - [`distance`] -- Bounded Damerau-Levenshtein distance with reusable scratch rows
//! - [`fuzzy`] -- Shingle-based candidate index for edit-distance suggestions
//! - [`overrides`] -- Per-language allow / deny word lists
//! - [`repository`] -- Lazily-loaded, cached per-language dictionaries
//! - [`wordlist`] -- Plain-text word list reading and entry validation

pub mod distance;
pub mod filter;
pub mod format;
pub mod fuzzy;
pub mod index;
pub mod overrides;
pub mod region;
pub mod repository;
pub mod wordlist;

pub use distance::EditDistance;
pub use filter::BloomFilter;
pub use fuzzy::{FuzzyConfig, FuzzyIndex};
pub use index::DictionaryIndex;
pub use overrides::Overrides;
pub use repository::{DictionaryRepository, LanguageDictionary, LoaderConfig};
pub use wordlist::{WordList, WordListStats, is_dictionary_word};

use unicode_normalization::UnicodeNormalization;

/// Error type for dictionary parsing and loading.
#[derive(Debug, thiserror::Error)]
pub enum DictError {
    #[error("invalid magic tag in dictionary header")]
    InvalidMagic,
    #[error("unsupported dictionary format version {0}")]
    UnsupportedVersion(u32),
    #[error("file too short: expected at least {expected} bytes, got {actual}")]
    TooShort { expected: usize, actual: usize },
    #[error("dictionary too large for the binary format: {0}")]
    TooLarge(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Normalise one word-list entry: trim, lowercase, drop the combining acute
/// accent used for stress marks, unify apostrophes and compose to NFC.
///
/// Returns `None` for blank lines and `#` comments.
pub fn normalize_word(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return None;
    }
    let word: String = trimmed
        .chars()
        .filter(|&c| c != '\u{0301}')
        .map(keyswitch_core::character::normalize_apostrophe)
        .flat_map(char::to_lowercase)
        .nfc()
        .collect();
    if word.is_empty() { None } else { Some(word) }
}
