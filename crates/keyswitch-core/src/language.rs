// Supported languages / keyboard layouts and the Ukrainian layout variants

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported language. Each language doubles as the keyboard layout
/// used to type it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    English,
    Ukrainian,
    Russian,
}

impl Language {
    /// Every supported language, in the order alternatives are tried.
    pub const ALL: [Language; 3] = [Language::English, Language::Ukrainian, Language::Russian];

    /// Two-letter code used for resource file names (`en`, `uk`, `ru`).
    pub fn code(self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Ukrainian => "uk",
            Language::Russian => "ru",
        }
    }

    /// Parse a two-letter code. Case-insensitive.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "en" => Some(Language::English),
            "uk" | "ua" => Some(Language::Ukrainian),
            "ru" => Some(Language::Russian),
            _ => None,
        }
    }

    /// The script words of this language are written in.
    pub fn script(self) -> Script {
        match self {
            Language::English => Script::Latin,
            Language::Ukrainian | Language::Russian => Script::Cyrillic,
        }
    }

    pub fn is_cyrillic(self) -> bool {
        self.script() == Script::Cyrillic
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when a language code is not recognised.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLanguage(pub String);

impl fmt::Display for UnknownLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown language code: {}", self.0)
    }
}

impl std::error::Error for UnknownLanguage {}

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::from_code(s)
            .or_else(|| match s.to_ascii_lowercase().as_str() {
                "english" => Some(Language::English),
                "ukrainian" => Some(Language::Ukrainian),
                "russian" => Some(Language::Russian),
                _ => None,
            })
            .ok_or_else(|| UnknownLanguage(s.to_string()))
    }
}

/// Ukrainian keyboard variant.
///
/// The two variants differ only in where `ґ` and the apostrophe sit: the
/// standard layout has the apostrophe on the backquote key and `ґ` on the
/// backslash key, the legacy layout swaps them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UkVariant {
    #[default]
    Standard,
    Legacy,
}

impl UkVariant {
    pub const ALL: [UkVariant; 2] = [UkVariant::Standard, UkVariant::Legacy];
}

/// Writing system of a letter or a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    Latin,
    Cyrillic,
}
