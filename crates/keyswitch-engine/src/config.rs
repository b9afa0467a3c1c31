// Detector and loader settings, deserialisable from TOML

use std::path::Path;

use keyswitch_core::{Language, UkVariant};
use keyswitch_dict::LoaderConfig;
use serde::{Deserialize, Serialize};

/// Error type for reading settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Detector tuning. Every field has a default, so a partial TOML table is
/// enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Layouts the detector may convert from or to.
    pub enabled_layouts: Vec<Language>,
    /// Variant used when converting into Ukrainian.
    pub ukrainian_variant: UkVariant,
    /// Core length window (inclusive) in which edit-distance suggestions
    /// are allowed.
    pub suggestion_min_length: usize,
    pub suggestion_max_length: usize,
    /// Only offer suggestions when the typed text has no vowel of its
    /// source language.
    pub suggestion_requires_vowelless: bool,
    /// Originals this short are low-confidence corrections.
    pub low_confidence_max_length: usize,
    /// Consecutive low-confidence corrections to one target needed before
    /// a layout switch is requested.
    pub low_confidence_confirmations: u32,
    /// Originals this short may be suppressed in a strong context.
    pub suppress_max_length: usize,
    /// Number of recent word outcomes kept for context.
    pub history_window: usize,
    /// Valid words in the window needed for a strong context.
    pub strong_context_valid_words: usize,
    /// Length bounds of all-caps tokens treated as acronyms.
    pub acronym_min_length: usize,
    pub acronym_max_length: usize,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            enabled_layouts: Language::ALL.to_vec(),
            ukrainian_variant: UkVariant::Standard,
            suggestion_min_length: 4,
            suggestion_max_length: 7,
            suggestion_requires_vowelless: true,
            low_confidence_max_length: 3,
            low_confidence_confirmations: 2,
            suppress_max_length: 2,
            history_window: 6,
            strong_context_valid_words: 2,
            acronym_min_length: 2,
            acronym_max_length: 3,
        }
    }
}

impl DetectorConfig {
    pub fn is_enabled(&self, language: Language) -> bool {
        self.enabled_layouts.contains(&language)
    }
}

/// Top-level settings file: `[dictionary]` and `[detector]` tables.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub dictionary: LoaderConfig,
    pub detector: DetectorConfig,
}

impl Settings {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
