//! Shared vocabulary for keyswitch.
//!
//! - [`language`] -- supported languages, Ukrainian layout variants, scripts
//! - [`character`] -- script and vowel classification, simple case mapping
//! - [`case`] -- case pattern detection and transfer between words
//! - [`token`] -- punctuation affix splitting for typed tokens

pub mod case;
pub mod character;
pub mod language;
pub mod token;

pub use language::{Language, Script, UkVariant};
