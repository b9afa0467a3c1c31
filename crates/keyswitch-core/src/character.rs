// Character classification: scripts, vowels, case helpers

use crate::language::{Language, Script};

// ---------------------------------------------------------------------------
// Vowel sets
// ---------------------------------------------------------------------------

/// English vowels including `y`.
const ENGLISH_VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'y'];

/// English vowels without `y`. A word of three or more letters with none of
/// these is almost never an English word.
const ENGLISH_CORE_VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u'];

const UKRAINIAN_VOWELS: &[char] = &['а', 'е', 'є', 'и', 'і', 'ї', 'о', 'у', 'ю', 'я'];

const RUSSIAN_VOWELS: &[char] = &['а', 'е', 'ё', 'и', 'о', 'у', 'ы', 'э', 'ю', 'я'];

/// Letters present in the Ukrainian alphabet but not the Russian one.
pub const UKRAINIAN_ONLY_LETTERS: &[char] = &['і', 'ї', 'є', 'ґ'];

/// Letters present in the Russian alphabet but not the Ukrainian one.
pub const RUSSIAN_ONLY_LETTERS: &[char] = &['ы', 'э', 'ё', 'ъ'];

// ---------------------------------------------------------------------------
// Script classification
// ---------------------------------------------------------------------------

/// Returns the script of a letter, or `None` for anything that is not a
/// Latin or Cyrillic letter (digits, punctuation, other scripts).
pub fn script_of(c: char) -> Option<Script> {
    if is_latin_letter(c) {
        Some(Script::Latin)
    } else if is_cyrillic_letter(c) {
        Some(Script::Cyrillic)
    } else {
        None
    }
}

pub fn is_latin_letter(c: char) -> bool {
    let cp = c as u32;
    c.is_ascii_alphabetic()
        || ((0x00C0..=0x024F).contains(&cp) && cp != 0x00D7 && cp != 0x00F7)
}

pub fn is_cyrillic_letter(c: char) -> bool {
    let cp = c as u32;
    (0x0400..=0x0481).contains(&cp) || (0x048A..=0x052F).contains(&cp)
}

/// Script classification of a whole word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordScript {
    /// The word has no Latin or Cyrillic letters at all.
    NoLetters,
    /// Every letter belongs to the same script.
    Single(Script),
    /// Letters from both scripts, or letters from some other script.
    Mixed,
}

/// Classify the letters of a word. Non-letters are ignored, except that any
/// alphabetic character outside Latin and Cyrillic makes the word `Mixed`.
pub fn word_script(word: &[char]) -> WordScript {
    let mut found: Option<Script> = None;
    for &c in word {
        let script = match script_of(c) {
            Some(s) => s,
            None if c.is_alphabetic() => return WordScript::Mixed,
            None => continue,
        };
        match found {
            None => found = Some(script),
            Some(prev) if prev != script => return WordScript::Mixed,
            Some(_) => {}
        }
    }
    found.map_or(WordScript::NoLetters, WordScript::Single)
}

/// Returns `true` if every letter in `word` belongs to the script of
/// `language` and there is at least one letter.
pub fn matches_script(word: &[char], language: Language) -> bool {
    word_script(word) == WordScript::Single(language.script())
}

// ---------------------------------------------------------------------------
// Vowels
// ---------------------------------------------------------------------------

/// Check whether a character is a vowel of the given language (case-insensitive).
pub fn is_vowel(c: char, language: Language) -> bool {
    let lower = simple_lower(c);
    match language {
        Language::English => ENGLISH_VOWELS.contains(&lower),
        Language::Ukrainian => UKRAINIAN_VOWELS.contains(&lower),
        Language::Russian => RUSSIAN_VOWELS.contains(&lower),
    }
}

pub fn has_vowel(word: &[char], language: Language) -> bool {
    word.iter().any(|&c| is_vowel(c, language))
}

/// English-specific: does the word contain one of `a e i o u`?
pub fn has_core_english_vowel(word: &[char]) -> bool {
    word.iter()
        .any(|&c| ENGLISH_CORE_VOWELS.contains(&simple_lower(c)))
}

// ---------------------------------------------------------------------------
// Case helpers
//
// Full Unicode case mapping may expand one character into several; the
// detector works scalar by scalar, so only the first mapped scalar is kept.
// ---------------------------------------------------------------------------

pub fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

pub fn simple_upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

pub fn is_upper(c: char) -> bool {
    c != simple_lower(c)
}

pub fn is_lower(c: char) -> bool {
    c != simple_upper(c)
}

/// Map typographic apostrophes to the ASCII apostrophe used in word lists.
pub fn normalize_apostrophe(c: char) -> char {
    match c {
        '\u{2019}' | '\u{02BC}' | '\u{2018}' => '\'',
        other => other,
    }
}

/// Characters that may appear inside a word: letters, digits and the
/// apostrophe / hyphen used in English and Ukrainian spelling.
pub fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || matches!(c, '\'' | '\u{2019}' | '\u{02BC}' | '-')
}
