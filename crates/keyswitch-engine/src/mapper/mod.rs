// Layout mapping: retype text as if the same keys had been pressed under
// another keyboard layout.

mod tables;

use keyswitch_core::{Language, UkVariant};

use tables::{KeyMap, TABLES, variant_slot};

/// Key table from `language` to English key positions.
fn to_english(language: Language, variant: UkVariant) -> Option<&'static KeyMap> {
    match language {
        Language::English => None,
        Language::Russian => Some(&TABLES.ru_to_en),
        Language::Ukrainian => Some(&TABLES.uk_to_en[variant_slot(variant)]),
    }
}

/// Key table from English key positions to `language`.
fn from_english(language: Language, variant: UkVariant) -> Option<&'static KeyMap> {
    match language {
        Language::English => None,
        Language::Russian => Some(&TABLES.en_to_ru),
        Language::Ukrainian => Some(&TABLES.en_to_uk[variant_slot(variant)]),
    }
}

/// Convert one character. Characters with no key in the source layout, or
/// whose key produces nothing in the target layout, are returned unchanged.
pub fn convert_char(
    c: char,
    from: Language,
    to: Language,
    uk_from: UkVariant,
    uk_to: UkVariant,
) -> char {
    let key = match to_english(from, uk_from) {
        Some(map) => match map.get(&c) {
            Some(&key) => key,
            None => return c,
        },
        None => c,
    };
    match from_english(to, uk_to) {
        Some(map) => map.get(&key).copied().unwrap_or(c),
        None => key,
    }
}

/// Retype `text`, typed under `from`, as it would appear under `to`.
///
/// Case-sensitive, scalar by scalar. Identity when both layouts (and, for
/// Ukrainian, both variants) are the same.
pub fn convert(
    text: &str,
    from: Language,
    to: Language,
    uk_from: UkVariant,
    uk_to: UkVariant,
) -> String {
    if from == to && (from != Language::Ukrainian || uk_from == uk_to) {
        return text.to_string();
    }
    text.chars()
        .map(|c| convert_char(c, from, to, uk_from, uk_to))
        .collect()
}

/// Conversions of `text` into every other layout, in the order English,
/// Ukrainian, Russian. Conversions that leave the text unchanged are
/// omitted.
pub fn convert_to_alternatives(
    text: &str,
    from: Language,
    uk_from: UkVariant,
    uk_to: UkVariant,
) -> Vec<(Language, String)> {
    Language::ALL
        .into_iter()
        .filter(|&to| to != from)
        .filter_map(|to| {
            let converted = convert(text, from, to, uk_from, uk_to);
            (converted != text).then_some((to, converted))
        })
        .collect()
}
