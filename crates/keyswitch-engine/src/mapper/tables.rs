// Keyboard layout tables, keyed by the character the English layout
// produces on each physical key.

use std::sync::LazyLock;

use hashbrown::HashMap;
use keyswitch_core::UkVariant;

/// Unshifted keys of the Russian (ЙЦУКЕН) layout. Letter keys also get an
/// uppercase entry derived from these.
const EN_RU: &[(char, char)] = &[
    ('`', 'ё'),
    ('q', 'й'),
    ('w', 'ц'),
    ('e', 'у'),
    ('r', 'к'),
    ('t', 'е'),
    ('y', 'н'),
    ('u', 'г'),
    ('i', 'ш'),
    ('o', 'щ'),
    ('p', 'з'),
    ('[', 'х'),
    (']', 'ъ'),
    ('a', 'ф'),
    ('s', 'ы'),
    ('d', 'в'),
    ('f', 'а'),
    ('g', 'п'),
    ('h', 'р'),
    ('j', 'о'),
    ('k', 'л'),
    ('l', 'д'),
    (';', 'ж'),
    ('\'', 'э'),
    ('z', 'я'),
    ('x', 'ч'),
    ('c', 'с'),
    ('v', 'м'),
    ('b', 'и'),
    ('n', 'т'),
    ('m', 'ь'),
    (',', 'б'),
    ('.', 'ю'),
    ('/', '.'),
];

/// Shifted punctuation keys that carry letters in the Russian layout.
const EN_RU_SHIFTED: &[(char, char)] = &[
    ('~', 'Ё'),
    ('{', 'Х'),
    ('}', 'Ъ'),
    (':', 'Ж'),
    ('"', 'Э'),
    ('<', 'Б'),
    ('>', 'Ю'),
    ('?', ','),
];

/// Keys where the Ukrainian layout differs from the Russian one, common to
/// both variants. `~` is cleared here and reassigned per variant.
const EN_UK_COMMON: &[(char, Option<char>)] = &[
    (']', Some('ї')),
    ('}', Some('Ї')),
    ('s', Some('і')),
    ('S', Some('І')),
    ('\'', Some('є')),
    ('"', Some('Є')),
    ('~', None),
];

const EN_UK_STANDARD: &[(char, char)] = &[('`', '\''), ('\\', 'ґ'), ('|', 'Ґ')];

const EN_UK_LEGACY: &[(char, char)] = &[('`', 'ґ'), ('~', 'Ґ'), ('\\', '\'')];

pub(crate) type KeyMap = HashMap<char, char>;

pub(crate) struct Tables {
    pub en_to_ru: KeyMap,
    pub ru_to_en: KeyMap,
    /// Indexed by [`variant_slot`].
    pub en_to_uk: [KeyMap; 2],
    pub uk_to_en: [KeyMap; 2],
}

pub(crate) fn variant_slot(variant: UkVariant) -> usize {
    match variant {
        UkVariant::Standard => 0,
        UkVariant::Legacy => 1,
    }
}

pub(crate) static TABLES: LazyLock<Tables> = LazyLock::new(Tables::build);

impl Tables {
    fn build() -> Self {
        let en_to_ru = russian();
        let en_to_uk = [
            ukrainian(&en_to_ru, EN_UK_STANDARD),
            ukrainian(&en_to_ru, EN_UK_LEGACY),
        ];
        Self {
            ru_to_en: invert(&en_to_ru),
            uk_to_en: [invert(&en_to_uk[0]), invert(&en_to_uk[1])],
            en_to_ru,
            en_to_uk,
        }
    }
}

fn russian() -> KeyMap {
    let mut map = KeyMap::with_capacity(EN_RU.len() * 2 + EN_RU_SHIFTED.len());
    for &(en, ru) in EN_RU {
        map.insert(en, ru);
        if en.is_ascii_alphabetic() {
            map.insert(en.to_ascii_uppercase(), upper(ru));
        }
    }
    map.extend(EN_RU_SHIFTED.iter().copied());
    map
}

fn ukrainian(russian: &KeyMap, variant: &[(char, char)]) -> KeyMap {
    let mut map = russian.clone();
    for &(en, uk) in EN_UK_COMMON {
        match uk {
            Some(uk) => map.insert(en, uk),
            None => map.remove(&en),
        };
    }
    map.extend(variant.iter().copied());
    map
}

fn invert(map: &KeyMap) -> KeyMap {
    map.iter().map(|(&k, &v)| (v, k)).collect()
}

fn upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_injective(map: &KeyMap) {
        assert_eq!(invert(map).len(), map.len());
    }

    #[test]
    fn tables_are_injective() {
        let t = &*TABLES;
        assert_injective(&t.en_to_ru);
        assert_injective(&t.en_to_uk[0]);
        assert_injective(&t.en_to_uk[1]);
    }

    #[test]
    fn letters_have_both_cases() {
        let t = &*TABLES;
        assert_eq!(t.en_to_ru.get(&'Q'), Some(&'Й'));
        assert_eq!(t.en_to_uk[0].get(&'S'), Some(&'І'));
        assert_eq!(t.en_to_uk[1].get(&'}'), Some(&'Ї'));
    }

    #[test]
    fn ukrainian_has_no_russian_only_letters() {
        for map in &TABLES.en_to_uk {
            for c in ['ы', 'Ы', 'э', 'Э', 'ъ', 'Ъ', 'ё', 'Ё'] {
                assert!(!map.values().any(|&v| v == c), "unexpected {c}");
            }
        }
    }

    #[test]
    fn variants_place_apostrophe_and_ghe() {
        let [standard, legacy] = &TABLES.en_to_uk;
        assert_eq!(standard.get(&'`'), Some(&'\''));
        assert_eq!(standard.get(&'\\'), Some(&'ґ'));
        assert_eq!(standard.get(&'~'), None);
        assert_eq!(legacy.get(&'`'), Some(&'ґ'));
        assert_eq!(legacy.get(&'\\'), Some(&'\''));
    }
}
