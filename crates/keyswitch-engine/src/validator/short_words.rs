// Closed sets of valid one- and two-letter words.
//
// Dictionaries are unreliable at this length (abbreviations, interjections,
// stray letters), so short words are checked against these lists instead.

use keyswitch_core::Language;

const ENGLISH: &[&str] = &[
    "a", "i", "ad", "ah", "am", "an", "as", "at", "aw", "be", "by", "do", "eh", "go", "ha", "he",
    "hi", "if", "in", "is", "it", "me", "my", "no", "of", "oh", "ok", "on", "or", "ow", "ox", "so",
    "to", "uh", "um", "up", "us", "we", "ye", "yo",
];

const UKRAINIAN: &[&str] = &[
    "а", "б", "в", "є", "ж", "з", "і", "й", "о", "у", "я", "би", "бо", "ви", "во", "де", "до",
    "же", "за", "зі", "із", "її", "їй", "їх", "ми", "на", "не", "ні", "но", "ну", "об", "он", "от",
    "по", "та", "те", "ти", "то", "ту", "це", "чи", "ще", "як",
];

const RUSSIAN: &[&str] = &[
    "а", "б", "в", "ж", "и", "к", "о", "с", "у", "я", "бы", "во", "вы", "да", "до", "ее", "её",
    "ей", "же", "за", "из", "им", "их", "ко", "ли", "мы", "на", "не", "ни", "но", "ну", "об", "он",
    "от", "по", "со", "та", "те", "то", "ту", "ты", "уж",
];

/// The short-word list of a language.
pub fn short_words(language: Language) -> &'static [&'static str] {
    match language {
        Language::English => ENGLISH,
        Language::Ukrainian => UKRAINIAN,
        Language::Russian => RUSSIAN,
    }
}

/// Whether `word` (lowercase) is a known short word of `language`.
pub fn is_short_word(word: &str, language: Language) -> bool {
    short_words(language).contains(&word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_hold_only_short_lowercase_words() {
        for lang in Language::ALL {
            for w in short_words(lang) {
                let n = w.chars().count();
                assert!((1..=2).contains(&n), "{w}");
                assert_eq!(w.to_lowercase(), *w);
            }
        }
    }

    #[test]
    fn membership() {
        assert!(is_short_word("is", Language::English));
        assert!(is_short_word("ні", Language::Ukrainian));
        assert!(!is_short_word("ні", Language::Russian));
        assert!(!is_short_word("xq", Language::English));
    }
}
