// Plain-text word lists: entry validation, reading and merging

use hashbrown::HashMap;
use keyswitch_core::Language;
use keyswitch_core::character::is_cyrillic_letter;

use crate::normalize_word;

/// Entries shorter than this are left to the built-in short-word sets.
pub const MIN_WORD_LENGTH: usize = 3;

/// Why a normalised entry was not taken into a dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Contains whitespace.
    Phrase,
    /// Digits, control characters, letters of another script or no letters.
    Invalid,
    /// Fewer than [`MIN_WORD_LENGTH`] scalars.
    TooShort,
}

fn is_language_letter(c: char, language: Language) -> bool {
    match language {
        Language::English => c.is_ascii_alphabetic(),
        Language::Ukrainian | Language::Russian => is_cyrillic_letter(c),
    }
}

/// Check a normalised entry against the rules for `language`'s dictionary.
pub fn check_word(word: &str, language: Language) -> Result<(), Rejection> {
    if word.chars().any(char::is_whitespace) {
        return Err(Rejection::Phrase);
    }
    let mut letters = 0;
    for c in word.chars() {
        if c == '\'' || c == '-' {
            continue;
        }
        if !is_language_letter(c, language) {
            return Err(Rejection::Invalid);
        }
        letters += 1;
    }
    if letters == 0 {
        return Err(Rejection::Invalid);
    }
    if word.chars().count() < MIN_WORD_LENGTH {
        return Err(Rejection::TooShort);
    }
    Ok(())
}

/// Whether a normalised entry belongs in `language`'s dictionary.
pub fn is_dictionary_word(word: &str, language: Language) -> bool {
    check_word(word, language).is_ok()
}

/// Line counts from reading one word list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WordListStats {
    pub lines: usize,
    /// Blank lines and `#` comments.
    pub empty: usize,
    pub phrases: usize,
    pub invalid: usize,
    pub too_short: usize,
    /// Distinct words kept.
    pub words: usize,
}

/// The accepted words of one list, sorted and deduplicated.
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<String>,
    stats: WordListStats,
}

impl WordList {
    /// Normalise and validate every line of `contents` for `language`.
    pub fn parse(contents: &str, language: Language) -> Self {
        let mut stats = WordListStats::default();
        let mut words = Vec::new();
        for line in contents.lines() {
            stats.lines += 1;
            let Some(word) = normalize_word(line) else {
                stats.empty += 1;
                continue;
            };
            match check_word(&word, language) {
                Ok(()) => words.push(word),
                Err(Rejection::Phrase) => stats.phrases += 1,
                Err(Rejection::Invalid) => stats.invalid += 1,
                Err(Rejection::TooShort) => stats.too_short += 1,
            }
        }
        words.sort_unstable();
        words.dedup();
        stats.words = words.len();
        Self { words, stats }
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn stats(&self) -> &WordListStats {
        &self.stats
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }
}

/// Overlap between merged word lists.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Words in the union.
    pub merged: usize,
    /// Words present in every list.
    pub common: usize,
    /// Per input, words found in no other list.
    pub unique: Vec<usize>,
}

/// The sorted union of `lists` and how much they overlap.
pub fn merge(lists: &[WordList]) -> (Vec<String>, MergeReport) {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    for list in lists {
        for word in list.words() {
            *seen.entry(word.as_str()).or_insert(0) += 1;
        }
    }

    let unique = lists
        .iter()
        .map(|list| list.words().iter().filter(|w| seen.get(w.as_str()) == Some(&1)).count())
        .collect();
    let common = if lists.is_empty() {
        0
    } else {
        seen.values().filter(|&&n| n == lists.len()).count()
    };

    let mut merged: Vec<String> = seen.into_keys().map(str::to_string).collect();
    merged.sort_unstable();
    let report = MergeReport {
        merged: merged.len(),
        common,
        unique,
    };
    (merged, report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_words_of_the_language() {
        assert!(is_dictionary_word("hello", Language::English));
        assert!(is_dictionary_word("it's", Language::English));
        assert!(is_dictionary_word("м'ясо", Language::Ukrainian));
        assert!(is_dictionary_word("будь-який", Language::Ukrainian));
        assert!(is_dictionary_word("ёлка", Language::Russian));
    }

    #[test]
    fn rejects_entries_that_cannot_be_typed_as_words() {
        assert_eq!(check_word("добрий день", Language::Ukrainian), Err(Rejection::Phrase));
        assert_eq!(check_word("covid19", Language::English), Err(Rejection::Invalid));
        assert_eq!(check_word("привет", Language::English), Err(Rejection::Invalid));
        assert_eq!(check_word("hello", Language::Russian), Err(Rejection::Invalid));
        assert_eq!(check_word("таб\u{7}", Language::Russian), Err(Rejection::Invalid));
        assert_eq!(check_word("--'", Language::English), Err(Rejection::Invalid));
        assert_eq!(check_word("ok", Language::English), Err(Rejection::TooShort));
        assert_eq!(check_word("як", Language::Ukrainian), Err(Rejection::TooShort));
    }

    #[test]
    fn parse_counts_every_line() {
        let list = WordList::parse(
            "# list\nПривіт\n\nдобрий ранок\nслово2\nяк\nпривіт\nмо\u{0301}ва\n",
            Language::Ukrainian,
        );
        assert_eq!(list.words(), ["мова", "привіт"]);
        assert_eq!(
            *list.stats(),
            WordListStats {
                lines: 8,
                empty: 2,
                phrases: 1,
                invalid: 1,
                too_short: 1,
                words: 2,
            }
        );
    }

    #[test]
    fn merge_reports_overlap() {
        let a = WordList::parse("слово\nмова\nдякую\n", Language::Ukrainian);
        let b = WordList::parse("мова\nпривіт\n", Language::Ukrainian);
        let (words, report) = merge(&[a, b]);
        assert_eq!(words, ["дякую", "мова", "привіт", "слово"]);
        assert_eq!(
            report,
            MergeReport {
                merged: 4,
                common: 1,
                unique: vec![2, 1],
            }
        );
    }

    #[test]
    fn merge_of_nothing_is_empty() {
        let (words, report) = merge(&[]);
        assert!(words.is_empty());
        assert_eq!(report.common, 0);
    }
}
