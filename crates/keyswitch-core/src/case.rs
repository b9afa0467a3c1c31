// Case pattern detection and re-application

use crate::character::{is_lower, is_upper, simple_lower, simple_upper};

/// Casing of the letters in a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CasePattern {
    /// No letters found in the word (only digits, punctuation, etc.).
    NoLetters,
    /// All letters are lowercase: "privet".
    AllLower,
    /// First letter is uppercase, rest are lowercase: "Privet".
    Capitalized,
    /// Anything else: "priVet", "McDonald".
    Mixed,
    /// All letters are uppercase: "PRIVET".
    AllUpper,
}

/// Detect the case pattern of a word. Non-letters are ignored.
///
/// A single uppercase letter counts as `AllUpper`.
pub fn detect_case(word: &[char]) -> CasePattern {
    let mut letters = word.iter().copied().filter(|&c| is_upper(c) || is_lower(c));
    let Some(first) = letters.next() else {
        return CasePattern::NoLetters;
    };

    let mut rest_lower = true;
    let mut all_upper = is_upper(first);
    for c in letters {
        if is_upper(c) {
            rest_lower = false;
        } else {
            all_upper = false;
        }
    }

    if all_upper {
        CasePattern::AllUpper
    } else if !rest_lower {
        CasePattern::Mixed
    } else if is_upper(first) {
        CasePattern::Capitalized
    } else {
        CasePattern::AllLower
    }
}

/// Apply a case pattern to a word in place.
///
/// `NoLetters` and `Mixed` leave the word untouched. `Capitalized`
/// uppercases the first letter and lowercases the others.
pub fn set_case(word: &mut [char], pattern: CasePattern) {
    match pattern {
        CasePattern::NoLetters | CasePattern::Mixed => {}
        CasePattern::AllLower => {
            for c in word.iter_mut() {
                *c = simple_lower(*c);
            }
        }
        CasePattern::AllUpper => {
            for c in word.iter_mut() {
                *c = simple_upper(*c);
            }
        }
        CasePattern::Capitalized => {
            let mut seen_letter = false;
            for c in word.iter_mut() {
                if !c.is_alphabetic() {
                    continue;
                }
                *c = if seen_letter {
                    simple_lower(*c)
                } else {
                    simple_upper(*c)
                };
                seen_letter = true;
            }
        }
    }
}

/// Re-apply the casing of `source` to `target`.
///
/// Only the two patterns that survive a layout change unambiguously are
/// transferred: all caps and a capitalised first letter. Every other
/// pattern returns `target` unchanged.
pub fn transfer_case(source: &[char], target: &str) -> String {
    let pattern = detect_case(source);
    match pattern {
        CasePattern::AllUpper | CasePattern::Capitalized => {
            let mut chars: Vec<char> = target.chars().collect();
            set_case(&mut chars, pattern);
            chars.into_iter().collect()
        }
        _ => target.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    fn to_string(cs: &[char]) -> String {
        cs.iter().collect()
    }

    #[test]
    fn detect_empty_and_no_letters() {
        assert_eq!(detect_case(&[]), CasePattern::NoLetters);
        assert_eq!(detect_case(&chars("123")), CasePattern::NoLetters);
        assert_eq!(detect_case(&chars("...")), CasePattern::NoLetters);
    }

    #[test]
    fn detect_basic_patterns() {
        assert_eq!(detect_case(&chars("ghbdtn")), CasePattern::AllLower);
        assert_eq!(detect_case(&chars("Ghbdtn")), CasePattern::Capitalized);
        assert_eq!(detect_case(&chars("GHBDTN")), CasePattern::AllUpper);
        assert_eq!(detect_case(&chars("gHbdtn")), CasePattern::Mixed);
        assert_eq!(detect_case(&chars("A")), CasePattern::AllUpper);
    }

    #[test]
    fn detect_ignores_punctuation() {
        assert_eq!(detect_case(&chars("\"Ghbdtn")), CasePattern::Capitalized);
        assert_eq!(detect_case(&chars("J,TL")), CasePattern::AllUpper);
        assert_eq!(detect_case(&chars("don't")), CasePattern::AllLower);
    }

    #[test]
    fn detect_cyrillic() {
        assert_eq!(detect_case(&chars("Привіт")), CasePattern::Capitalized);
        assert_eq!(detect_case(&chars("ЇЖАК")), CasePattern::AllUpper);
    }

    #[test]
    fn set_case_patterns() {
        let mut w = chars("привет");
        set_case(&mut w, CasePattern::AllUpper);
        assert_eq!(to_string(&w), "ПРИВЕТ");
        set_case(&mut w, CasePattern::Capitalized);
        assert_eq!(to_string(&w), "Привет");
        set_case(&mut w, CasePattern::AllLower);
        assert_eq!(to_string(&w), "привет");
    }

    #[test]
    fn set_case_capitalized_skips_leading_punctuation() {
        let mut w = chars("«тест");
        set_case(&mut w, CasePattern::Capitalized);
        assert_eq!(to_string(&w), "«Тест");
    }

    #[test]
    fn set_case_mixed_is_noop() {
        let mut w = chars("McDonald");
        set_case(&mut w, CasePattern::Mixed);
        assert_eq!(to_string(&w), "McDonald");
    }

    #[test]
    fn transfer_case_only_moves_unambiguous_patterns() {
        assert_eq!(transfer_case(&chars("GHBDTN"), "привет"), "ПРИВЕТ");
        assert_eq!(transfer_case(&chars("Ghbdtn"), "привет"), "Привет");
        assert_eq!(transfer_case(&chars("ghbdtn"), "привет"), "привет");
        assert_eq!(transfer_case(&chars("gHbdtn"), "пРивет"), "пРивет");
    }
}
