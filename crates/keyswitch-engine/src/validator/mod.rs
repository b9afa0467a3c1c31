// Word validation: an ordered list of gates deciding whether a word belongs
// to a language, with optional edit-distance correction.

pub mod short_words;

use std::cell::RefCell;
use std::sync::Arc;

use keyswitch_core::Language;
use keyswitch_core::character::{
    has_core_english_vowel, has_vowel, is_lower, is_upper, matches_script, normalize_apostrophe,
    simple_lower,
};
use keyswitch_dict::{DictionaryRepository, EditDistance, LanguageDictionary};
use tracing::trace;

pub use short_words::is_short_word;

/// English contraction suffixes, longest first.
const CONTRACTIONS: &[&str] = &["n't", "'ll", "'re", "'ve", "'s", "'d", "'m"];

/// Maximum edit distance for suggestions.
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// Outcome of [`WordValidator::validate`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Validation {
    pub is_valid: bool,
    /// Lowercase replacement when the word was accepted as a near miss.
    pub corrected: Option<String>,
}

impl Validation {
    fn accepted(corrected: Option<String>) -> Self {
        Self {
            is_valid: true,
            corrected,
        }
    }

    fn rejected() -> Self {
        Self::default()
    }
}

/// What a gate decided.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Gate {
    Accept(Option<String>),
    Reject,
    Continue,
}

/// The word under test, prepared once for all gates.
struct Probe<'a> {
    /// As typed, for case-shape checks.
    original: &'a [char],
    /// Lowercased, apostrophes normalised.
    lower: String,
    chars: Vec<char>,
    language: Language,
    allow_suggestion: bool,
    dict: Arc<LanguageDictionary>,
}

type GateFn = fn(&WordValidator, &Probe<'_>) -> Gate;

/// Gates in evaluation order. The first one that does not return
/// `Continue` decides.
const GATES: &[(&str, GateFn)] = &[
    ("non_word", WordValidator::non_word),
    ("script", WordValidator::script),
    ("overrides", WordValidator::overrides),
    ("contraction", WordValidator::contraction),
    ("short_word", WordValidator::short_word),
    ("filter", WordValidator::filter),
    ("suggestion", WordValidator::suggestion),
];

/// Decides whether words belong to a language.
///
/// Holds a reusable edit-distance buffer, so one validator serves one
/// thread.
pub struct WordValidator {
    repository: Arc<DictionaryRepository>,
    distance: RefCell<EditDistance>,
}

impl WordValidator {
    pub fn new(repository: Arc<DictionaryRepository>) -> Self {
        Self {
            repository,
            distance: RefCell::new(EditDistance::new()),
        }
    }

    pub fn repository(&self) -> &Arc<DictionaryRepository> {
        &self.repository
    }

    /// Validate `word` as a word of `language`. With `allow_suggestion`, a
    /// near miss may be accepted together with its correction.
    pub fn validate(&self, word: &str, language: Language, allow_suggestion: bool) -> Validation {
        let original: Vec<char> = word.chars().collect();
        if original.is_empty() {
            return Validation::rejected();
        }
        let chars: Vec<char> = original
            .iter()
            .map(|&c| simple_lower(normalize_apostrophe(c)))
            .collect();
        let probe = Probe {
            original: &original,
            lower: chars.iter().collect(),
            chars,
            language,
            allow_suggestion,
            dict: self.repository.get(language),
        };

        for &(name, gate) in GATES {
            match gate(self, &probe) {
                Gate::Continue => {}
                Gate::Accept(corrected) => {
                    trace!(gate = name, word = %probe.lower, %language, ?corrected, "accepted");
                    return Validation::accepted(corrected);
                }
                Gate::Reject => {
                    trace!(gate = name, word = %probe.lower, %language, "rejected");
                    return Validation::rejected();
                }
            }
        }
        Validation::rejected()
    }

    /// Exact membership, bypassing the filter: override lists first, then
    /// the exact index (and the short-word list for one- and two-letter
    /// words).
    pub fn is_exact_word(&self, word: &str, language: Language) -> bool {
        let lower: String = word
            .chars()
            .map(|c| simple_lower(normalize_apostrophe(c)))
            .collect();
        if lower.is_empty() {
            return false;
        }
        let dict = self.repository.get(language);
        if dict.overrides().is_denied(&lower) {
            return false;
        }
        if dict.overrides().is_allowed(&lower) {
            return true;
        }
        if lower.chars().count() <= 2 && is_short_word(&lower, language) {
            return true;
        }
        dict.index().contains(&lower)
    }

    // -- gates --------------------------------------------------------------

    /// Digits, URLs, e-mail addresses and camelCase identifiers.
    fn non_word(&self, probe: &Probe<'_>) -> Gate {
        let word = probe.original;
        if word.iter().all(|c| c.is_ascii_digit()) || is_link(word) || is_camel_case(word) {
            Gate::Reject
        } else {
            Gate::Continue
        }
    }

    fn script(&self, probe: &Probe<'_>) -> Gate {
        if matches_script(&probe.chars, probe.language) {
            Gate::Continue
        } else {
            Gate::Reject
        }
    }

    fn overrides(&self, probe: &Probe<'_>) -> Gate {
        let overrides = probe.dict.overrides();
        if overrides.is_denied(&probe.lower) {
            Gate::Reject
        } else if overrides.is_allowed(&probe.lower) {
            Gate::Accept(None)
        } else {
            Gate::Continue
        }
    }

    fn contraction(&self, probe: &Probe<'_>) -> Gate {
        if probe.language != Language::English {
            return Gate::Continue;
        }
        let word = probe.lower.as_str();
        let Some(suffix) = CONTRACTIONS.iter().find(|s| word.ends_with(*s)) else {
            return Gate::Continue;
        };
        let base = &word[..word.len() - suffix.len()];
        // "can't" is "can" + "'t" while "don't" is "do" + "n't".
        let alternate = (*suffix == "n't").then(|| &word[..word.len() - 2]);

        let known = |base: &str| {
            if base.is_empty() {
                false
            } else if base.chars().count() <= 2 {
                is_short_word(base, Language::English)
            } else {
                probe.dict.index().might_contain(base)
            }
        };
        if known(base) || alternate.is_some_and(known) {
            Gate::Accept(None)
        } else {
            Gate::Continue
        }
    }

    fn short_word(&self, probe: &Probe<'_>) -> Gate {
        if probe.chars.len() > 2 {
            return Gate::Continue;
        }
        if is_short_word(&probe.lower, probe.language) {
            return Gate::Accept(None);
        }
        if !probe.allow_suggestion {
            return Gate::Reject;
        }

        let mut distance = self.distance.borrow_mut();
        let mut neighbours = short_words::short_words(probe.language)
            .iter()
            .filter(|candidate| {
                let candidate: Vec<char> = candidate.chars().collect();
                distance.distance_within(&probe.chars, &candidate, 1) == Some(1)
            });
        match (neighbours.next(), neighbours.next()) {
            (Some(only), None) => Gate::Accept(Some((*only).to_string())),
            _ => Gate::Reject,
        }
    }

    fn filter(&self, probe: &Probe<'_>) -> Gate {
        let index = probe.dict.index();
        if !index.might_contain(&probe.lower) {
            return Gate::Continue;
        }
        let lacks_vowel = match probe.language {
            Language::English => !has_core_english_vowel(&probe.chars),
            lang => !has_vowel(&probe.chars, lang),
        };
        let needs_exact = probe.chars.len() < 4 || lacks_vowel;
        if !needs_exact || index.contains(&probe.lower) {
            Gate::Accept(None)
        } else {
            Gate::Continue
        }
    }

    fn suggestion(&self, probe: &Probe<'_>) -> Gate {
        if !probe.allow_suggestion {
            return Gate::Reject;
        }
        let mut distance = self.distance.borrow_mut();
        let mut best: Option<(usize, &str)> = None;
        let mut candidate = Vec::new();
        for word in probe.dict.fuzzy_candidates(&probe.chars) {
            if probe.dict.overrides().is_denied(word) {
                continue;
            }
            candidate.clear();
            candidate.extend(word.chars());
            let Some(d) =
                distance.distance_within(&probe.chars, &candidate, MAX_SUGGESTION_DISTANCE)
            else {
                continue;
            };
            if !is_suggestion_acceptable(probe.chars.len(), candidate.len(), d) {
                trace!(candidate = word, distance = d, "suggestion not acceptable");
                continue;
            }
            if best.is_none_or(|(best_d, _)| d < best_d) {
                best = Some((d, word));
                if d <= 1 {
                    break;
                }
            }
        }
        match best {
            Some((_, word)) => Gate::Accept(Some(word.to_string())),
            None => Gate::Reject,
        }
    }
}

/// Whether a fuzzy match is close enough to replace the probe: lengths
/// differ by at most one and the distance is at most two (one for probes of
/// four scalars or fewer).
pub fn is_suggestion_acceptable(probe_len: usize, candidate_len: usize, distance: usize) -> bool {
    let limit = if probe_len <= 4 { 1 } else { 2 };
    probe_len.abs_diff(candidate_len) <= 1 && distance <= limit
}

/// URL-like (`x//x.x`), e-mail-like (`x@x.x`) or `www.x.x` shapes.
fn is_link(word: &[char]) -> bool {
    let n = word.len();
    if n < 4 {
        return false;
    }

    if let Some(slash) = word[..n - 3].iter().position(|&c| c == '/') {
        if word[slash + 1] == '/' && word[slash + 2..].contains(&'.') {
            return true;
        }
    }

    if let Some(at) = word.iter().position(|&c| c == '@') {
        if at > 0 && word[at + 1..].contains(&'.') {
            return true;
        }
    }

    n >= 5
        && word[..3].iter().all(|&c| simple_lower(c) == 'w')
        && word[3] == '.'
        && word[4..].contains(&'.')
}

/// A lowercase letter directly followed by an uppercase one.
fn is_camel_case(word: &[char]) -> bool {
    word.windows(2).any(|w| is_lower(w[0]) && is_upper(w[1]))
}
