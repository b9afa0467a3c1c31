// Wrong-layout detection over a stream of typed characters

pub mod context;
pub mod state;

use std::sync::Arc;

use keyswitch_core::case::{CasePattern, detect_case, transfer_case};
use keyswitch_core::character::{
    RUSSIAN_ONLY_LETTERS, UKRAINIAN_ONLY_LETTERS, WordScript, has_vowel, simple_lower,
    word_script,
};
use keyswitch_core::token::{Affixes, split_trailing_boundary};
use keyswitch_core::{Language, Script, UkVariant};
use keyswitch_dict::DictionaryRepository;
use tracing::{debug, trace};

use crate::config::DetectorConfig;
use crate::mapper;
use crate::validator::WordValidator;

use context::{History, LowConfidenceCounter, Outcome, PendingShort};
use state::{Effect, Event, Phase, transition};

/// A correction decision for one flushed word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectionResult {
    /// Layout the text was typed under.
    pub source: Language,
    /// Layout the user meant.
    pub target: Language,
    /// The text as typed (without trailing boundary punctuation).
    pub original: String,
    /// The text as intended.
    pub corrected: String,
    /// Whether the caller should also switch the active layout.
    pub should_switch_layout: bool,
}

/// Receives corrections as they are detected.
pub trait CorrectionSink {
    /// `boundary` is the text that ended the word (trailing punctuation
    /// plus the caller-supplied boundary).
    fn on_correction(&mut self, result: &DetectionResult, boundary: &str);
}

impl<F> CorrectionSink for F
where
    F: FnMut(&DetectionResult, &str),
{
    fn on_correction(&mut self, result: &DetectionResult, boundary: &str) {
        self(result, boundary)
    }
}

/// A conversion that passed validation.
struct Accepted {
    target: Language,
    corrected: String,
    low_confidence: bool,
}

/// Buffers typed characters and decides at each word boundary whether the
/// word was typed under the wrong layout.
///
/// Never fails: anything it cannot make sense of is left alone.
pub struct LayoutDetector {
    config: DetectorConfig,
    validator: WordValidator,
    current_layout: Language,
    phase: Phase,
    buffer: Vec<char>,
    history: History,
    low_confidence: LowConfidenceCounter,
    pending: Option<PendingShort>,
    sink: Option<Box<dyn CorrectionSink + Send>>,
}

impl LayoutDetector {
    pub fn new(repository: Arc<DictionaryRepository>, config: DetectorConfig) -> Self {
        Self {
            history: History::new(config.history_window),
            current_layout: Language::English,
            validator: WordValidator::new(repository),
            config,
            phase: Phase::Idle,
            buffer: Vec::new(),
            low_confidence: LowConfidenceCounter::default(),
            pending: None,
            sink: None,
        }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn validator(&self) -> &WordValidator {
        &self.validator
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The word typed so far.
    pub fn buffer(&self) -> String {
        self.buffer.iter().collect()
    }

    pub fn current_layout(&self) -> Language {
        self.current_layout
    }

    /// Tell the detector which layout is active.
    pub fn set_current_layout(&mut self, layout: Language) {
        self.current_layout = layout;
    }

    /// Install the callback invoked for every correction.
    pub fn set_sink<S: CorrectionSink + Send + 'static>(&mut self, sink: S) {
        self.sink = Some(Box::new(sink));
    }

    pub fn clear_sink(&mut self) {
        self.sink = None;
    }

    pub fn add_character(&mut self, c: char) {
        self.apply(Event::Character(c));
    }

    pub fn delete_last_character(&mut self) {
        self.apply(Event::DeleteLast);
    }

    /// End the current word. Trailing punctuation in the buffer is moved in
    /// front of `boundary`. Returns the correction, if any; the sink sees
    /// the same result.
    pub fn flush_buffer(&mut self, boundary: Option<&str>) -> Option<DetectionResult> {
        self.apply(Event::Flush(boundary.map(str::to_owned)))
    }

    /// Forget the buffer and all cross-word context.
    pub fn reset(&mut self) {
        self.apply(Event::Reset);
    }

    /// The caller starts retyping a correction; input is ignored until
    /// [`end_correction`](Self::end_correction).
    pub fn begin_correction(&mut self) {
        self.apply(Event::BeginCorrection);
    }

    pub fn end_correction(&mut self) {
        self.apply(Event::EndCorrection);
    }

    fn apply(&mut self, event: Event) -> Option<DetectionResult> {
        let t = transition(self.phase, &event, self.buffer.len());
        let mut result = None;
        for effect in t.effects {
            match effect {
                Effect::Append(c) => self.buffer.push(c),
                Effect::Pop => {
                    self.buffer.pop();
                }
                Effect::Clear => self.buffer.clear(),
                Effect::Detect(boundary) => {
                    self.phase = Phase::Detecting;
                    result = self.detect(&boundary);
                }
                Effect::DropPending => self.pending = None,
                Effect::ResetContext => {
                    self.history.clear();
                    self.low_confidence.reset();
                    self.pending = None;
                }
            }
        }
        // Detection is synchronous, so the detecting phase ends here.
        self.phase = match t.next {
            Phase::Detecting => Phase::Idle,
            next => next,
        };
        result
    }

    fn detect(&mut self, external_boundary: &str) -> Option<DetectionResult> {
        let (core, trailing) = split_trailing_boundary(&self.buffer);
        let word: String = core.iter().collect();
        let boundary: String = trailing.iter().copied().chain(external_boundary.chars()).collect();

        let result = self.detect_word(&word, &boundary)?;
        if let Some(sink) = self.sink.as_mut() {
            sink.on_correction(&result, &boundary);
        }
        Some(result)
    }

    fn detect_word(&mut self, word: &str, boundary: &str) -> Option<DetectionResult> {
        let chars: Vec<char> = word.chars().collect();
        if chars.is_empty() {
            return None;
        }

        // Mixed-script and letterless tokens leave the context untouched.
        let Some(source) = self.effective_source(&chars) else {
            trace!(word, "no source layout");
            return None;
        };

        if self.is_valid_in_source(word, source) {
            self.low_confidence.reset();
            self.pending = None;
            self.history.record(Outcome::Valid);
            return None;
        }

        let conversions = self.conversions(word, source);

        if let Some(accepted) = self.accept_conversion(&chars, source, &conversions) {
            return self.emit(word, boundary, source, accepted, &chars);
        }

        if let Some(result) = self.acronym(&chars, word, source, &conversions) {
            return Some(result);
        }

        self.finish_unknown();
        None
    }

    /// Layout the word was typed under, or `None` when it cannot be told.
    fn effective_source(&self, chars: &[char]) -> Option<Language> {
        let source = match word_script(chars) {
            WordScript::Single(Script::Latin) => Language::English,
            WordScript::Single(Script::Cyrillic) => {
                if self.current_layout.is_cyrillic() {
                    self.current_layout
                } else if chars.iter().any(|c| UKRAINIAN_ONLY_LETTERS.contains(&simple_lower(*c))) {
                    Language::Ukrainian
                } else if chars.iter().any(|c| RUSSIAN_ONLY_LETTERS.contains(&simple_lower(*c))) {
                    Language::Russian
                } else {
                    self.current_layout
                }
            }
            WordScript::Mixed | WordScript::NoLetters => return None,
        };
        self.config.is_enabled(source).then_some(source)
    }

    fn is_valid_in_source(&self, word: &str, source: Language) -> bool {
        let v = self.validator.validate(word, source, false);
        v.is_valid && (source == Language::English || self.validator.is_exact_word(word, source))
    }

    /// Every distinct conversion into an enabled layout, in layout order.
    /// Ukrainian input is read under both variants when converting to
    /// English.
    fn conversions(&self, word: &str, source: Language) -> Vec<(Language, String)> {
        let preferred = self.config.ukrainian_variant;
        let mut variants = vec![preferred];
        if source == Language::Ukrainian {
            variants.extend(UkVariant::ALL.into_iter().filter(|&v| v != preferred));
        }

        let mut out: Vec<(Language, String)> = Vec::new();
        for (i, &variant) in variants.iter().enumerate() {
            for (target, converted) in
                mapper::convert_to_alternatives(word, source, variant, preferred)
            {
                // Other variants only matter for the English reading.
                if i > 0 && target != Language::English {
                    continue;
                }
                if self.config.is_enabled(target)
                    && !out.iter().any(|(t, c)| *t == target && *c == converted)
                {
                    out.push((target, converted));
                }
            }
        }
        out.sort_by_key(|(target, _)| *target);
        out
    }

    /// First conversion whose core validates: exact hits in every target
    /// first, then edit-distance suggestions.
    fn accept_conversion(
        &self,
        original: &[char],
        source: Language,
        conversions: &[(Language, String)],
    ) -> Option<Accepted> {
        let vowelless = !has_vowel(original, source);
        for with_suggestions in [false, true] {
            for (target, converted) in conversions {
                let affixes = Affixes::split(converted);
                if affixes.core.is_empty() {
                    continue;
                }
                let core_len = affixes.core.chars().count();
                let suggestions_allowed = with_suggestions
                    && source == Language::English
                    && *target != Language::English
                    && (self.config.suggestion_min_length..=self.config.suggestion_max_length)
                        .contains(&core_len)
                    && (vowelless || !self.config.suggestion_requires_vowelless);
                if with_suggestions && !suggestions_allowed {
                    continue;
                }

                let v = self
                    .validator
                    .validate(affixes.core, *target, suggestions_allowed);
                if !v.is_valid {
                    continue;
                }

                let suggestion = v
                    .corrected
                    .filter(|c| *c != affixes.core.to_lowercase());
                let used_suggestion = suggestion.is_some();
                let core = match suggestion {
                    Some(c) if self.validator.is_exact_word(&c, *target) => c,
                    Some(c) => {
                        trace!(target = %target, suggestion = %c, "suggestion is not an exact word");
                        continue;
                    }
                    None => affixes.core.to_string(),
                };

                let core_chars: Vec<char> = affixes.core.chars().collect();
                return Some(Accepted {
                    target: *target,
                    corrected: affixes.rejoin(&transfer_case(&core_chars, &core)),
                    low_confidence: used_suggestion
                        || original.len() <= self.config.low_confidence_max_length,
                });
            }
        }
        None
    }

    fn emit(
        &mut self,
        word: &str,
        boundary: &str,
        source: Language,
        accepted: Accepted,
        chars: &[char],
    ) -> Option<DetectionResult> {
        let Accepted {
            target,
            corrected,
            low_confidence,
        } = accepted;

        if chars.len() <= self.config.suppress_max_length
            && low_confidence
            && self
                .history
                .is_strong_context(self.config.strong_context_valid_words)
        {
            debug!(%source, %target, original = word, %corrected, "holding back short correction");
            self.pending = Some(PendingShort {
                original: word.to_string(),
                converted: corrected,
                target,
                boundary: boundary.to_string(),
            });
            self.history.record(Outcome::Suppressed);
            return None;
        }

        let should_switch_layout = if low_confidence {
            self.low_confidence
                .hit(target, self.config.low_confidence_confirmations)
        } else {
            self.low_confidence.reset();
            true
        };

        let mut result = DetectionResult {
            source,
            target,
            original: word.to_string(),
            corrected,
            should_switch_layout,
        };

        if let Some(pending) = self.pending.take() {
            let stronger = chars.len() > pending.original.chars().count()
                || should_switch_layout
                || !low_confidence;
            if pending.target == target && stronger {
                result.original = format!("{}{}{}", pending.original, pending.boundary, result.original);
                result.corrected = format!(
                    "{}{}{}",
                    pending.converted, pending.boundary, result.corrected
                );
                debug!(original = %result.original, "merged held-back short correction");
            }
        }

        debug!(
            %source,
            %target,
            original = %result.original,
            corrected = %result.corrected,
            switch = result.should_switch_layout,
            "correction"
        );
        self.history.record(Outcome::Corrected);
        Some(result)
    }

    /// Short all-caps vowelless tokens (acronyms typed in the wrong layout)
    /// convert to the first layout in which they read as a single script.
    fn acronym(
        &mut self,
        chars: &[char],
        word: &str,
        source: Language,
        conversions: &[(Language, String)],
    ) -> Option<DetectionResult> {
        let cfg = &self.config;
        if !(cfg.acronym_min_length..=cfg.acronym_max_length).contains(&chars.len())
            || detect_case(chars) != CasePattern::AllUpper
            || has_vowel(chars, source)
        {
            return None;
        }

        let (target, converted) = conversions.iter().find(|(target, converted)| {
            let core: Vec<char> = Affixes::split(converted).core.chars().collect();
            word_script(&core) == WordScript::Single(target.script())
        })?;

        self.pending = None;
        if chars.len() <= cfg.suppress_max_length
            && self.history.is_strong_context(cfg.strong_context_valid_words)
        {
            debug!(%source, %target, original = word, "holding back acronym");
            self.history.record(Outcome::Suppressed);
            return None;
        }

        debug!(%source, %target, original = word, corrected = %converted, "acronym");
        self.history.record(Outcome::Corrected);
        Some(DetectionResult {
            source,
            target: *target,
            original: word.to_string(),
            corrected: converted.clone(),
            should_switch_layout: false,
        })
    }

    fn finish_unknown(&mut self) {
        self.pending = None;
        self.history.record(Outcome::Unknown);
    }
}
