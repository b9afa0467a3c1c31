//! End-to-end detector scenarios over small in-memory dictionaries.

use std::sync::{Arc, Mutex};

use keyswitch_core::Language::{self, English, Russian, Ukrainian};
use keyswitch_core::UkVariant;
use keyswitch_dict::format::encode_dictionary;
use keyswitch_dict::{DictionaryRepository, LoaderConfig};
use keyswitch_engine::{DetectionResult, DetectorConfig, LayoutDetector, Phase};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// A filter this tight keeps accidental hits out of the scenarios.
fn loader_config() -> LoaderConfig {
    LoaderConfig {
        false_positive_rate: 1e-6,
        ..LoaderConfig::default()
    }
}

fn repository() -> Arc<DictionaryRepository> {
    let repo = DictionaryRepository::in_memory(loader_config());
    repo.insert_words(
        English,
        ["hello", "world", "after", "the", "good", "morning", "today"],
    );
    repo.insert_words(Russian, ["привет", "мир", "дом", "говорит", "знаю", "как"]);
    repo.insert_words(Ukrainian, ["привіт", "слово", "мова", "дякую"]);
    Arc::new(repo)
}

fn detector() -> LayoutDetector {
    LayoutDetector::new(repository(), DetectorConfig::default())
}

fn detector_with(layouts: &[Language]) -> LayoutDetector {
    let config = DetectorConfig {
        enabled_layouts: layouts.to_vec(),
        ..DetectorConfig::default()
    };
    LayoutDetector::new(repository(), config)
}

fn type_word(d: &mut LayoutDetector, word: &str) -> Option<DetectionResult> {
    for c in word.chars() {
        d.add_character(c);
    }
    d.flush_buffer(Some(" "))
}

fn corrected(result: &Option<DetectionResult>) -> Option<&str> {
    result.as_ref().map(|r| r.corrected.as_str())
}

// ---------------------------------------------------------------------------
// Basic detection
// ---------------------------------------------------------------------------

#[test]
fn english_keys_typed_for_russian_word() {
    let mut d = detector();
    let result = type_word(&mut d, "ghbdtn").expect("correction");
    assert_eq!(result.source, English);
    assert_eq!(result.target, Russian);
    assert_eq!(result.original, "ghbdtn");
    assert_eq!(result.corrected, "привет");
    assert!(result.should_switch_layout);
}

#[test]
fn valid_english_word_is_left_alone() {
    let mut d = detector();
    assert_eq!(type_word(&mut d, "hello"), None);
    assert_eq!(type_word(&mut d, "Hello"), None);
}

#[test]
fn mixed_script_word_is_left_alone() {
    let mut d = detector();
    assert_eq!(type_word(&mut d, "heллo"), None);
    assert_eq!(type_word(&mut d, "2024"), None);
}

#[test]
fn detector_can_move_to_another_thread() {
    fn assert_send<T: Send>() {}
    assert_send::<LayoutDetector>();

    let mut d = detector();
    let (tx, rx) = std::sync::mpsc::channel();
    d.set_sink(move |r: &DetectionResult, _: &str| {
        let _ = tx.send(r.corrected.clone());
    });
    let handle = std::thread::spawn(move || type_word(&mut d, "ghbdtn"));
    assert_eq!(corrected(&handle.join().unwrap()), Some("привет"));
    assert_eq!(rx.recv().unwrap(), "привет");
}

#[test]
fn legacy_ukrainian_variant_places_the_apostrophe() {
    // The apostrophe sits on the backslash key in the legacy layout and on
    // the backquote key in the standard one.
    let repo = repository();
    repo.insert_words(Ukrainian, ["привіт", "слово", "мова", "дякую", "п'ятниця"]);
    let legacy = DetectorConfig {
        ukrainian_variant: UkVariant::Legacy,
        ..DetectorConfig::default()
    };

    let mut d = LayoutDetector::new(Arc::clone(&repo), legacy);
    let result = type_word(&mut d, "g\\znybwz").expect("correction");
    assert_eq!(result.target, Ukrainian);
    assert_eq!(result.corrected, "п'ятниця");
    assert!(result.should_switch_layout);

    let mut d = LayoutDetector::new(Arc::clone(&repo), DetectorConfig::default());
    assert_eq!(type_word(&mut d, "g\\znybwz"), None);
    assert_eq!(corrected(&type_word(&mut d, "g`znybwz")), Some("п'ятниця"));
}

#[test]
fn ukrainian_keys_typed_for_english_word() {
    let mut d = detector();
    d.set_current_layout(Ukrainian);
    let result = type_word(&mut d, "фаеук").expect("correction");
    assert_eq!(result.source, Ukrainian);
    assert_eq!(result.target, English);
    assert_eq!(result.corrected, "after");
    assert!(result.should_switch_layout);
}

#[test]
fn russian_keys_typed_for_english_word() {
    let mut d = detector();
    d.set_current_layout(Russian);
    let result = type_word(&mut d, "руддщ").expect("correction");
    assert_eq!(result.source, Russian);
    assert_eq!(result.target, English);
    assert_eq!(result.corrected, "hello");
}

#[test]
fn valid_cyrillic_word_is_left_alone() {
    let mut d = detector();
    d.set_current_layout(Russian);
    assert_eq!(type_word(&mut d, "привет"), None);
}

#[test]
fn casing_and_punctuation_are_kept() {
    let mut d = detector();
    let boundaries = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&boundaries);
    d.set_sink(move |r: &DetectionResult, boundary: &str| {
        sink.lock().unwrap().push((r.corrected.clone(), boundary.to_string()));
    });

    for c in "Ghbdtn!".chars() {
        d.add_character(c);
    }
    let result = d.flush_buffer(Some(" ")).expect("correction");
    assert_eq!(result.original, "Ghbdtn");
    assert_eq!(result.corrected, "Привет");
    assert_eq!(
        boundaries.lock().unwrap().as_slice(),
        &[("Привет".to_string(), "! ".to_string())]
    );

    assert_eq!(corrected(&type_word(&mut d, "GHBDTN")), Some("ПРИВЕТ"));
}

// ---------------------------------------------------------------------------
// Confidence and switching
// ---------------------------------------------------------------------------

#[test]
fn two_low_confidence_hits_request_a_switch() {
    let mut d = detector();
    let first = type_word(&mut d, "vbh").expect("first correction");
    assert_eq!(first.corrected, "мир");
    assert!(!first.should_switch_layout);

    let second = type_word(&mut d, "ljv").expect("second correction");
    assert_eq!(second.corrected, "дом");
    assert!(second.should_switch_layout);
}

#[test]
fn valid_word_resets_low_confidence_counter() {
    let mut d = detector();
    type_word(&mut d, "vbh").expect("correction");
    assert_eq!(type_word(&mut d, "hello"), None);
    let result = type_word(&mut d, "ljv").expect("correction");
    assert!(!result.should_switch_layout);
}

#[test]
fn suggestion_fixes_a_typo_with_low_confidence() {
    let mut d = detector_with(&[English, Russian]);
    // "привт": the "е" was missed.
    let result = type_word(&mut d, "ghbdn").expect("correction");
    assert_eq!(result.target, Russian);
    assert_eq!(result.corrected, "привет");
    assert!(!result.should_switch_layout);
}

#[test]
fn exact_hit_wins_over_earlier_suggestion() {
    // Ukrainian comes first and "привіт" is one edit from "привет", but
    // Russian has the exact word.
    let mut d = detector();
    let result = type_word(&mut d, "ghbdtn").expect("correction");
    assert_eq!(result.target, Russian);
}

#[test]
fn suggestions_are_not_offered_when_vowels_are_present() {
    let mut d = detector_with(&[English, Russian]);
    // "привег" is one edit from "привет", but "u" is an English vowel.
    assert_eq!(type_word(&mut d, "ghbdtu"), None);
}

// ---------------------------------------------------------------------------
// Short-word suppression
// ---------------------------------------------------------------------------

#[test]
fn suppressed_short_word_merges_with_strong_next_word() {
    let mut d = detector_with(&[English, Russian]);
    assert_eq!(type_word(&mut d, "hello"), None);
    assert_eq!(type_word(&mut d, "world"), None);

    // "не" on its own is too weak after two English words.
    assert_eq!(type_word(&mut d, "yt"), None);

    let result = type_word(&mut d, "ujdjhbn").expect("merged correction");
    assert_eq!(result.original, "yt ujdjhbn");
    assert_eq!(result.corrected, "не говорит");
    assert_eq!(result.target, Russian);
    assert!(result.should_switch_layout);
}

#[test]
fn pending_short_word_is_dropped_by_a_valid_word() {
    let mut d = detector_with(&[English, Russian]);
    type_word(&mut d, "hello");
    type_word(&mut d, "world");
    assert_eq!(type_word(&mut d, "yt"), None);
    assert_eq!(type_word(&mut d, "today"), None);

    let result = type_word(&mut d, "ujdjhbn").expect("correction");
    assert_eq!(result.original, "ujdjhbn");
    assert_eq!(result.corrected, "говорит");
}

#[test]
fn short_word_without_context_is_emitted() {
    let mut d = detector_with(&[English, Russian]);
    let result = type_word(&mut d, "yt").expect("correction");
    assert_eq!(result.corrected, "не");
    assert!(!result.should_switch_layout);
}

#[test]
fn mixed_script_word_keeps_held_back_short_word() {
    let mut d = detector_with(&[English, Russian]);
    type_word(&mut d, "hello");
    type_word(&mut d, "world");
    assert_eq!(type_word(&mut d, "yt"), None);
    assert_eq!(type_word(&mut d, "heллo"), None);

    let result = type_word(&mut d, "ujdjhbn").expect("merged correction");
    assert_eq!(result.original, "yt ujdjhbn");
    assert_eq!(result.corrected, "не говорит");
}

#[test]
fn reset_forgets_context() {
    let mut d = detector_with(&[English, Russian]);
    type_word(&mut d, "hello");
    type_word(&mut d, "world");
    d.reset();
    assert_eq!(corrected(&type_word(&mut d, "yt")), Some("не"));
}

// ---------------------------------------------------------------------------
// Acronyms
// ---------------------------------------------------------------------------

#[test]
fn vowelless_acronym_is_converted_to_first_single_script_layout() {
    let mut d = detector();
    let result = type_word(&mut d, "VDL").expect("acronym");
    assert_eq!(result.corrected, "МВД");
    assert_eq!(result.target, Ukrainian);
    assert!(!result.should_switch_layout);
}

#[test]
fn acronym_in_russian_only_setup() {
    let mut d = detector_with(&[English, Russian]);
    let result = type_word(&mut d, "VDL").expect("acronym");
    assert_eq!(result.target, Russian);
}

#[test]
fn two_letter_acronym_is_held_back_after_valid_words() {
    let mut d = detector_with(&[English, Russian]);
    assert_eq!(corrected(&type_word(&mut d, "VD")), Some("МВ"));

    let mut d = detector_with(&[English, Russian]);
    type_word(&mut d, "hello");
    type_word(&mut d, "world");
    assert_eq!(type_word(&mut d, "VD"), None);

    // Three letters are past the suppression length.
    assert_eq!(corrected(&type_word(&mut d, "VDL")), Some("МВД"));
}

// ---------------------------------------------------------------------------
// Buffer handling
// ---------------------------------------------------------------------------

#[test]
fn backspace_edits_the_buffer() {
    let mut d = detector();
    for c in "ghbdtnn".chars() {
        d.add_character(c);
    }
    d.delete_last_character();
    assert_eq!(d.buffer(), "ghbdtn");
    assert_eq!(corrected(&d.flush_buffer(None)), Some("привет"));
    assert_eq!(d.phase(), Phase::Idle);
    assert!(d.buffer().is_empty());
}

#[test]
fn input_during_correction_is_ignored() {
    let mut d = detector();
    d.add_character('x');
    d.begin_correction();
    assert_eq!(d.phase(), Phase::Correcting);
    assert!(d.buffer().is_empty());

    assert_eq!(type_word(&mut d, "ghbdtn"), None);
    assert!(d.buffer().is_empty());

    d.end_correction();
    assert_eq!(d.phase(), Phase::Idle);
    assert!(type_word(&mut d, "ghbdtn").is_some());
}

#[test]
fn empty_flush_is_a_no_op() {
    let mut d = detector();
    assert_eq!(d.flush_buffer(Some(" ")), None);
    assert_eq!(d.phase(), Phase::Idle);
}

#[test]
fn disabled_target_is_never_produced() {
    // Without Russian the nearest Ukrainian word is offered instead.
    let mut d = detector_with(&[English, Ukrainian]);
    let result = type_word(&mut d, "ghbdtn").expect("correction");
    assert_eq!(result.target, Ukrainian);
    assert_eq!(result.corrected, "привіт");
    assert!(!result.should_switch_layout);
}

// ---------------------------------------------------------------------------
// Dictionaries on disk
// ---------------------------------------------------------------------------

#[test]
fn detects_with_dictionaries_loaded_from_a_directory() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("en.txt"), "hello\nworld\n").unwrap();
    let ru = encode_dictionary(["привет", "мир"], None).unwrap();
    std::fs::write(dir.path().join("ru.ksd"), ru).unwrap();
    std::fs::write(dir.path().join("ru_deny.txt"), "мир\n").unwrap();

    let repo = Arc::new(DictionaryRepository::new(dir.path(), loader_config()));
    let mut d = LayoutDetector::new(repo, DetectorConfig::default());

    assert_eq!(corrected(&type_word(&mut d, "ghbdtn")), Some("привет"));
    assert_eq!(type_word(&mut d, "vbh"), None);
}
