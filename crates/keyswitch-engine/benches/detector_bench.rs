// Criterion benchmarks for keyswitch-engine.
//
// Uses the dictionaries in KEYSWITCH_DICT_PATH when set (en/uk/ru, binary or
// text). Otherwise a small synthetic word list is generated in memory, which
// is enough to compare runs but not representative of real dictionary sizes.
//
// Run:
//   cargo bench -p keyswitch-engine
//   KEYSWITCH_DICT_PATH=/path/to/dict cargo bench -p keyswitch-engine

use std::hint::black_box;
use std::sync::Arc;

use criterion::{Criterion, criterion_group, criterion_main};
use keyswitch_core::{Language, UkVariant};
use keyswitch_dict::{DictionaryRepository, EditDistance, LoaderConfig};
use keyswitch_engine::{DetectorConfig, LayoutDetector, WordValidator, mapper};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

const ENGLISH: &[&str] = &[
    "hello", "world", "after", "layout", "keyboard", "typing", "morning", "window", "simple",
    "detect", "switch", "letter", "number", "string", "between",
];

const RUSSIAN: &[&str] = &[
    "привет", "мир", "дом", "говорит", "знаю", "клавиатура", "раскладка", "слово", "утро",
    "письмо", "быстро", "между",
];

const UKRAINIAN: &[&str] = &[
    "привіт", "слово", "мова", "дякую", "клавіатура", "розкладка", "ранок", "лист", "швидко",
];

/// Text typed with the English layout active, mixing right and wrong words.
const STREAM: &str = "hello ghbdtn world vbh ljv ujdjhbn keyboard rkfdbfnehf after yt pyf. \
                      typing hfcrkflrf switch";

/// Pads each base list with suffixed variants so lookups hit a few thousand
/// entries rather than a handful.
fn synthetic(words: &[&str], suffixes: &[&str]) -> Vec<String> {
    let mut out = Vec::new();
    for word in words {
        out.push((*word).to_string());
        for suffix in suffixes {
            out.push(format!("{word}{suffix}"));
        }
    }
    out
}

fn repository() -> Arc<DictionaryRepository> {
    if let Ok(dir) = std::env::var("KEYSWITCH_DICT_PATH") {
        let repo = DictionaryRepository::new(dir, LoaderConfig::default());
        repo.prewarm(&Language::ALL);
        return Arc::new(repo);
    }

    let repo = DictionaryRepository::in_memory(LoaderConfig::default());
    repo.insert_words(Language::English, synthetic(ENGLISH, &["s", "ed", "ing", "er"]));
    repo.insert_words(Language::Russian, synthetic(RUSSIAN, &["а", "ы", "ом", "ами"]));
    repo.insert_words(Language::Ukrainian, synthetic(UKRAINIAN, &["а", "и", "ом", "ами"]));
    Arc::new(repo)
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Feed the whole stream through a detector, character by character.
fn bench_detect_stream(c: &mut Criterion) {
    let repo = repository();
    c.bench_function("detect_stream", |b| {
        b.iter(|| {
            let mut detector = LayoutDetector::new(Arc::clone(&repo), DetectorConfig::default());
            for word in STREAM.split(' ') {
                for ch in word.chars() {
                    detector.add_character(ch);
                }
                black_box(detector.flush_buffer(Some(" ")));
            }
        });
    });
}

fn bench_validate_exact(c: &mut Criterion) {
    let validator = WordValidator::new(repository());
    c.bench_function("validate_exact", |b| {
        b.iter(|| {
            for word in ENGLISH {
                black_box(validator.validate(word, Language::English, false));
            }
            for word in RUSSIAN {
                black_box(validator.validate(word, Language::Russian, false));
            }
        });
    });
}

/// Near misses that reach the suggestion gate.
fn bench_validate_suggestion(c: &mut Criterion) {
    let validator = WordValidator::new(repository());
    let typos = ["привт", "говорт", "клавиатра", "раскладк", "мжду"];
    c.bench_function("validate_suggestion", |b| {
        b.iter(|| {
            for word in typos {
                black_box(validator.validate(word, Language::Russian, true));
            }
        });
    });
}

fn bench_convert(c: &mut Criterion) {
    c.bench_function("convert_alternatives", |b| {
        b.iter(|| {
            for word in STREAM.split(' ') {
                black_box(mapper::convert_to_alternatives(
                    word,
                    Language::English,
                    UkVariant::Standard,
                    UkVariant::Standard,
                ));
            }
        });
    });
}

fn bench_edit_distance(c: &mut Criterion) {
    let pairs: Vec<(Vec<char>, Vec<char>)> = [
        ("клавиатура", "клавиатра"),
        ("раскладка", "раскладк"),
        ("keyboard", "keybaord"),
        ("between", "betwene"),
    ]
    .iter()
    .map(|(a, b)| (a.chars().collect(), b.chars().collect()))
    .collect();
    let mut distance = EditDistance::new();

    c.bench_function("edit_distance_within_2", |b| {
        b.iter(|| {
            for (a, b) in &pairs {
                black_box(distance.distance_within(a, b, 2));
            }
        });
    });
}

criterion_group!(
    benches,
    bench_detect_stream,
    bench_validate_exact,
    bench_validate_suggestion,
    bench_convert,
    bench_edit_distance,
);
criterion_main!(benches);
