// Per-language dictionary loading and caching

use std::path::{Path, PathBuf};
use std::sync::{Arc, OnceLock};
use std::time::Instant;

use keyswitch_core::Language;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::filter::DEFAULT_FALSE_POSITIVE_RATE;
use crate::fuzzy::{FuzzyConfig, FuzzyIndex};
use crate::index::DictionaryIndex;
use crate::normalize_word;
use crate::overrides::Overrides;
use crate::wordlist::WordList;

/// Binary dictionary file name for a language, e.g. `uk.ksd`.
pub fn binary_file_name(language: Language) -> String {
    format!("{}.ksd", language.code())
}

/// Plain-text word list file name, e.g. `uk.txt`.
pub fn text_file_name(language: Language) -> String {
    format!("{}.txt", language.code())
}

pub fn allow_file_name(language: Language) -> String {
    format!("{}_allow.txt", language.code())
}

pub fn deny_file_name(language: Language) -> String {
    format!("{}_deny.txt", language.code())
}

/// Settings applied when dictionaries are built or loaded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Target false-positive rate for filters built from text word lists.
    pub false_positive_rate: f64,
    pub fuzzy: FuzzyConfig,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            false_positive_rate: DEFAULT_FALSE_POSITIVE_RATE,
            fuzzy: FuzzyConfig::default(),
        }
    }
}

/// Everything known about one language: the exact index, its override
/// lists and a lazily built fuzzy index.
#[derive(Debug)]
pub struct LanguageDictionary {
    language: Language,
    index: DictionaryIndex,
    overrides: Overrides,
    fuzzy_config: FuzzyConfig,
    fuzzy: OnceLock<FuzzyIndex>,
}

impl LanguageDictionary {
    pub fn new(
        language: Language,
        index: DictionaryIndex,
        overrides: Overrides,
        fuzzy_config: FuzzyConfig,
    ) -> Self {
        Self {
            language,
            index,
            overrides,
            fuzzy_config,
            fuzzy: OnceLock::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn index(&self) -> &DictionaryIndex {
        &self.index
    }

    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    /// The fuzzy index, built on first use.
    pub fn fuzzy(&self) -> &FuzzyIndex {
        self.fuzzy.get_or_init(|| {
            let started = Instant::now();
            let fuzzy = FuzzyIndex::build(&self.index, &self.overrides, self.fuzzy_config);
            debug!(
                language = %self.language,
                shingles = fuzzy.shingle_count(),
                elapsed_ms = started.elapsed().as_millis() as u64,
                "built fuzzy index"
            );
            fuzzy
        })
    }

    /// Candidate words for an edit-distance search around `probe`.
    pub fn fuzzy_candidates(&self, probe: &[char]) -> impl Iterator<Item = &str> + '_ {
        self.fuzzy()
            .candidates(probe, &self.index)
            .into_iter()
            .filter_map(|ordinal| self.index.word_at(ordinal))
    }
}

/// Cache cell for one language.
///
/// Readers only take the shared side of `dict`. `loading` is held while the
/// dictionary is built so that concurrent first lookups load it once,
/// without blocking lookups of other languages.
#[derive(Debug, Default)]
struct Slot {
    dict: RwLock<Option<Arc<LanguageDictionary>>>,
    loading: Mutex<()>,
}

impl Slot {
    fn cached(&self) -> Option<Arc<LanguageDictionary>> {
        self.dict.read().clone()
    }

    fn store(&self, dict: Option<Arc<LanguageDictionary>>) {
        *self.dict.write() = dict;
    }
}

fn slot_index(language: Language) -> usize {
    match language {
        Language::English => 0,
        Language::Ukrainian => 1,
        Language::Russian => 2,
    }
}

/// Loads dictionaries from a directory on first use and caches them.
///
/// For each language the binary file is preferred. A missing or unreadable
/// binary falls back to the text word list, and a missing word list yields
/// an empty dictionary. Loading never fails.
#[derive(Debug)]
pub struct DictionaryRepository {
    dir: Option<PathBuf>,
    config: LoaderConfig,
    slots: [Slot; 3],
}

impl DictionaryRepository {
    /// A repository reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>, config: LoaderConfig) -> Self {
        Self {
            dir: Some(dir.into()),
            config,
            slots: Default::default(),
        }
    }

    /// A repository with no backing directory. Languages not injected with
    /// [`insert_words`](Self::insert_words) resolve to empty dictionaries.
    pub fn in_memory(config: LoaderConfig) -> Self {
        Self {
            dir: None,
            config,
            slots: Default::default(),
        }
    }

    pub fn dir(&self) -> Option<&Path> {
        self.dir.as_deref()
    }

    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    fn slot(&self, language: Language) -> &Slot {
        &self.slots[slot_index(language)]
    }

    /// The dictionary for `language`, loading it on first access.
    pub fn get(&self, language: Language) -> Arc<LanguageDictionary> {
        let slot = self.slot(language);
        if let Some(dict) = slot.cached() {
            return dict;
        }
        let _loading = slot.loading.lock();
        if let Some(dict) = slot.cached() {
            return dict;
        }
        let dict = Arc::new(self.load(language));
        slot.store(Some(Arc::clone(&dict)));
        dict
    }

    /// Whether `language` is already cached.
    pub fn is_loaded(&self, language: Language) -> bool {
        self.slot(language).dict.read().is_some()
    }

    /// Load the given languages now so later lookups don't pay for it.
    pub fn prewarm(&self, languages: &[Language]) {
        for &language in languages {
            self.get(language);
        }
    }

    /// Load `language` again and replace the cached dictionary. Lookups
    /// keep seeing the previous one until the new one is ready.
    pub fn reload(&self, language: Language) -> Arc<LanguageDictionary> {
        let slot = self.slot(language);
        let _loading = slot.loading.lock();
        let dict = Arc::new(self.load(language));
        slot.store(Some(Arc::clone(&dict)));
        dict
    }

    /// Drop every cached dictionary.
    pub fn clear(&self) {
        for slot in &self.slots {
            slot.store(None);
        }
    }

    /// Replace the dictionary for `language` with an in-memory one built from
    /// `words`. Override lists are still read from the directory, if any.
    pub fn insert_words<I, S>(&self, language: Language, words: I) -> Arc<LanguageDictionary>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let words = words.into_iter().filter_map(|w| normalize_word(w.as_ref()));
        let index = DictionaryIndex::from_words(words, self.config.false_positive_rate);
        let dict = LanguageDictionary::new(
            language,
            index,
            self.load_overrides(language),
            self.config.fuzzy,
        );
        self.insert(dict)
    }

    /// Cache a fully built dictionary, replacing any previous one.
    pub fn insert(&self, dict: LanguageDictionary) -> Arc<LanguageDictionary> {
        let dict = Arc::new(dict);
        self.slot(dict.language()).store(Some(Arc::clone(&dict)));
        dict
    }

    fn load(&self, language: Language) -> LanguageDictionary {
        let index = match &self.dir {
            Some(dir) => self.load_index(dir, language),
            None => DictionaryIndex::empty(),
        };
        LanguageDictionary::new(
            language,
            index,
            self.load_overrides(language),
            self.config.fuzzy,
        )
    }

    fn load_index(&self, dir: &Path, language: Language) -> DictionaryIndex {
        let started = Instant::now();

        let binary = dir.join(binary_file_name(language));
        if binary.is_file() {
            match DictionaryIndex::open(&binary) {
                Ok(index) => {
                    info!(
                        %language,
                        path = %binary.display(),
                        words = index.len(),
                        elapsed_ms = started.elapsed().as_millis() as u64,
                        "loaded binary dictionary"
                    );
                    return index;
                }
                Err(e) => warn!(
                    %language,
                    path = %binary.display(),
                    error = %e,
                    "unreadable binary dictionary, falling back to word list"
                ),
            }
        }

        let text = dir.join(text_file_name(language));
        match std::fs::read_to_string(&text) {
            Ok(contents) => {
                let list = WordList::parse(&contents, language);
                let stats = *list.stats();
                let index =
                    DictionaryIndex::from_words(list.into_words(), self.config.false_positive_rate);
                info!(
                    %language,
                    path = %text.display(),
                    words = index.len(),
                    skipped = stats.phrases + stats.invalid + stats.too_short,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "loaded word list"
                );
                index
            }
            Err(e) => {
                warn!(
                    %language,
                    dir = %dir.display(),
                    error = %e,
                    "no dictionary found, using an empty one"
                );
                DictionaryIndex::empty()
            }
        }
    }

    fn load_overrides(&self, language: Language) -> Overrides {
        let Some(dir) = &self.dir else {
            return Overrides::default();
        };
        match Overrides::load(
            &dir.join(allow_file_name(language)),
            &dir.join(deny_file_name(language)),
        ) {
            Ok(overrides) => overrides,
            Err(e) => {
                warn!(%language, error = %e, "unreadable override list, ignoring overrides");
                Overrides::default()
            }
        }
    }
}
