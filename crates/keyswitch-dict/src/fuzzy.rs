// Shingle index for fuzzy candidate retrieval

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::index::DictionaryIndex;
use crate::overrides::Overrides;

/// Three consecutive scalars. Words shorter than three are padded with NUL
/// and form a single shingle.
pub type Shingle = [char; 3];

/// Tuning for candidate retrieval.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzyConfig {
    /// Candidates whose length differs from the probe by more are dropped.
    pub max_length_delta: usize,
    /// Hard cap on returned candidates.
    pub max_candidates: usize,
    /// Below this many overlap hits, the probe's first-scalar partition is
    /// scanned as well.
    pub min_overlap_candidates: usize,
}

impl Default for FuzzyConfig {
    fn default() -> Self {
        Self {
            max_length_delta: 2,
            max_candidates: 512,
            min_overlap_candidates: 8,
        }
    }
}

/// Split a word into its shingles, in order of occurrence.
pub fn shingles(word: &[char]) -> Vec<Shingle> {
    if word.len() < 3 {
        let mut s = ['\0'; 3];
        s[..word.len()].copy_from_slice(word);
        return vec![s];
    }
    word.windows(3).map(|w| [w[0], w[1], w[2]]).collect()
}

/// Maps every shingle to the ordinals of the dictionary words containing it.
#[derive(Debug)]
pub struct FuzzyIndex {
    postings: HashMap<Shingle, Vec<u32>>,
    /// Scalar length per ordinal; `None` for deny-listed or unreadable words.
    lengths: Vec<Option<usize>>,
    config: FuzzyConfig,
}

impl FuzzyIndex {
    /// Build the index over every readable, non-deny-listed word.
    pub fn build(index: &DictionaryIndex, overrides: &Overrides, config: FuzzyConfig) -> Self {
        let mut postings: HashMap<Shingle, Vec<u32>> = HashMap::new();
        let mut lengths = vec![None; index.len()];
        let mut chars = Vec::new();

        for (ordinal, word) in index.iter() {
            if overrides.is_denied(word) {
                continue;
            }
            chars.clear();
            chars.extend(word.chars());
            lengths[ordinal as usize] = Some(chars.len());
            let mut seen = HashSet::new();
            for s in shingles(&chars) {
                if seen.insert(s) {
                    postings.entry(s).or_default().push(ordinal);
                }
            }
        }

        for word in overrides.allowed() {
            if index.contains(word) || overrides.is_denied(word) {
                continue;
            }
            chars.clear();
            chars.extend(word.chars());
            for s in shingles(&chars) {
                postings.entry(s).or_default();
            }
        }

        Self {
            postings,
            lengths,
            config,
        }
    }

    pub fn config(&self) -> &FuzzyConfig {
        &self.config
    }

    pub fn shingle_count(&self) -> usize {
        self.postings.len()
    }

    fn length_ok(&self, ordinal: u32, probe_len: usize) -> bool {
        self.lengths
            .get(ordinal as usize)
            .copied()
            .flatten()
            .is_some_and(|len| len.abs_diff(probe_len) <= self.config.max_length_delta)
    }

    /// Candidate ordinals for `probe`, best shingle overlap first.
    pub fn candidates(&self, probe: &[char], index: &DictionaryIndex) -> Vec<u32> {
        if probe.is_empty() {
            return Vec::new();
        }
        let probe_len = probe.len();

        let mut probe_shingles = shingles(probe);
        probe_shingles.sort_unstable();
        probe_shingles.dedup();

        let mut overlap: HashMap<u32, u32> = HashMap::new();
        for s in &probe_shingles {
            if let Some(list) = self.postings.get(s) {
                for &ordinal in list {
                    *overlap.entry(ordinal).or_insert(0) += 1;
                }
            }
        }

        let mut ranked: Vec<(u32, u32, usize)> = overlap
            .into_iter()
            .filter_map(|(ordinal, hits)| {
                let delta = self.lengths.get(ordinal as usize).copied()??.abs_diff(probe_len);
                (delta <= self.config.max_length_delta).then_some((ordinal, hits, delta))
            })
            .collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)).then(a.0.cmp(&b.0)));
        ranked.truncate(self.config.max_candidates);

        let mut result: Vec<u32> = ranked.into_iter().map(|(ordinal, _, _)| ordinal).collect();

        if result.len() < self.config.min_overlap_candidates {
            if let Some(range) = index.partition(probe[0]) {
                let already: HashSet<u32> = result.iter().copied().collect();
                for ordinal in range {
                    if result.len() >= self.config.max_candidates {
                        break;
                    }
                    if !already.contains(&ordinal) && self.length_ok(ordinal, probe_len) {
                        result.push(ordinal);
                    }
                }
            }
        }

        result
    }
}
