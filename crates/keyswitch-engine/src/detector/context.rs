// Cross-word context: recent outcomes, the low-confidence counter and a
// held-back short correction.

use std::collections::VecDeque;

use keyswitch_core::Language;

/// What happened to a flushed word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    /// Valid in its source language; left alone.
    Valid,
    /// A correction was emitted.
    Corrected,
    /// A correction was found but held back.
    Suppressed,
    /// Neither valid nor convertible.
    Unknown,
}

/// Sliding window of recent word outcomes.
#[derive(Debug, Clone)]
pub struct History {
    window: usize,
    outcomes: VecDeque<Outcome>,
}

impl History {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            outcomes: VecDeque::with_capacity(window),
        }
    }

    pub fn record(&mut self, outcome: Outcome) {
        if self.window == 0 {
            return;
        }
        if self.outcomes.len() == self.window {
            self.outcomes.pop_front();
        }
        self.outcomes.push_back(outcome);
    }

    pub fn count(&self, outcome: Outcome) -> usize {
        self.outcomes.iter().filter(|&&o| o == outcome).count()
    }

    /// The user is evidently typing in the right layout: enough valid words
    /// and no corrections in the window.
    pub fn is_strong_context(&self, min_valid: usize) -> bool {
        self.count(Outcome::Valid) >= min_valid && self.count(Outcome::Corrected) == 0
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    pub fn clear(&mut self) {
        self.outcomes.clear();
    }
}

/// Counts consecutive low-confidence corrections towards one target.
#[derive(Debug, Clone, Default)]
pub struct LowConfidenceCounter {
    target: Option<Language>,
    count: u32,
}

impl LowConfidenceCounter {
    /// Register a low-confidence correction. Returns `true` once enough
    /// consecutive hits for the same target have accumulated, and starts
    /// over.
    pub fn hit(&mut self, target: Language, confirmations: u32) -> bool {
        if self.target == Some(target) {
            self.count += 1;
        } else {
            self.target = Some(target);
            self.count = 1;
        }
        if self.count >= confirmations {
            self.reset();
            true
        } else {
            false
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn reset(&mut self) {
        self.target = None;
        self.count = 0;
    }
}

/// A short correction held back in a strong context, kept for one word in
/// case the next word confirms it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingShort {
    pub original: String,
    pub converted: String,
    pub target: Language,
    pub boundary: String,
}
