//! Vocabulary: the prefix of the corpus a reader is assumed to know.
//!
//! A threshold K marks the first K corpus characters as allowed; everything
//! else is a substitution target. The threshold is the only mutable state in
//! the engine, and changing it only affects later calls.

use ahash::AHashSet;
use std::sync::Arc;

use crate::Corpus;

/// Rank-threshold view over a shared corpus.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    corpus: Arc<Corpus>,
    threshold: usize,
    allowed: AHashSet<char>,
}

impl Vocabulary {
    /// Marks the `threshold` most frequent characters as allowed. The
    /// threshold is clamped to the corpus length.
    pub fn new(corpus: Arc<Corpus>, threshold: usize) -> Self {
        let mut vocabulary = Self {
            corpus,
            threshold: 0,
            allowed: AHashSet::new(),
        };
        vocabulary.set_threshold(threshold);
        vocabulary
    }

    /// Move the cutoff. Takes effect immediately for every later query.
    pub fn set_threshold(&mut self, threshold: usize) {
        let clamped = threshold.min(self.corpus.len());
        self.threshold = clamped;
        self.allowed.clear();
        for &ch in &self.corpus.chars()[..clamped] {
            self.allowed.insert(ch);
        }
        tracing::debug!("vocabulary threshold set to {} characters", clamped);
    }

    /// Whether `ch` sits inside the allowed prefix.
    pub fn is_allowed(&self, ch: char) -> bool {
        self.allowed.contains(&ch)
    }

    /// The effective (clamped) threshold.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// The corpus this view is over.
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn len(&self) -> usize {
        self.allowed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.allowed.is_empty()
    }
}
