//! Engine: owns the corpus, oracle, index and vocabulary.
//!
//! Construction wires the pieces together in dependency order; afterwards
//! the only mutable state is the vocabulary threshold. All text operations
//! borrow `&self`, so a threshold change can never interleave with a
//! running transform.

use std::sync::Arc;

use crate::alternatives::{alternatives_for, ReadingAlternatives};
use crate::ambiguity::is_ambiguous;
use crate::index::PronunciationIndex;
use crate::oracle::{PronunciationOracle, TableOracle};
use crate::pipeline::{transform, transform_plain, Segment, TransformOptions};
use crate::resolver::{resolve, Replacement};
use crate::vocabulary::Vocabulary;
use crate::Corpus;

/// Substitution engine over a corpus and a pronunciation oracle.
#[derive(Debug, Clone)]
pub struct Engine<O: PronunciationOracle> {
    corpus: Arc<Corpus>,
    oracle: O,
    index: PronunciationIndex,
    vocabulary: Vocabulary,
}

impl<O: PronunciationOracle> Engine<O> {
    /// Build an engine. The pronunciation index is derived from the corpus
    /// once, here; `threshold` seeds the vocabulary and is clamped to the
    /// corpus length.
    pub fn new(corpus: Corpus, oracle: O, threshold: usize) -> Self {
        let corpus = Arc::new(corpus);
        let index = PronunciationIndex::build(&corpus, &oracle);
        let vocabulary = Vocabulary::new(Arc::clone(&corpus), threshold);
        tracing::debug!(
            "engine ready: {} corpus characters, {} readings, threshold {}",
            corpus.len(),
            index.len(),
            vocabulary.threshold()
        );
        Self {
            corpus,
            oracle,
            index,
            vocabulary,
        }
    }

    /// Move the vocabulary cutoff. Affects every later call.
    pub fn set_threshold(&mut self, threshold: usize) {
        self.vocabulary.set_threshold(threshold);
    }

    /// The effective (clamped) threshold.
    pub fn threshold(&self) -> usize {
        self.vocabulary.threshold()
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn index(&self) -> &PronunciationIndex {
        &self.index
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    /// Whether `ch` sits inside the current vocabulary.
    pub fn is_allowed(&self, ch: char) -> bool {
        self.vocabulary.is_allowed(ch)
    }

    /// Frequency rank of `ch`, `None` when outside the corpus.
    pub fn rank(&self, ch: char) -> Option<usize> {
        self.corpus.rank(ch)
    }

    /// Whether `ch` is a heteronym under the given tone policy.
    pub fn is_ambiguous(&self, ch: char, fold_tones: bool) -> bool {
        is_ambiguous(&self.oracle, ch, fold_tones)
    }

    /// Resolve one character through the substitution tiers.
    pub fn resolve(&self, ch: char, fold_tones: bool) -> Replacement {
        resolve(ch, &self.oracle, &self.index, &self.vocabulary, fold_tones)
    }

    /// Review candidates for each reading of `ch`.
    pub fn alternatives(&self, ch: char, fold_tones: bool) -> Vec<ReadingAlternatives> {
        alternatives_for(ch, &self.oracle, &self.index, fold_tones)
    }

    /// Rewrite `text` into segments.
    pub fn transform(&self, text: &str, options: TransformOptions) -> Vec<Segment> {
        transform(text, &self.oracle, &self.index, &self.vocabulary, options)
    }

    /// Rewrite `text` and render plain text.
    ///
    /// # Example
    /// ```
    /// use tongyin_core::Engine;
    ///
    /// let engine = Engine::load_demo(30);
    /// assert_eq!(engine.transform_plain("妳好!", false), "你好!");
    /// ```
    pub fn transform_plain(&self, text: &str, fold_tones: bool) -> String {
        transform_plain(text, &self.oracle, &self.index, &self.vocabulary, fold_tones)
    }
}

impl Engine<TableOracle> {
    /// Engine over the built-in demo corpus and reading table.
    pub fn load_demo(threshold: usize) -> Self {
        Self::new(Corpus::load_demo(), TableOracle::load_demo(), threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::Classification;

    #[test]
    fn demo_engine_clamps_threshold() {
        let engine = Engine::load_demo(10_000);
        assert_eq!(engine.threshold(), engine.corpus().len());
    }

    #[test]
    fn threshold_move_changes_later_calls() {
        let mut engine = Engine::load_demo(29);
        // 河 sits at rank 28: inside at 29, first casualty at 28
        assert!(engine.is_allowed('河'));
        assert_eq!(engine.transform_plain("河", false), "河");
        engine.set_threshold(28);
        assert!(!engine.is_allowed('河'));
        let replacement = engine.resolve('河', false);
        assert_ne!(replacement.value, '河');
    }

    #[test]
    fn demo_engine_resolves_across_tiers() {
        let engine = Engine::load_demo(30);
        // exact tone from the vocabulary
        let exact = engine.resolve('市', false);
        assert_eq!(exact.value, '是');
        assert_eq!(exact.classification, Classification::ExactTone);
        // cross tone only once folding widens the pool
        let folded = engine.resolve('鹤', true);
        assert_eq!(folded.value, '河');
        assert_eq!(folded.classification, Classification::CrossTone);
        // without folding the same character drops to the fallback tier
        let strict = engine.resolve('鹤', false);
        assert_eq!(strict.value, '贺');
        assert_eq!(
            strict.classification,
            Classification::OutOfVocabularyFallback
        );
    }

    #[test]
    fn rank_reports_corpus_position() {
        let engine = Engine::load_demo(30);
        assert_eq!(engine.rank('的'), Some(0));
        assert_eq!(engine.rank('丂'), None);
    }
}
