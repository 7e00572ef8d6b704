//! Text rewrite pipeline.
//!
//! Two passes over the input. The first collects the distinct hanzi and
//! decides once per character what happens to it; the second walks the text
//! and emits segments, so every occurrence of a character gets the same
//! treatment and resolution cost scales with distinct characters, not text
//! length.
//!
//! Only characters in the unified CJK block (U+4E00..U+9FFF) are touched.
//! Everything else passes through verbatim inside coalesced text segments,
//! except `\n`, which gets its own marker segment so renderers can break
//! lines without re-scanning.

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::alternatives::{alternatives_for, ReadingAlternatives};
use crate::ambiguity::is_ambiguous;
use crate::index::PronunciationIndex;
use crate::oracle::PronunciationOracle;
use crate::resolver::{resolve, Classification, Replacement};
use crate::vocabulary::Vocabulary;

/// Whether `ch` falls in the unified CJK ideograph block.
///
/// # Example
/// ```
/// use tongyin_core::is_hanzi;
///
/// assert!(is_hanzi('好'));
/// assert!(!is_hanzi('a'));
/// assert!(!is_hanzi('。'));
/// ```
pub fn is_hanzi(ch: char) -> bool {
    matches!(ch, '\u{4E00}'..='\u{9FFF}')
}

/// Per-call substitution policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransformOptions {
    /// Accept substitutes whose reading matches only after the tone is
    /// dropped.
    pub fold_tones: bool,
    /// Emit [`Segment::Ambiguous`] for in-vocabulary heteronyms instead of
    /// passing them through.
    pub highlight_ambiguous: bool,
}

/// One piece of transformed output, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    /// Verbatim run: non-hanzi plus hanzi left unchanged.
    Text(String),
    /// A `\n` in the source.
    LineBreak,
    /// An out-of-vocabulary character and what the resolver did with it.
    /// Unresolved characters still come through here, with `value` equal
    /// to `original`.
    Replaced {
        original: char,
        value: char,
        classification: Classification,
    },
    /// An in-vocabulary heteronym flagged for review.
    Ambiguous {
        value: char,
        /// Corpus rank, when the character has one.
        rank: Option<usize>,
        alternatives: Vec<ReadingAlternatives>,
    },
}

enum CharAction {
    Keep,
    Replace(Replacement),
    Flag(Vec<ReadingAlternatives>),
}

/// Rewrite `text` into segments.
pub fn transform<O: PronunciationOracle>(
    text: &str,
    oracle: &O,
    index: &PronunciationIndex,
    vocab: &Vocabulary,
    options: TransformOptions,
) -> Vec<Segment> {
    // Pass 1: one decision per distinct character.
    let mut plan: AHashMap<char, CharAction> = AHashMap::new();
    for ch in text.chars().filter(|&c| is_hanzi(c)) {
        if plan.contains_key(&ch) {
            continue;
        }
        let action = if !vocab.is_allowed(ch) {
            CharAction::Replace(resolve(ch, oracle, index, vocab, options.fold_tones))
        } else if options.highlight_ambiguous && is_ambiguous(oracle, ch, options.fold_tones) {
            CharAction::Flag(alternatives_for(ch, oracle, index, options.fold_tones))
        } else {
            CharAction::Keep
        };
        plan.insert(ch, action);
    }

    // Pass 2: walk the text and emit segments.
    let mut segments = Vec::new();
    let mut run = String::new();
    for ch in text.chars() {
        if ch == '\n' {
            flush(&mut run, &mut segments);
            segments.push(Segment::LineBreak);
            continue;
        }
        match plan.get(&ch) {
            Some(CharAction::Replace(replacement)) => {
                flush(&mut run, &mut segments);
                segments.push(Segment::Replaced {
                    original: ch,
                    value: replacement.value,
                    classification: replacement.classification,
                });
            }
            Some(CharAction::Flag(alternatives)) => {
                flush(&mut run, &mut segments);
                segments.push(Segment::Ambiguous {
                    value: ch,
                    rank: vocab.corpus().rank(ch),
                    alternatives: alternatives.clone(),
                });
            }
            Some(CharAction::Keep) | None => run.push(ch),
        }
    }
    flush(&mut run, &mut segments);
    segments
}

fn flush(run: &mut String, segments: &mut Vec<Segment>) {
    if !run.is_empty() {
        segments.push(Segment::Text(std::mem::take(run)));
    }
}

/// Rewrite `text` and render the result as plain text.
///
/// Ambiguity highlighting does not apply here: flagged characters would
/// render as themselves anyway.
pub fn transform_plain<O: PronunciationOracle>(
    text: &str,
    oracle: &O,
    index: &PronunciationIndex,
    vocab: &Vocabulary,
    fold_tones: bool,
) -> String {
    let options = TransformOptions {
        fold_tones,
        highlight_ambiguous: false,
    };
    let mut out = String::with_capacity(text.len());
    for segment in transform(text, oracle, index, vocab, options) {
        match segment {
            Segment::Text(s) => out.push_str(&s),
            Segment::LineBreak => out.push('\n'),
            Segment::Replaced { value, .. } | Segment::Ambiguous { value, .. } => out.push(value),
        }
    }
    out
}
