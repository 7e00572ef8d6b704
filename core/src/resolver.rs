//! Four-tier homophone resolution.
//!
//! Given an out-of-vocabulary character, find a stand-in the reader would
//! pronounce the same way. Tiers are tried strictly in order and the first
//! hit wins:
//!
//! 1. same toned reading, inside the vocabulary
//! 2. same base syllable under another tone, inside the vocabulary
//!    (only with tone folding enabled)
//! 3. same toned reading, vocabulary ignored
//! 4. no substitute; the character stands for itself
//!
//! Tier 3 deliberately relaxes the vocabulary requirement but not the tone
//! requirement: a wrong-but-unknown homophone reads better than a known
//! character under the wrong tone. Within a tier, candidates are tried in
//! frequency order, so the first acceptable hit is also the most common one.
//!
//! A candidate is acceptable when it is not the character itself and is not
//! ambiguous under the active tone policy. Substituting a heteronym would
//! trade one reading problem for another.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ambiguity::is_ambiguous;
use crate::index::PronunciationIndex;
use crate::oracle::{strip_tone, PronunciationOracle};
use crate::vocabulary::Vocabulary;

/// Which tier produced a replacement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// Tier 1: vocabulary character with the identical toned reading.
    ExactTone,
    /// Tier 2: vocabulary character matching after the tone is dropped.
    CrossTone,
    /// Tier 3: same toned reading, but the stand-in is itself outside the
    /// vocabulary.
    OutOfVocabularyFallback,
    /// Tier 4: nothing usable; `value` is the original character.
    Unresolved,
}

impl Classification {
    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::ExactTone => "ExactTone",
            Classification::CrossTone => "CrossTone",
            Classification::OutOfVocabularyFallback => "OutOfVocabularyFallback",
            Classification::Unresolved => "Unresolved",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving one character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub value: char,
    pub classification: Classification,
}

impl Replacement {
    pub fn new(value: char, classification: Classification) -> Self {
        Self {
            value,
            classification,
        }
    }

    /// An unresolved character stands for itself.
    pub fn unresolved(ch: char) -> Self {
        Self::new(ch, Classification::Unresolved)
    }

    /// Whether a substitute (tiers 1-3) was found.
    pub fn is_resolved(&self) -> bool {
        self.classification != Classification::Unresolved
    }
}

/// Resolve one character through the tiers.
///
/// Pure with respect to its inputs: the same character, index, vocabulary
/// and policy always produce the same replacement.
pub fn resolve<O: PronunciationOracle>(
    ch: char,
    oracle: &O,
    index: &PronunciationIndex,
    vocab: &Vocabulary,
    fold_tones: bool,
) -> Replacement {
    let reading = match oracle.primary(ch) {
        Some(reading) => reading,
        None => return Replacement::unresolved(ch),
    };

    // Tier 1: exact toned reading, inside the vocabulary.
    let same_reading = index.lookup(&reading);
    if let Some(found) = first_usable(same_reading, ch, oracle, fold_tones, |c| {
        vocab.is_allowed(c)
    }) {
        return Replacement::new(found, Classification::ExactTone);
    }

    // Tier 2: same base syllable under another tone, still inside the
    // vocabulary.
    if fold_tones {
        let base = strip_tone(&reading);
        for other in index.readings_with_base(base) {
            if other.as_str() == reading {
                continue;
            }
            if let Some(found) = first_usable(index.lookup(other), ch, oracle, fold_tones, |c| {
                vocab.is_allowed(c)
            }) {
                return Replacement::new(found, Classification::CrossTone);
            }
        }
    }

    // Tier 3: exact toned reading again, vocabulary ignored.
    if let Some(found) = first_usable(same_reading, ch, oracle, fold_tones, |_| true) {
        return Replacement::new(found, Classification::OutOfVocabularyFallback);
    }

    Replacement::unresolved(ch)
}

fn first_usable<O: PronunciationOracle>(
    pool: &[char],
    original: char,
    oracle: &O,
    fold_tones: bool,
    allowed: impl Fn(char) -> bool,
) -> Option<char> {
    pool.iter()
        .copied()
        .find(|&c| allowed(c) && c != original && !is_ambiguous(oracle, c, fold_tones))
}
