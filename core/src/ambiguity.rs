//! Heteronym detection.
//!
//! A character is ambiguous when it has more than one reading. With tone
//! folding, readings that differ only in tone collapse into one, so folding
//! can only shrink the ambiguous set, never grow it.

use crate::oracle::{strip_tone, PronunciationOracle};

/// Whether `ch` has more than one distinct reading.
///
/// With `fold_tones`, distinctness is judged on base syllables. Characters
/// the oracle does not know are not ambiguous.
pub fn is_ambiguous<O: PronunciationOracle>(oracle: &O, ch: char, fold_tones: bool) -> bool {
    let readings = oracle.readings(ch);
    if readings.len() < 2 {
        return false;
    }
    if !fold_tones {
        return true;
    }
    let first = strip_tone(&readings[0]);
    readings[1..].iter().any(|r| strip_tone(r) != first)
}
