//! Substitute candidates for flagged heteronyms.
//!
//! When an ambiguous character is surfaced for review, each of its readings
//! gets at most one same-tone and one cross-tone suggestion so the reviewer
//! can disambiguate by hand. Candidates follow the same acceptance rule as
//! the resolver (never the character itself, never another heteronym) but
//! ignore the vocabulary: review suggestions are about the reading, not
//! about what the reader already knows.
//!
//! Records serialize to a compact wire form for annotated output:
//!
//! ```text
//! reading:same,same:cross,cross|reading:...
//! ```
//!
//! with empty candidate lists encoding as empty strings (`"he2::"`).

use serde::{Deserialize, Serialize};

use crate::ambiguity::is_ambiguous;
use crate::index::PronunciationIndex;
use crate::oracle::{strip_tone, PronunciationOracle};

/// Candidates for one reading of a flagged character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingAlternatives {
    pub reading: String,
    /// At most one character with exactly this toned reading.
    pub same_tone: Vec<char>,
    /// At most one character matching after the tone is dropped.
    pub cross_tone: Vec<char>,
}

/// One record per reading of `ch`, in oracle order.
///
/// Unknown characters produce no records.
pub fn alternatives_for<O: PronunciationOracle>(
    ch: char,
    oracle: &O,
    index: &PronunciationIndex,
    fold_tones: bool,
) -> Vec<ReadingAlternatives> {
    oracle
        .readings(ch)
        .into_iter()
        .map(|reading| {
            let same = same_tone_candidate(&reading, ch, oracle, index, fold_tones);
            let cross = cross_tone_candidate(&reading, ch, same, oracle, index, fold_tones);
            ReadingAlternatives {
                reading,
                same_tone: same.into_iter().collect(),
                cross_tone: cross.into_iter().collect(),
            }
        })
        .collect()
}

fn same_tone_candidate<O: PronunciationOracle>(
    reading: &str,
    exclude: char,
    oracle: &O,
    index: &PronunciationIndex,
    fold_tones: bool,
) -> Option<char> {
    index
        .lookup(reading)
        .iter()
        .copied()
        .find(|&c| c != exclude && !is_ambiguous(oracle, c, fold_tones))
}

fn cross_tone_candidate<O: PronunciationOracle>(
    reading: &str,
    exclude: char,
    taken: Option<char>,
    oracle: &O,
    index: &PronunciationIndex,
    fold_tones: bool,
) -> Option<char> {
    let base = strip_tone(reading);
    for other in index.readings_with_base(base) {
        if other.as_str() == reading {
            continue;
        }
        let hit = index
            .lookup(other)
            .iter()
            .copied()
            .find(|&c| c != exclude && Some(c) != taken && !is_ambiguous(oracle, c, fold_tones));
        if hit.is_some() {
            return hit;
        }
    }
    None
}

/// Encode records to the wire form. An empty record list encodes as `""`.
pub fn encode_alternatives(records: &[ReadingAlternatives]) -> String {
    records
        .iter()
        .map(|record| {
            format!(
                "{}:{}:{}",
                record.reading,
                join(&record.same_tone),
                join(&record.cross_tone)
            )
        })
        .collect::<Vec<_>>()
        .join("|")
}

fn join(chars: &[char]) -> String {
    chars
        .iter()
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Corpus, TableOracle};

    fn fixture() -> (TableOracle, PronunciationIndex) {
        // 戊 is the heteronym under review; 甲/乙 share its he2 reading,
        // 丙/丁 carry he4
        let corpus = Corpus::from_entries(["戊", "甲", "乙", "丙", "丁"]);
        let mut oracle = TableOracle::new();
        oracle.insert('戊', ["he2", "hu4"]);
        oracle.insert('甲', ["he2"]);
        oracle.insert('乙', ["he2"]);
        oracle.insert('丙', ["he4"]);
        oracle.insert('丁', ["he4"]);
        let index = PronunciationIndex::build(&corpus, &oracle);
        (oracle, index)
    }

    #[test]
    fn one_record_per_reading_in_oracle_order() {
        let (oracle, index) = fixture();
        let records = alternatives_for('戊', &oracle, &index, false);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].reading, "he2");
        assert_eq!(records[1].reading, "hu4");
    }

    #[test]
    fn candidates_skip_self_and_cap_at_one() {
        let (oracle, index) = fixture();
        let records = alternatives_for('戊', &oracle, &index, false);
        // 戊 heads the he2 bucket but never suggests itself
        assert_eq!(records[0].same_tone, vec!['甲']);
        assert_eq!(records[0].cross_tone, vec!['丙']);
    }

    #[test]
    fn readings_without_mates_encode_empty() {
        let (oracle, index) = fixture();
        let records = alternatives_for('戊', &oracle, &index, false);
        assert!(records[1].same_tone.is_empty());
        assert!(records[1].cross_tone.is_empty());
        assert_eq!(
            encode_alternatives(&records),
            "he2:甲:丙|hu4::"
        );
    }

    #[test]
    fn ambiguous_candidates_are_not_suggested() {
        let corpus = Corpus::from_entries(["己", "甲", "戊"]);
        let mut oracle = TableOracle::new();
        oracle.insert('己', ["he2", "ji3"]);
        oracle.insert('甲', ["he2"]);
        oracle.insert('戊', ["he2", "hu4"]);
        let index = PronunciationIndex::build(&corpus, &oracle);
        let records = alternatives_for('戊', &oracle, &index, false);
        // 己 outranks 甲 but is itself a heteronym
        assert_eq!(records[0].same_tone, vec!['甲']);
    }

    #[test]
    fn unknown_char_yields_no_records() {
        let (oracle, index) = fixture();
        let records = alternatives_for('丂', &oracle, &index, false);
        assert!(records.is_empty());
        assert_eq!(encode_alternatives(&records), "");
    }
}
