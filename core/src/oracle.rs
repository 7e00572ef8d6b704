//! Pronunciation lookup boundary.
//!
//! Everything that needs to know how a character is read goes through the
//! [`PronunciationOracle`] trait. Readings are opaque toned strings, syllable
//! plus one trailing tone digit (`"he2"`, `"liao3"`, `"le5"` with 5 for the
//! neutral tone); the engine never parses them beyond [`strip_tone`].
//!
//! [`TableOracle`] is the production implementation: an in-memory table
//! mapping each character to its readings, most common first, serializable
//! with bincode so converted tables load fast.
//!
//! Public API:
//! - `PronunciationOracle` - trait the resolver and index are generic over
//! - `TableOracle` - table-backed oracle, bincode (de)serialization helpers
//! - `strip_tone` - drop the trailing tone digit from a reading

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::utils::normalize;

/// Reading lookup for single characters.
///
/// Implementations must be stable within a session: repeated calls for the
/// same character return the same readings in the same order.
pub trait PronunciationOracle {
    /// All readings of `ch`, most common first. Empty when `ch` is unknown.
    fn readings(&self, ch: char) -> Vec<String>;

    /// The most common reading of `ch`, `None` when unknown.
    fn primary(&self, ch: char) -> Option<String> {
        self.readings(ch).into_iter().next()
    }
}

/// Drop the trailing tone digit from a toned reading.
///
/// Exactly one trailing ASCII digit is removed; readings without one come
/// back unchanged.
///
/// # Example
/// ```
/// use tongyin_core::strip_tone;
///
/// assert_eq!(strip_tone("he2"), "he");
/// assert_eq!(strip_tone("liao3"), "liao");
/// assert_eq!(strip_tone("he"), "he");
/// ```
pub fn strip_tone(reading: &str) -> &str {
    reading
        .strip_suffix(|c: char| c.is_ascii_digit())
        .unwrap_or(reading)
}

/// In-memory reading table mapping character -> readings, primary first.
///
/// Serializable with `serde` and (de)serializable with `bincode`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableOracle {
    map: HashMap<char, Vec<String>>,
}

impl TableOracle {
    /// Create an empty table.
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Add readings for a character, keeping insertion order.
    ///
    /// Readings are normalized; blanks and repeats are dropped. Inserting for
    /// an already-known character appends new readings after the existing
    /// ones, so the primary reading never changes retroactively.
    pub fn insert<I, S>(&mut self, ch: char, readings: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let bucket = self.map.entry(ch).or_default();
        for reading in readings {
            let reading = normalize(reading.as_ref());
            if reading.is_empty() || bucket.contains(&reading) {
                continue;
            }
            bucket.push(reading);
        }
        // A character with no usable readings stays unknown.
        if self.map.get(&ch).map_or(false, |b| b.is_empty()) {
            self.map.remove(&ch);
        }
    }

    /// Number of characters in the table.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Save the table to a file using bincode serialization.
    pub fn save_bincode<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let file = File::create(path)?;
        let writer = BufWriter::new(file);
        bincode::serialize_into(writer, self)?;
        Ok(())
    }

    /// Load a table from a bincode file produced by `save_bincode`.
    pub fn load_bincode<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let table: Self = bincode::deserialize_from(reader)?;
        Ok(table)
    }

    /// Built-in demo table covering the demo corpus.
    pub fn load_demo() -> Self {
        DEMO_ORACLE.clone()
    }
}

impl PronunciationOracle for TableOracle {
    fn readings(&self, ch: char) -> Vec<String> {
        self.map.get(&ch).cloned().unwrap_or_default()
    }

    fn primary(&self, ch: char) -> Option<String> {
        self.map.get(&ch).and_then(|b| b.first()).cloned()
    }
}

/// Demo data: high-frequency hanzi with real readings, primary first.
/// Order is descending frequency; the demo corpus is built from the same
/// rows, so ranks and readings stay in sync.
static DEMO_TABLE: &[(char, &[&str])] = &[
    ('的', &["de5", "di2", "di4"]),
    ('一', &["yi1"]),
    ('是', &["shi4"]),
    ('不', &["bu4"]),
    ('了', &["le5", "liao3"]),
    ('人', &["ren2"]),
    ('我', &["wo3"]),
    ('在', &["zai4"]),
    ('有', &["you3"]),
    ('他', &["ta1"]),
    ('这', &["zhe4"]),
    ('中', &["zhong1", "zhong4"]),
    ('大', &["da4", "dai4"]),
    ('来', &["lai2"]),
    ('上', &["shang4", "shang3"]),
    ('国', &["guo2"]),
    ('个', &["ge4"]),
    ('到', &["dao4"]),
    ('说', &["shuo1", "shui4"]),
    ('们', &["men5"]),
    ('为', &["wei4", "wei2"]),
    ('子', &["zi3"]),
    ('和', &["he2", "he4", "huo2", "huo4", "hu2"]),
    ('你', &["ni3"]),
    ('地', &["di4", "de5"]),
    ('出', &["chu1"]),
    ('道', &["dao4"]),
    ('好', &["hao3", "hao4"]),
    ('河', &["he2"]),
    ('时', &["shi2"]),
    ('年', &["nian2"]),
    ('得', &["de2", "de5", "dei3"]),
    ('就', &["jiu4"]),
    ('那', &["na4", "nei4"]),
    ('要', &["yao4", "yao1"]),
    ('下', &["xia4"]),
    ('以', &["yi3"]),
    ('生', &["sheng1"]),
    ('会', &["hui4", "kuai4"]),
    ('自', &["zi4"]),
    ('着', &["zhe5", "zhao2", "zhuo2"]),
    ('去', &["qu4"]),
    ('之', &["zhi1"]),
    ('过', &["guo4"]),
    ('家', &["jia1"]),
    ('学', &["xue2"]),
    ('号', &["hao4"]),
    ('对', &["dui4"]),
    ('可', &["ke3"]),
    ('她', &["ta1"]),
    ('里', &["li3"]),
    ('后', &["hou4"]),
    ('核', &["he2", "hu2"]),
    ('盒', &["he2"]),
    ('禾', &["he2"]),
    ('合', &["he2"]),
    ('贺', &["he4"]),
    ('鹤', &["he4"]),
    ('妳', &["ni3"]),
    ('祂', &["ta1"]),
    ('世', &["shi4"]),
    ('市', &["shi4"]),
    ('事', &["shi4"]),
    ('试', &["shi4"]),
    ('识', &["shi2", "zhi4"]),
    ('石', &["shi2", "dan4"]),
    ('十', &["shi2"]),
    ('尼', &["ni2"]),
    ('泥', &["ni2", "ni4"]),
    ('呢', &["ne5", "ni2"]),
];

static DEMO_ORACLE: Lazy<TableOracle> = Lazy::new(|| {
    let mut oracle = TableOracle::new();
    for (ch, readings) in DEMO_TABLE {
        oracle.insert(*ch, readings.iter().copied());
    }
    oracle
});

pub(crate) fn demo_table() -> &'static [(char, &'static [&'static str])] {
    DEMO_TABLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_dedups_and_keeps_order() {
        let mut oracle = TableOracle::new();
        oracle.insert('和', ["he2", "he4", "he2", "huo2"]);
        assert_eq!(oracle.readings('和'), vec!["he2", "he4", "huo2"]);
        assert_eq!(oracle.primary('和'), Some("he2".to_string()));
    }

    #[test]
    fn unknown_char_has_no_readings() {
        let oracle = TableOracle::new();
        assert!(oracle.readings('和').is_empty());
        assert_eq!(oracle.primary('和'), None);
    }

    #[test]
    fn blank_readings_leave_char_unknown() {
        let mut oracle = TableOracle::new();
        oracle.insert('和', ["", "  "]);
        assert_eq!(oracle.primary('和'), None);
        assert!(oracle.is_empty());
    }

    #[test]
    fn readings_are_normalized() {
        let mut oracle = TableOracle::new();
        oracle.insert('和', [" HE2 "]);
        assert_eq!(oracle.primary('和'), Some("he2".to_string()));
    }

    #[test]
    fn strip_tone_drops_one_trailing_digit() {
        assert_eq!(strip_tone("he2"), "he");
        assert_eq!(strip_tone("le5"), "le");
        assert_eq!(strip_tone("liao"), "liao");
        // only the final digit goes
        assert_eq!(strip_tone("a12"), "a1");
        assert_eq!(strip_tone(""), "");
    }

    #[test]
    fn save_and_load_bincode_roundtrip() {
        let tmp = std::env::temp_dir().join(format!(
            "tongyin_oracle_test_{}.bin",
            std::process::id()
        ));
        let oracle = TableOracle::load_demo();
        oracle.save_bincode(&tmp).unwrap();
        let loaded = TableOracle::load_bincode(&tmp).unwrap();
        assert_eq!(loaded.len(), oracle.len());
        assert_eq!(loaded.readings('和'), oracle.readings('和'));
        let _ = std::fs::remove_file(tmp);
    }

    #[test]
    fn demo_table_lists_primary_first() {
        let oracle = TableOracle::load_demo();
        assert_eq!(oracle.primary('和'), Some("he2".to_string()));
        assert_eq!(oracle.readings('了'), vec!["le5", "liao3"]);
    }
}
