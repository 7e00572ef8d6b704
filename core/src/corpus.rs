//! Frequency-ranked character corpus.
//!
//! The corpus is an ordered list of distinct characters, most frequent first
//! (rank 0). It is built once from a source list and read-only afterwards;
//! the [`Vocabulary`](crate::Vocabulary) prefix view and the
//! [`PronunciationIndex`](crate::PronunciationIndex) both derive from it.
//!
//! The canonical source format is a JSON array of single-character strings in
//! descending frequency order. Published frequency lists carry `null` holes
//! and occasional junk entries, so construction filters rather than fails:
//! nulls, empty strings and multi-character entries are dropped, duplicates
//! keep their first (best) rank.

use ahash::AHashMap;
use anyhow::Context;
use std::path::Path;

use crate::utils::normalize;

/// Ranked character list with O(1) rank lookup.
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    chars: Vec<char>,
    ranks: AHashMap<char, usize>,
}

impl Corpus {
    /// Build a corpus from entries in descending frequency order.
    ///
    /// Entries are normalized first; anything that does not come out as
    /// exactly one character is skipped, and repeated characters keep the
    /// rank of their first appearance.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut chars = Vec::new();
        let mut ranks = AHashMap::new();
        for entry in entries {
            let entry = normalize(entry.as_ref());
            let mut it = entry.chars();
            let ch = match (it.next(), it.next()) {
                (Some(ch), None) => ch,
                _ => continue,
            };
            if ranks.contains_key(&ch) {
                continue;
            }
            ranks.insert(ch, chars.len());
            chars.push(ch);
        }
        tracing::debug!("corpus built: {} ranked characters", chars.len());
        Self { chars, ranks }
    }

    /// Parse the JSON source format: `["的", "一", null, "是", ...]`.
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        let raw: Vec<Option<String>> = serde_json::from_str(json)?;
        Ok(Self::from_entries(raw.into_iter().flatten()))
    }

    /// Load the JSON source format from a file.
    pub fn load_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading corpus {}", path.display()))?;
        let corpus = Self::from_json_str(&content)
            .with_context(|| format!("parsing corpus {}", path.display()))?;
        Ok(corpus)
    }

    /// Built-in demo corpus: a small slice of the highest-frequency hanzi.
    pub fn load_demo() -> Self {
        Self::from_entries(
            crate::oracle::demo_table()
                .iter()
                .map(|(ch, _)| ch.to_string()),
        )
    }

    /// Characters in rank order.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// The character at `rank`, if the corpus is that large.
    pub fn get(&self, rank: usize) -> Option<char> {
        self.chars.get(rank).copied()
    }

    /// Frequency rank of `ch` (0 = most frequent), `None` when unknown.
    pub fn rank(&self, ch: char) -> Option<usize> {
        self.ranks.get(&ch).copied()
    }

    /// Whether `ch` appears anywhere in the corpus.
    pub fn contains(&self, ch: char) -> bool {
        self.ranks.contains_key(&ch)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filters_blank_and_multichar_entries() {
        let corpus = Corpus::from_entries(["你", "", "  ", "好的", "好"]);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.chars(), &['你', '好']);
        assert_eq!(corpus.rank('好'), Some(1));
    }

    #[test]
    fn duplicates_keep_first_rank() {
        let corpus = Corpus::from_entries(["你", "好", "你"]);
        assert_eq!(corpus.len(), 2);
        assert_eq!(corpus.rank('你'), Some(0));
    }

    #[test]
    fn json_source_drops_nulls() {
        let corpus = Corpus::from_json_str(r#"["的", null, "一", ""]"#).unwrap();
        assert_eq!(corpus.chars(), &['的', '一']);
    }

    #[test]
    fn json_source_rejects_non_arrays() {
        assert!(Corpus::from_json_str(r#"{"的": 1}"#).is_err());
    }

    #[test]
    fn rank_and_get_agree() {
        let corpus = Corpus::from_entries(["甲", "乙", "丙"]);
        assert_eq!(corpus.get(1), Some('乙'));
        assert_eq!(corpus.rank('丙'), Some(2));
        assert_eq!(corpus.get(3), None);
        assert_eq!(corpus.rank('丁'), None);
        assert!(corpus.contains('甲'));
        assert!(!corpus.contains('丁'));
    }

    #[test]
    fn demo_corpus_is_ranked_from_the_top() {
        let corpus = Corpus::load_demo();
        assert!(corpus.len() > 50);
        assert_eq!(corpus.rank('的'), Some(0));
        assert_eq!(corpus.rank('一'), Some(1));
    }
}
