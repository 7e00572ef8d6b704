//! Pronunciation index: toned reading → characters in frequency order.
//!
//! Built by one pass over the corpus. Each character is filed under its
//! primary reading only, so every character appears in exactly one bucket
//! and buckets inherit the corpus frequency order. Corpus characters the
//! oracle does not know are skipped.
//!
//! A secondary index groups toned readings by base syllable (tone digit
//! dropped), in order of first appearance. Tone-folding lookups walk that
//! list instead of rescanning every bucket.

use ahash::AHashMap;

use crate::oracle::{strip_tone, PronunciationOracle};
use crate::Corpus;

/// Reading-keyed view of a corpus. Immutable once built; rebuilding from the
/// same corpus and oracle yields the same buckets.
#[derive(Debug, Clone, Default)]
pub struct PronunciationIndex {
    by_reading: AHashMap<String, Vec<char>>,
    by_base: AHashMap<String, Vec<String>>,
}

impl PronunciationIndex {
    /// Index `corpus` by primary reading.
    pub fn build<O: PronunciationOracle>(corpus: &Corpus, oracle: &O) -> Self {
        let mut by_reading: AHashMap<String, Vec<char>> = AHashMap::new();
        let mut by_base: AHashMap<String, Vec<String>> = AHashMap::new();
        let mut skipped = 0usize;

        for &ch in corpus.chars() {
            let reading = match oracle.primary(ch) {
                Some(reading) => reading,
                None => {
                    skipped += 1;
                    continue;
                }
            };
            match by_reading.get_mut(&reading) {
                Some(bucket) => bucket.push(ch),
                None => {
                    by_base
                        .entry(strip_tone(&reading).to_string())
                        .or_default()
                        .push(reading.clone());
                    by_reading.insert(reading, vec![ch]);
                }
            }
        }

        tracing::debug!(
            "pronunciation index built: {} readings over {} base syllables ({} characters without readings skipped)",
            by_reading.len(),
            by_base.len(),
            skipped
        );
        Self {
            by_reading,
            by_base,
        }
    }

    /// Characters whose primary reading is exactly `reading`, most frequent
    /// first. Empty for unknown readings.
    pub fn lookup(&self, reading: &str) -> &[char] {
        self.by_reading
            .get(reading)
            .map(|b| b.as_slice())
            .unwrap_or(&[])
    }

    /// Toned readings sharing `base`, in order of first appearance in the
    /// corpus.
    pub fn readings_with_base(&self, base: &str) -> &[String] {
        self.by_base
            .get(base)
            .map(|b| b.as_slice())
            .unwrap_or(&[])
    }

    /// Number of distinct toned readings.
    pub fn len(&self) -> usize {
        self.by_reading.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_reading.is_empty()
    }
}
