//! tongyin-core
//!
//! Pronunciation-aware substitution engine for hanzi text. Characters that
//! fall outside a frequency-ranked vocabulary are rewritten to homophones the
//! vocabulary does contain; characters with more than one reading are flagged
//! for review rather than silently swapped.
//!
//! Public API:
//! - `Corpus` - frequency-ranked character list (rank 0 = most frequent)
//! - `PronunciationOracle` / `TableOracle` - reading lookup boundary
//! - `PronunciationIndex` - toned reading → characters in frequency order
//! - `Vocabulary` - rank-threshold prefix view over the corpus
//! - `resolve` / `Replacement` - four-tier homophone resolution
//! - `is_ambiguous` - heteronym detection with optional tone folding
//! - `alternatives_for` / `ReadingAlternatives` - substitute candidates per reading
//! - `transform` / `Segment` - text rewrite pipeline
//! - `Engine` - owns the pieces, session entry point
//! - `Config` - TOML-backed settings
use serde::{Deserialize, Serialize};

pub mod corpus;
pub use corpus::Corpus;

pub mod oracle;
pub use oracle::{strip_tone, PronunciationOracle, TableOracle};

pub mod index;
pub use index::PronunciationIndex;

pub mod vocabulary;
pub use vocabulary::Vocabulary;

pub mod ambiguity;
pub use ambiguity::is_ambiguous;

pub mod resolver;
pub use resolver::{resolve, Classification, Replacement};

pub mod alternatives;
pub use alternatives::{alternatives_for, encode_alternatives, ReadingAlternatives};

pub mod pipeline;
pub use pipeline::{is_hanzi, transform, transform_plain, Segment, TransformOptions};

pub mod engine;
pub use engine::Engine;

/// Session configuration.
///
/// Policies here are defaults for a session; both substitution policies can
/// also be set per call through [`TransformOptions`].
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Vocabulary rank cutoff: characters ranked below this stay as written.
    /// Clamped to the corpus length when applied.
    pub threshold: usize,

    /// Accept substitutes whose reading matches only after the tone is
    /// dropped. Widens the candidate pool and narrows what counts as
    /// ambiguous.
    pub fold_tones: bool,

    /// Flag in-vocabulary heteronyms in annotated output instead of passing
    /// them through untouched.
    pub highlight_ambiguous: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            // 500 most frequent characters is a fair beginner vocabulary
            threshold: 500,
            fold_tones: false,
            highlight_ambiguous: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(
        path: P,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(
        &self,
        path: P,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from a TOML string.
    ///
    /// # Example
    /// ```
    /// use tongyin_core::Config;
    ///
    /// let toml = "threshold = 120\nfold_tones = true\nhighlight_ambiguous = false";
    /// let config = Config::from_toml_str(toml).unwrap();
    /// assert_eq!(config.threshold, 120);
    /// assert!(config.fold_tones);
    /// ```
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// The per-call options this configuration implies.
    pub fn options(&self) -> TransformOptions {
        TransformOptions {
            fold_tones: self.fold_tones,
            highlight_ambiguous: self.highlight_ambiguous,
        }
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize input strings (NFC), trim whitespace, lowercase.
    ///
    /// Corpus entries and readings both pass through here so that lookups
    /// never miss on representation differences.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_lowercase()
    }
}
