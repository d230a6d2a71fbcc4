//! Analyzer configuration.
//!
//! Values are layered: built-in defaults, then an optional JSON file, then
//! `TABLE_FINDER_*` environment variables. The CLI applies its own flags last.
//!
//! ```json
//! {
//!   "threshold": 0.5,
//!   "confidence_mode": "top-ranked",
//!   "stop_words": ["the", "please"],
//!   "synonyms": { "invoice": ["bill", "receipt"] }
//! }
//! ```

use crate::error::{FinderError, Result};
use crate::relevance::lexicon::Lexicon;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

pub const THRESHOLD_ENV: &str = "TABLE_FINDER_THRESHOLD";
pub const CONFIDENCE_MODE_ENV: &str = "TABLE_FINDER_CONFIDENCE_MODE";

/// Which table's score the confidence value is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceMode {
    /// The first table of the schema, whether or not it ranked first.
    /// Matches the behavior existing users of the tool have seen.
    #[default]
    FirstScanned,
    /// The highest-ranked relevant table.
    TopRanked,
}

impl FromStr for ConfidenceMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "first-scanned" | "first_scanned" => Ok(Self::FirstScanned),
            "top-ranked" | "top_ranked" => Ok(Self::TopRanked),
            other => Err(format!(
                "unknown confidence mode '{}' (expected first-scanned or top-ranked)",
                other
            )),
        }
    }
}

impl fmt::Display for ConfidenceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FirstScanned => write!(f, "first-scanned"),
            Self::TopRanked => write!(f, "top-ranked"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Tables must score strictly above this to be reported as relevant
    pub threshold: f64,
    pub confidence_mode: ConfidenceMode,
    /// Replaces the built-in stop-word set when present
    pub stop_words: Option<Vec<String>>,
    /// Replaces the built-in synonym table when present
    pub synonyms: Option<BTreeMap<String, Vec<String>>>,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            confidence_mode: ConfidenceMode::default(),
            stop_words: None,
            synonyms: None,
        }
    }
}

impl AnalyzerConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| FinderError::Config(format!("Failed to read {}: {}", path.display(), e)))?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| FinderError::Config(format!("Failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_env_overrides(self) -> Result<Self> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply `TABLE_FINDER_*` overrides from an arbitrary variable source.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(THRESHOLD_ENV) {
            self.threshold = raw.trim().parse().map_err(|_| {
                FinderError::Config(format!("{} must be a number, got '{}'", THRESHOLD_ENV, raw))
            })?;
        }
        if let Some(raw) = lookup(CONFIDENCE_MODE_ENV) {
            self.confidence_mode = raw
                .parse()
                .map_err(|e| FinderError::Config(format!("{}: {}", CONFIDENCE_MODE_ENV, e)))?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.threshold.is_finite() || self.threshold < 0.0 {
            return Err(FinderError::Config(format!(
                "threshold must be a non-negative number, got {}",
                self.threshold
            )));
        }
        Ok(())
    }

    pub fn lexicon(&self) -> Lexicon {
        let mut lexicon = Lexicon::default();
        if let Some(ref stop_words) = self.stop_words {
            lexicon = lexicon.with_stop_words(stop_words);
        }
        if let Some(ref synonyms) = self.synonyms {
            lexicon = lexicon.with_synonyms(synonyms);
        }
        lexicon
    }
}
