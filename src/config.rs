//! Session configuration
//!
//! Vectorizer hyperparameters and ranking parameters. Every field has a
//! default so a partial JSON file is enough to override a single value.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub vectorizer: VectorizerConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
}

/// Parameters of the fitted vector space
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VectorizerConfig {
    /// Maximum vocabulary size, selected by corpus-wide term count
    #[serde(default = "default_max_features")]
    pub max_features: usize,
    /// Inclusive (min, max) n-gram lengths
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    /// Drop English stop-words before forming n-grams
    #[serde(default = "default_stop_words")]
    pub stop_words: bool,
}

/// Parameters of the query ranker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Minimum raw similarity (0.0..=1.0) a match needs to be reported
    #[serde(default = "default_min_score")]
    pub min_score: f64,
    #[serde(default = "default_top_n")]
    pub default_top_n: usize,
    #[serde(default = "default_max_top_n")]
    pub max_top_n: usize,
}

fn default_max_features() -> usize {
    8000
}
fn default_ngram_range() -> (usize, usize) {
    (1, 2)
}
fn default_stop_words() -> bool {
    true
}
fn default_min_score() -> f64 {
    0.05
}
fn default_top_n() -> usize {
    5
}
fn default_max_top_n() -> usize {
    10
}

impl Default for VectorizerConfig {
    fn default() -> Self {
        Self {
            max_features: default_max_features(),
            ngram_range: default_ngram_range(),
            stop_words: default_stop_words(),
        }
    }
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            min_score: default_min_score(),
            default_top_n: default_top_n(),
            max_top_n: default_max_top_n(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file and validate it
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.vectorizer.validate()?;
        self.ranking.validate()
    }
}

impl VectorizerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.max_features == 0 {
            return Err(Error::InvalidConfig("max_features must be at least 1".into()));
        }
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(Error::InvalidConfig(format!(
                "ngram_range must satisfy 1 <= min <= max, got ({min_n}, {max_n})"
            )));
        }
        Ok(())
    }
}

impl RankingConfig {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.min_score) {
            return Err(Error::InvalidConfig(format!(
                "min_score must be within 0.0..=1.0, got {}",
                self.min_score
            )));
        }
        if self.max_top_n == 0 || self.default_top_n == 0 || self.default_top_n > self.max_top_n {
            return Err(Error::InvalidConfig(format!(
                "default_top_n must satisfy 1 <= default_top_n <= max_top_n, got {} / {}",
                self.default_top_n, self.max_top_n
            )));
        }
        Ok(())
    }

    /// Check a caller supplied `top_n` against the configured bounds
    pub fn check_top_n(&self, top_n: usize) -> Result<usize> {
        if top_n == 0 || top_n > self.max_top_n {
            return Err(Error::InvalidTopN { value: top_n, max: self.max_top_n });
        }
        Ok(top_n)
    }
}
