//! Configuration management for the fit scorer
//!
//! All tunable constants of the scoring pipeline live here: bucket weights,
//! match thresholds, extraction caps, and the positional backfill slices.
//! They are loaded once and treated as immutable for the life of a scorer.

use crate::error::{Result, FitScorerError};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub scoring: ScoringConfig,
    pub extraction: ExtractionConfig,
    pub semantic: SemanticConfig,
    pub output: OutputConfig,
}

/// Weights and thresholds for matching and aggregation.
///
/// An empty bucket always contributes ratio 0 to the weighted score, for
/// every bucket alike. This is a deliberate, uniform choice and is not
/// configurable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Weight of the must-have bucket in the overall score.
    pub must_weight: f64,
    /// Weight of the nice-to-have bucket.
    pub nice_weight: f64,
    /// Weight of the general bucket.
    pub general_weight: f64,
    /// Token-Jaccard similarity a fragment needs against the candidate text.
    pub similarity_threshold: f64,
    /// Fraction of a fragment's own tokens that must appear in the candidate.
    pub overlap_threshold: f64,
    /// Minimum displayed score when at least one phrase matched anywhere.
    pub noise_floor: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Minimum significant tokens for a line or sentence to count as a phrase.
    pub min_phrase_tokens: usize,
    /// Sentences longer than this many characters are skipped.
    pub max_sentence_len: usize,
    /// How many frequency-ranked keywords/bigrams to mine from the JD.
    pub top_keywords: usize,
    /// Hard cap on phrases kept per bucket.
    pub max_phrases_per_bucket: usize,
    /// Backfill slice: phrases[..must_backfill] move to `must` when empty.
    pub must_backfill: usize,
    /// Backfill slice: phrases[must_backfill..nice_backfill_end] to `nice`.
    pub nice_backfill_end: usize,
    /// Backfill slice: phrases[nice_backfill_end..general_backfill_end] to `general`.
    pub general_backfill_end: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemanticConfig {
    /// Whole-text cosine similarity needed before missing phrases are
    /// re-examined with the literal-token boost.
    pub cosine_threshold: f64,
    /// Bound on each collaborator round trip, in seconds.
    pub timeout_secs: u64,
    /// Local Model2Vec model directory, if an embedding collaborator is wanted.
    pub model_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scoring: ScoringConfig {
                must_weight: 0.6,
                nice_weight: 0.3,
                general_weight: 0.1,
                similarity_threshold: 0.35,
                overlap_threshold: 0.5,
                noise_floor: 5,
            },
            extraction: ExtractionConfig {
                min_phrase_tokens: 2,
                max_sentence_len: 160,
                top_keywords: 18,
                max_phrases_per_bucket: 24,
                must_backfill: 12,
                nice_backfill_end: 20,
                general_backfill_end: 32,
            },
            semantic: SemanticConfig {
                cosine_threshold: 0.78,
                timeout_secs: 10,
                model_dir: None,
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            let config = Self::default();
            config.save()?;
            Ok(config)
        }
    }

    /// Load from an explicit path. Unlike `load`, a missing file is an
    /// error here rather than a reason to write defaults.
    pub fn load_from(config_path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| FitScorerError::Configuration(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| FitScorerError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("fit-scorer")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        let s = &self.scoring;
        let weight_sum = s.must_weight + s.nice_weight + s.general_weight;
        if !(0.99..=1.01).contains(&weight_sum) {
            return Err(FitScorerError::Configuration(format!(
                "Bucket weights must sum to 1.0, got {}",
                weight_sum
            )));
        }
        if self.extraction.min_phrase_tokens == 0 {
            return Err(FitScorerError::Configuration(
                "min_phrase_tokens must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights_sum_to_one() {
        let config = Config::default();
        let sum = config.scoring.must_weight
            + config.scoring.nice_weight
            + config.scoring.general_weight;
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip_through_toml() {
        let config = Config::default();
        let serialized = toml::to_string_pretty(&config).unwrap();
        let parsed: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(parsed.scoring.noise_floor, config.scoring.noise_floor);
        assert_eq!(parsed.extraction.top_keywords, config.extraction.top_keywords);
    }
}
