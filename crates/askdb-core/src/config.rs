//! Configuration loader and path helpers.
//!
//! Uses Figment to merge `askdb.toml` + `askdb.<env>.toml` + `ASKDB_*` env
//! vars into a typed [`AskdbConfig`], then validates it before any engine is
//! built. Bad thresholds or weights are a startup failure, never a
//! mid-query surprise.

use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

use crate::error::{Error, Result};

/// Slack allowed when checking that the fusion weights sum to one.
const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AskdbConfig {
    #[serde(default)]
    pub retrieval: RetrievalConfig,
    #[serde(default)]
    pub corpus: CorpusConfig,
}

/// Scoring and classification knobs.
///
/// The defaults are the shipped tuning; every value can be overridden from
/// config without touching scoring code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Best combined score at or above this answers directly.
    pub answer_threshold: f64,
    /// Best combined score at or above this, but below `answer_threshold`,
    /// yields suggestions instead of an answer.
    pub suggest_threshold: f64,
    /// Fusion weight of the tf-idf cosine signal.
    pub cosine_weight: f64,
    /// Fusion weight of the edit-distance signal.
    pub fuzzy_weight: f64,
    /// Ranked candidates returned per query.
    pub top_k: usize,
    /// Candidate questions surfaced in the suggestions tier.
    pub max_suggestions: usize,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            answer_threshold: 0.65,
            suggest_threshold: 0.40,
            cosine_weight: 0.7,
            fuzzy_weight: 0.3,
            top_k: 5,
            max_suggestions: 3,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Directory scanned for `*.json` record batches.
    pub records_dir: String,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        Self {
            records_dir: "data/records".to_string(),
        }
    }
}

impl AskdbConfig {
    pub fn load() -> anyhow::Result<Self> {
        let env_name = env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string());

        let mut figment = Figment::new().merge(Toml::file("askdb.toml"));
        match env_name.as_str() {
            "dev" | "development" => figment = figment.merge(Toml::file("askdb.dev.toml")),
            "prod" | "production" => figment = figment.merge(Toml::file("askdb.prod.toml")),
            "test" | "testing" => figment = figment.merge(Toml::file("askdb.test.toml")),
            _ => {}
        }
        figment = figment.merge(Env::prefixed("ASKDB_").split("__"));

        Self::from_figment(figment)
    }

    /// Extract and validate from an already assembled Figment.
    pub fn from_figment(figment: Figment) -> anyhow::Result<Self> {
        let config: Self = figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
        config.retrieval.validate()?;
        Ok(config)
    }

    pub fn records_dir(&self) -> PathBuf {
        expand_path(&self.corpus.records_dir)
    }
}

impl RetrievalConfig {
    /// Reject values the scorer and classifier cannot honor.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("answer_threshold", self.answer_threshold),
            ("suggest_threshold", self.suggest_threshold),
            ("cosine_weight", self.cosine_weight),
            ("fuzzy_weight", self.fuzzy_weight),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }
        let weight_sum = self.cosine_weight + self.fuzzy_weight;
        if (weight_sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(Error::InvalidConfig(format!(
                "cosine_weight + fuzzy_weight must sum to 1.0, got {weight_sum}"
            )));
        }
        if self.suggest_threshold > self.answer_threshold {
            return Err(Error::InvalidConfig(format!(
                "suggest_threshold ({}) must not exceed answer_threshold ({})",
                self.suggest_threshold, self.answer_threshold
            )));
        }
        if self.top_k == 0 {
            return Err(Error::InvalidConfig(
                "top_k must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Expand a user-provided path string:
/// - Expands leading '~' to the user's home directory
/// - Expands ${VAR} and $VAR environment variables
/// - Returns a PathBuf without attempting to canonicalize
pub fn expand_path<S: AsRef<str>>(input: S) -> PathBuf {
    let s = input.as_ref();
    // Expand env vars first
    let expanded_env = shellexpand::env(s).unwrap_or(std::borrow::Cow::Borrowed(s));
    // Expand ~ at start
    let expanded = shellexpand::tilde(&expanded_env);
    PathBuf::from(expanded.as_ref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = AskdbConfig::default();
        config
            .retrieval
            .validate()
            .expect("Default config should validate");
        assert!(config.retrieval.suggest_threshold <= config.retrieval.answer_threshold);
        assert!(config.retrieval.top_k >= 1);
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let mut config = RetrievalConfig::default();
        config.cosine_weight = 0.9;
        config.fuzzy_weight = 0.3; // Sums to 1.2

        assert!(
            config.validate().is_err(),
            "Validation should fail when weights do not sum to 1.0"
        );
    }

    #[test]
    fn test_thresholds_must_be_normalized_and_ordered() {
        let mut out_of_range = RetrievalConfig::default();
        out_of_range.answer_threshold = 1.5;
        assert!(out_of_range.validate().is_err());

        let mut inverted = RetrievalConfig::default();
        inverted.suggest_threshold = 0.8;
        inverted.answer_threshold = 0.5;
        assert!(
            inverted.validate().is_err(),
            "Validation should fail when suggest_threshold exceeds answer_threshold"
        );
    }

    #[test]
    fn test_top_k_zero_rejected() {
        let mut config = RetrievalConfig::default();
        config.top_k = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_overrides_from_toml() {
        let figment = Figment::new().merge(Toml::string(
            r#"
            [retrieval]
            answer_threshold = 0.8
            suggest_threshold = 0.5
            top_k = 10

            [corpus]
            records_dir = "/tmp/records"
            "#,
        ));

        let config = AskdbConfig::from_figment(figment).expect("Override config should load");
        assert!((config.retrieval.answer_threshold - 0.8).abs() < f64::EPSILON);
        assert!((config.retrieval.suggest_threshold - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.retrieval.top_k, 10);
        assert_eq!(config.corpus.records_dir, "/tmp/records");
        // Unset keys keep their defaults
        assert!((config.retrieval.cosine_weight - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_override_fails_at_load() {
        let figment = Figment::new().merge(Toml::string(
            r#"
            [retrieval]
            cosine_weight = 0.9
            fuzzy_weight = 0.9
            "#,
        ));

        assert!(
            AskdbConfig::from_figment(figment).is_err(),
            "Loading should fail when overrides break validation"
        );
    }
}
