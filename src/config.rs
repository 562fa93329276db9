use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::AnalyticsError;

/// Default location of the job-postings table.
pub const DEFAULT_HIRING_PATH: &str = "hiring_data_final.csv";
/// Default location of the customer-reviews table.
pub const DEFAULT_REVIEWS_PATH: &str = "combined_reviews_standardized.csv";

/// Tuning options for the analytics pipeline.
///
/// Defaults reproduce the published report: negative reviews (score below
/// 0.0) are modeled into 4 topics of 10 terms each, ignoring terms that show
/// up in fewer than 2 reviews or in more than 95% of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    /// Documents scoring strictly below this are treated as negative
    pub sentiment_threshold: f64,
    /// Number of latent topics (K)
    pub topic_count: usize,
    /// Terms kept per topic label (N)
    pub top_terms_per_topic: usize,
    /// Terms in fewer documents than this are dropped from the vocabulary
    pub min_doc_freq: usize,
    /// Terms in more than this fraction of documents are dropped
    pub max_doc_freq_ratio: f64,
    /// Seed for the factorization's initial factors
    pub random_seed: u64,
    /// Upper bound on factorization update rounds
    pub nmf_max_iter: usize,
    /// Relative error improvement below which factorization stops early
    pub nmf_tolerance: f64,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            sentiment_threshold: 0.0,
            topic_count: 4,
            top_terms_per_topic: 10,
            min_doc_freq: 2,
            max_doc_freq_ratio: 0.95,
            random_seed: 42,
            nmf_max_iter: 200,
            nmf_tolerance: 1e-4,
        }
    }
}

impl AnalyticsConfig {
    /// Build from defaults, overridden by any `CLIENTVOICE_*` variables set.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        if let Some(v) = env_parse("CLIENTVOICE_SENTIMENT_THRESHOLD")? {
            config.sentiment_threshold = v;
        }
        if let Some(v) = env_parse("CLIENTVOICE_TOPIC_COUNT")? {
            config.topic_count = v;
        }
        if let Some(v) = env_parse("CLIENTVOICE_TOP_TERMS")? {
            config.top_terms_per_topic = v;
        }
        if let Some(v) = env_parse("CLIENTVOICE_MIN_DOC_FREQ")? {
            config.min_doc_freq = v;
        }
        if let Some(v) = env_parse("CLIENTVOICE_MAX_DOC_FREQ_RATIO")? {
            config.max_doc_freq_ratio = v;
        }
        if let Some(v) = env_parse("CLIENTVOICE_RANDOM_SEED")? {
            config.random_seed = v;
        }
        Ok(config)
    }

    /// Reject option values that can never produce a result.
    pub fn validate(&self) -> crate::error::Result<()> {
        if !self.sentiment_threshold.is_finite() {
            return Err(AnalyticsError::config("sentiment_threshold must be a finite number"));
        }
        if self.topic_count == 0 {
            return Err(AnalyticsError::config("topic_count must be positive"));
        }
        if self.top_terms_per_topic == 0 {
            return Err(AnalyticsError::config("top_terms_per_topic must be positive"));
        }
        if self.min_doc_freq == 0 {
            return Err(AnalyticsError::config("min_doc_freq must be at least 1"));
        }
        if !(self.max_doc_freq_ratio > 0.0 && self.max_doc_freq_ratio <= 1.0) {
            return Err(AnalyticsError::config(format!(
                "max_doc_freq_ratio must be in (0, 1], got {}",
                self.max_doc_freq_ratio
            )));
        }
        if self.nmf_max_iter == 0 {
            return Err(AnalyticsError::config("nmf_max_iter must be positive"));
        }
        if !(self.nmf_tolerance >= 0.0) {
            return Err(AnalyticsError::config("nmf_tolerance must be non-negative"));
        }
        Ok(())
    }
}

/// Central configuration loaded from environment variables.
///
/// The .env file is loaded automatically at startup via dotenvy. Every
/// field has a default, so a bare checkout with the two CSV exports in the
/// working directory needs no configuration at all.
pub struct Config {
    /// Job-postings export (CLIENTVOICE_HIRING_PATH)
    pub hiring_path: PathBuf,
    /// Customer-reviews export (CLIENTVOICE_REVIEWS_PATH)
    pub reviews_path: PathBuf,
    /// Replacement polarity lexicon in VADER format (CLIENTVOICE_LEXICON_PATH).
    /// The bundled lexicon is used when unset.
    pub lexicon_path: Option<PathBuf>,
    pub analytics: AnalyticsConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        Ok(Self {
            hiring_path: env::var("CLIENTVOICE_HIRING_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_HIRING_PATH)),
            reviews_path: env::var("CLIENTVOICE_REVIEWS_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_REVIEWS_PATH)),
            lexicon_path: env::var("CLIENTVOICE_LEXICON_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
            analytics: AnalyticsConfig::from_env()?,
        })
    }
}

/// Parse an optional environment variable, failing loudly on garbage.
fn env_parse<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => {
            let value = raw
                .trim()
                .parse::<T>()
                .with_context(|| format!("{name} has an invalid value: {raw:?}"))?;
            Ok(Some(value))
        }
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(AnalyticsConfig::default().validate().is_ok());
    }

    #[test]
    fn zero_topics_rejected() {
        let config = AnalyticsConfig {
            topic_count: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(AnalyticsError::Config(_))));
    }

    #[test]
    fn ratio_out_of_range_rejected() {
        for ratio in [0.0, -0.5, 1.5, f64::NAN] {
            let config = AnalyticsConfig {
                max_doc_freq_ratio: ratio,
                ..Default::default()
            };
            assert!(config.validate().is_err(), "ratio {ratio} should be rejected");
        }
    }

    #[test]
    fn deserialize_partial_uses_defaults() {
        let config: AnalyticsConfig = serde_json::from_str(r#"{"topic_count": 2}"#).unwrap();
        assert_eq!(config.topic_count, 2);
        assert_eq!(config.top_terms_per_topic, 10);
        assert_eq!(config.random_seed, 42);
    }
}
