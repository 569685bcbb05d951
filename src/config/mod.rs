//! Environment-backed configuration.
//!
//! Every setting has a default. Override with `SMARTCHECK_*` environment variables.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_BATCH_SIZE, DEFAULT_EMBEDDING_CACHE_CAPACITY, DEFAULT_FULL_CREDIT_THRESHOLD,
    DEFAULT_PARTIAL_CREDIT_THRESHOLD, DEFAULT_REVIEW_THRESHOLD,
};
use crate::embedding::EmbedderConfig;
use crate::grading::{GradingEngine, GradingError, ScoringPolicy};

/// Grading configuration loaded from environment variables.
///
/// Use [`Config::from_env`] to read `SMARTCHECK_*` overrides on top of defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Sentence embedding model directory. `None` selects the lexical oracle.
    pub model_path: Option<PathBuf>,

    /// Similarity at or above which an answer earns full credit. Default: `0.85`.
    pub full_credit_threshold: f64,

    /// Similarity at or above which an answer earns half credit. Default: `0.75`.
    pub partial_credit_threshold: f64,

    /// Similarity below which an answer is flagged for review. Default: `0.85`.
    pub review_threshold: f64,

    /// Pairs sent to the oracle per call. Default: `32`.
    pub batch_size: usize,

    /// Max sentence embeddings kept in memory. Default: `10_000`.
    pub embedding_cache_capacity: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_path: None,
            full_credit_threshold: DEFAULT_FULL_CREDIT_THRESHOLD,
            partial_credit_threshold: DEFAULT_PARTIAL_CREDIT_THRESHOLD,
            review_threshold: DEFAULT_REVIEW_THRESHOLD,
            batch_size: DEFAULT_BATCH_SIZE,
            embedding_cache_capacity: DEFAULT_EMBEDDING_CACHE_CAPACITY,
        }
    }
}

impl Config {
    const ENV_MODEL_PATH: &'static str = "SMARTCHECK_MODEL_PATH";
    const ENV_FULL_CREDIT_THRESHOLD: &'static str = "SMARTCHECK_FULL_CREDIT_THRESHOLD";
    const ENV_PARTIAL_CREDIT_THRESHOLD: &'static str = "SMARTCHECK_PARTIAL_CREDIT_THRESHOLD";
    const ENV_REVIEW_THRESHOLD: &'static str = "SMARTCHECK_REVIEW_THRESHOLD";
    const ENV_BATCH_SIZE: &'static str = "SMARTCHECK_BATCH_SIZE";
    const ENV_EMBEDDING_CACHE_CAPACITY: &'static str = "SMARTCHECK_EMBEDDING_CACHE_CAPACITY";

    /// Loads configuration from environment variables (falling back to defaults).
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let model_path = Self::parse_optional_path_from_env(Self::ENV_MODEL_PATH);
        let full_credit_threshold = Self::parse_threshold_from_env(
            Self::ENV_FULL_CREDIT_THRESHOLD,
            defaults.full_credit_threshold,
        )?;
        let partial_credit_threshold = Self::parse_threshold_from_env(
            Self::ENV_PARTIAL_CREDIT_THRESHOLD,
            defaults.partial_credit_threshold,
        )?;
        let review_threshold =
            Self::parse_threshold_from_env(Self::ENV_REVIEW_THRESHOLD, defaults.review_threshold)?;
        let batch_size = Self::parse_batch_size_from_env(defaults.batch_size)?;
        let embedding_cache_capacity = Self::parse_u64_from_env(
            Self::ENV_EMBEDDING_CACHE_CAPACITY,
            defaults.embedding_cache_capacity,
        );

        Ok(Self {
            model_path,
            full_credit_threshold,
            partial_credit_threshold,
            review_threshold,
            batch_size,
            embedding_cache_capacity,
        })
    }

    /// Validates thresholds, batch size and the model directory (if any).
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            (Self::ENV_FULL_CREDIT_THRESHOLD, self.full_credit_threshold),
            (Self::ENV_PARTIAL_CREDIT_THRESHOLD, self.partial_credit_threshold),
            (Self::ENV_REVIEW_THRESHOLD, self.review_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidThreshold {
                    name,
                    reason: format!("{value} is outside [0, 1]"),
                });
            }
        }

        if self.partial_credit_threshold > self.full_credit_threshold {
            return Err(ConfigError::InvalidThreshold {
                name: Self::ENV_PARTIAL_CREDIT_THRESHOLD,
                reason: format!(
                    "{} exceeds the full credit threshold {}",
                    self.partial_credit_threshold, self.full_credit_threshold
                ),
            });
        }

        if self.batch_size == 0 {
            return Err(ConfigError::InvalidBatchSize {
                value: self.batch_size.to_string(),
            });
        }

        if let Some(ref path) = self.model_path {
            if !path.exists() {
                return Err(ConfigError::PathNotFound { path: path.clone() });
            }
            if !path.is_dir() {
                return Err(ConfigError::NotADirectory { path: path.clone() });
            }
        }

        Ok(())
    }

    /// Builds the scoring policy from the configured thresholds.
    pub fn scoring_policy(&self) -> Result<ScoringPolicy, GradingError> {
        ScoringPolicy::new(
            self.full_credit_threshold,
            self.partial_credit_threshold,
            self.review_threshold,
        )
    }

    /// Builds a grading engine from the configured policy and batch size.
    pub fn grading_engine(&self) -> Result<GradingEngine, GradingError> {
        GradingEngine::new(self.scoring_policy()?, self.batch_size)
    }

    /// Embedder configuration for the model directory, if one is set.
    pub fn embedder_config(&self) -> Option<EmbedderConfig> {
        self.model_path.as_ref().map(EmbedderConfig::new)
    }

    fn parse_threshold_from_env(name: &'static str, default: f64) -> Result<f64, ConfigError> {
        match env::var(name) {
            Ok(value) => value
                .trim()
                .parse()
                .map_err(|e| ConfigError::ThresholdParseError {
                    name,
                    value: value.clone(),
                    source: e,
                }),
            Err(_) => Ok(default),
        }
    }

    fn parse_batch_size_from_env(default: usize) -> Result<usize, ConfigError> {
        match env::var(Self::ENV_BATCH_SIZE) {
            Ok(value) => {
                let batch_size: usize =
                    value
                        .trim()
                        .parse()
                        .map_err(|e| ConfigError::BatchSizeParseError {
                            value: value.clone(),
                            source: e,
                        })?;

                if batch_size == 0 {
                    return Err(ConfigError::InvalidBatchSize { value });
                }

                Ok(batch_size)
            }
            Err(_) => Ok(default),
        }
    }

    fn parse_optional_path_from_env(var_name: &str) -> Option<PathBuf> {
        env::var(var_name)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
    }

    fn parse_u64_from_env(var_name: &str, default: u64) -> u64 {
        env::var(var_name)
            .ok()
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(default)
    }
}
