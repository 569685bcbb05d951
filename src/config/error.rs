//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading and validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A threshold string could not be parsed as a number.
    #[error("failed to parse {name} '{value}': {source}")]
    ThresholdParseError {
        name: &'static str,
        value: String,
        #[source]
        source: std::num::ParseFloatError,
    },

    /// A threshold is outside `[0, 1]` or the bands overlap.
    #[error("invalid threshold {name}: {reason}")]
    InvalidThreshold { name: &'static str, reason: String },

    /// Batch size string could not be parsed as a number.
    #[error("failed to parse batch size '{value}': {source}")]
    BatchSizeParseError {
        value: String,
        #[source]
        source: std::num::ParseIntError,
    },

    /// Batch size must be at least one.
    #[error("invalid batch size '{value}': must be greater than zero")]
    InvalidBatchSize { value: String },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory (when a directory was expected).
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
