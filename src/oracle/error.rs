use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum OracleError {
    #[error("similarity oracle unavailable: {reason}")]
    Unavailable { reason: String },

    #[error("similarity computation failed: {reason}")]
    Failed { reason: String },

    #[error("similarity oracle returned a non-finite score: {value}")]
    NonFinite { value: f64 },

    #[error("similarity oracle returned {actual} scores for {expected} pairs")]
    BatchSizeMismatch { expected: usize, actual: usize },

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),
}
