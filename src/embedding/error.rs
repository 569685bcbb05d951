use std::path::PathBuf;
use thiserror::Error;

/// Failures while loading or running the sentence embedder.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    /// The configured model directory does not exist.
    #[error("sentence model directory not found: {path}")]
    ModelDirNotFound { path: PathBuf },

    /// One of `config.json`, `model.safetensors` or `tokenizer.json` is absent.
    #[error("sentence model file missing: {path}")]
    ModelFileMissing { path: PathBuf },

    #[error("could not load sentence model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("sentence encoding failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("could not tokenize answer text: {reason}")]
    TokenizationFailed { reason: String },

    /// Bad sizes, an empty model path, or a hidden size that disagrees with
    /// the configured dimension.
    #[error("invalid embedder configuration: {reason}")]
    InvalidConfig { reason: String },
}

// Tensor errors only surface while encoding text.
impl From<candle_core::Error> for EmbeddingError {
    fn from(err: candle_core::Error) -> Self {
        EmbeddingError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EmbeddingError {
    fn from(err: std::io::Error) -> Self {
        EmbeddingError::ModelLoadFailed {
            reason: format!("reading model files: {err}"),
        }
    }
}
