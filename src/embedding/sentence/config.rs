use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Default sentence embedding dimension.
pub const SENTENCE_EMBEDDING_DIM: usize = crate::constants::DEFAULT_EMBEDDING_DIM;

/// Default max tokens per input.
pub const SENTENCE_MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

#[derive(Debug, Clone)]
/// Configuration for [`SentenceEmbedder`](super::SentenceEmbedder).
pub struct EmbedderConfig {
    /// Directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    pub model_dir: PathBuf,
    /// Inputs longer than this many tokens are truncated.
    pub max_seq_len: usize,
    /// Expected hidden size of the model.
    pub embedding_dim: usize,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            max_seq_len: SENTENCE_MAX_SEQ_LEN,
            embedding_dim: SENTENCE_EMBEDDING_DIM,
            testing_stub: false,
        }
    }
}

impl EmbedderConfig {
    pub const CONFIG_FILE: &'static str = "config.json";
    pub const WEIGHTS_FILE: &'static str = "model.safetensors";
    pub const TOKENIZER_FILE: &'static str = "tokenizer.json";

    /// Config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Config for stub mode (hash-seeded vectors, tests only).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    pub fn with_max_seq_len(mut self, max_seq_len: usize) -> Self {
        self.max_seq_len = max_seq_len;
        self
    }

    pub fn with_embedding_dim(mut self, embedding_dim: usize) -> Self {
        self.embedding_dim = embedding_dim;
        self
    }

    /// Validates sizes always, and model files unless in stub mode.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be greater than zero".to_string(),
            });
        }
        if self.embedding_dim == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "embedding_dim must be greater than zero".to_string(),
            });
        }

        if self.testing_stub {
            return Ok(());
        }

        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        }

        if !self.model_dir.is_dir() {
            return Err(EmbeddingError::ModelDirNotFound {
                path: self.model_dir.clone(),
            });
        }

        for path in [self.config_path(), self.weights_path(), self.tokenizer_path()] {
            if !path.is_file() {
                return Err(EmbeddingError::ModelFileMissing { path });
            }
        }

        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.model_dir.join(Self::CONFIG_FILE)
    }

    pub fn weights_path(&self) -> PathBuf {
        self.model_dir.join(Self::WEIGHTS_FILE)
    }

    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join(Self::TOKENIZER_FILE)
    }
}
