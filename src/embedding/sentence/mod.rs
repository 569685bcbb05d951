//! Sentence embedder (BERT-family safetensors + tokenizer).
//!
//! Built for all-MiniLM-L6-v2 style checkpoints: mean pooling over the
//! attention mask followed by L2 normalization, so cosine similarity of two
//! outputs is their dot product.
//!
//! Use [`EmbedderConfig::stub`] for tests without model files.

/// Embedder configuration.
pub mod config;


pub use config::{EmbedderConfig, SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN};

use std::sync::Arc;

use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::constants::validate_embedding_dim;
use crate::embedding::bert::BertEncoder;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::{l2_normalize, load_tokenizer};
use crate::hashing::hash_text;

enum EmbedderBackend {
    Model {
        encoder: BertEncoder,
        tokenizer: Arc<Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Turns text into unit-length sentence vectors.
pub struct SentenceEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.config.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEmbedder {
    /// Loads the model described by `config` (or a stub).
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Sentence embedder running in STUB mode (testing only)");
            return Ok(Self {
                backend: EmbedderBackend::Stub,
                config,
            });
        }

        let device = select_device()?;
        debug!(?device, "Selected compute device for sentence embedder");

        info!(
            model_dir = %config.model_dir.display(),
            max_seq_len = config.max_seq_len,
            "Loading sentence embedding model"
        );

        let encoder = BertEncoder::load(&config.model_dir, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT model: {}", e),
            }
        })?;

        validate_embedding_dim(encoder.hidden_size(), config.embedding_dim).map_err(|e| {
            EmbeddingError::InvalidConfig {
                reason: e.to_string(),
            }
        })?;

        let tokenizer = load_tokenizer(&config.model_dir, config.max_seq_len).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            }
        })?;

        info!(
            embedding_dim = encoder.hidden_size(),
            "Sentence embedding model loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                encoder,
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
        })
    }

    /// Embeds one text.
    pub fn embed(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        match &self.backend {
            EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            } => self.embed_with_model(text, encoder, tokenizer, device),
            EmbedderBackend::Stub => Ok(self.embed_stub(text)),
        }
    }

    /// Embeds several texts. Each text is encoded on its own so results match
    /// [`embed`](Self::embed) bit for bit.
    pub fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.embed(text)).collect()
    }

    fn embed_with_model(
        &self,
        text: &str,
        encoder: &BertEncoder,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<f32>, EmbeddingError> {
        let encoding =
            tokenizer
                .encode(text, true)
                .map_err(|e| EmbeddingError::TokenizationFailed {
                    reason: e.to_string(),
                })?;

        if encoding.get_ids().is_empty() {
            return Ok(vec![0.0; self.config.embedding_dim]);
        }

        debug!(
            text_len = text.len(),
            token_count = encoding.get_ids().len(),
            "Generating sentence embedding"
        );

        let input_ids = Tensor::new(encoding.get_ids(), device)?.unsqueeze(0)?;
        let type_ids = Tensor::new(encoding.get_type_ids(), device)?.unsqueeze(0)?;
        let attention_mask = Tensor::new(encoding.get_attention_mask(), device)?.unsqueeze(0)?;

        let pooled = encoder
            .mean_pooled(&input_ids, &type_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Encoder forward pass failed: {}", e),
            })?;

        let mut embedding = pooled.squeeze(0)?.to_vec1::<f32>()?;
        l2_normalize(&mut embedding);
        Ok(embedding)
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        debug!(text_len = text.len(), "Generating stub embedding");

        let mut state = hash_text(text);
        let mut embedding = Vec::with_capacity(self.config.embedding_dim);
        for _ in 0..self.config.embedding_dim {
            state = state.wrapping_mul(6364136223846793005).wrapping_add(1);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        l2_normalize(&mut embedding);
        embedding
    }

    /// Output vector length.
    pub fn embedding_dim(&self) -> usize {
        self.config.embedding_dim
    }

    /// Returns `true` if running in stub mode.
    pub fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }

    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }
}
