//! Embedding + model utilities.
//!
//! - [`sentence`] turns answers into sentence vectors for
//!   [`EmbeddingOracle`](crate::oracle::EmbeddingOracle).
//! - [`bert`] and [`utils`] hold the candle/tokenizers plumbing it is built on.

/// BERT encoder with mean pooling.
pub mod bert;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
/// Sentence embedder.
pub mod sentence;
/// Tokenizer loading and vector helpers.
pub mod utils;

pub use error::EmbeddingError;
pub use sentence::{EmbedderConfig, SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN, SentenceEmbedder};
pub use utils::cosine_similarity;
