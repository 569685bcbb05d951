use std::collections::HashSet;
use std::sync::Arc;

use moka::sync::Cache;
use tracing::{debug, trace};

use super::{OracleError, SimilarityOracle};
use crate::constants::DEFAULT_EMBEDDING_CACHE_CAPACITY;
use crate::embedding::{EmbedderConfig, SentenceEmbedder, cosine_similarity};
use crate::hashing::hash_text;

/// Cosine similarity of sentence embeddings, clamped to `[0, 1]`.
///
/// Embeddings are cached by text hash, so an answer key reference is encoded
/// once no matter how many students answered the question. A blank text on
/// either side scores `0.0` without touching the model.
pub struct EmbeddingOracle {
    embedder: SentenceEmbedder,
    cache: Cache<u64, Arc<Vec<f32>>>,
}

impl std::fmt::Debug for EmbeddingOracle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmbeddingOracle")
            .field("embedder", &self.embedder)
            .field("cached", &self.cache.entry_count())
            .finish()
    }
}

impl EmbeddingOracle {
    /// Wraps an embedder with a cache of at most `cache_capacity` vectors.
    pub fn new(embedder: SentenceEmbedder, cache_capacity: u64) -> Self {
        Self {
            embedder,
            cache: Cache::builder().max_capacity(cache_capacity).build(),
        }
    }

    /// Loads the embedder described by `config` with the default cache size.
    pub fn load(config: EmbedderConfig) -> Result<Self, OracleError> {
        Self::load_with_capacity(config, DEFAULT_EMBEDDING_CACHE_CAPACITY)
    }

    pub fn load_with_capacity(
        config: EmbedderConfig,
        cache_capacity: u64,
    ) -> Result<Self, OracleError> {
        let embedder = SentenceEmbedder::load(config)?;
        Ok(Self::new(embedder, cache_capacity))
    }

    pub fn embedder(&self) -> &SentenceEmbedder {
        &self.embedder
    }

    /// Number of cached embeddings (after flushing pending cache work).
    pub fn cached_embeddings(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    fn embedding(&self, text: &str) -> Result<Arc<Vec<f32>>, OracleError> {
        let key = hash_text(text);
        if let Some(vector) = self.cache.get(&key) {
            return Ok(vector);
        }

        let vector = Arc::new(self.embedder.embed(text)?);
        self.cache.insert(key, Arc::clone(&vector));
        Ok(vector)
    }

    fn is_blank(text: &str) -> bool {
        text.trim().is_empty()
    }
}

impl SimilarityOracle for EmbeddingOracle {
    fn score(&self, text_a: &str, text_b: &str) -> Result<f64, OracleError> {
        if Self::is_blank(text_a) || Self::is_blank(text_b) {
            return Ok(0.0);
        }

        let a = self.embedding(text_a)?;
        let b = self.embedding(text_b)?;
        let cosine = cosine_similarity(&a, &b) as f64;
        trace!(cosine, "Embedding similarity");

        Ok(cosine.clamp(0.0, 1.0))
    }

    fn score_batch(&self, pairs: &[(&str, &str)]) -> Result<Vec<f64>, OracleError> {
        let mut seen = HashSet::new();
        let missing: Vec<&str> = pairs
            .iter()
            .flat_map(|(a, b)| [*a, *b])
            .filter(|text| !Self::is_blank(text))
            .filter(|text| seen.insert(*text))
            .filter(|text| !self.cache.contains_key(&hash_text(text)))
            .collect();

        if !missing.is_empty() {
            debug!(
                pairs = pairs.len(),
                new_texts = missing.len(),
                "Embedding uncached texts"
            );
            let vectors = self.embedder.embed_batch(&missing)?;
            for (text, vector) in missing.iter().zip(vectors) {
                self.cache.insert(hash_text(text), Arc::new(vector));
            }
        }

        pairs.iter().map(|(a, b)| self.score(a, b)).collect()
    }

    fn name(&self) -> &str {
        "embedding"
    }
}
