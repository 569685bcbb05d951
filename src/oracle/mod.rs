//! Similarity oracles: the text-similarity capability grading depends on.
//!
//! The grading engine only sees [`SimilarityOracle`]. Implementations here:
//!
//! - [`EmbeddingOracle`]: cosine similarity of sentence embeddings
//!   (see [`crate::embedding`]), clamped to `[0, 1]`.
//! - [`LexicalOracle`]: model-free content-word overlap; the fallback when no
//!   model is configured.
//! - `MockOracle`: scripted scores for tests (`mock` feature).
//!
//! Oracles are constructed and owned by the caller and passed into each
//! grading run. There is no process-wide model instance.

pub mod embedding;
pub mod error;
pub mod lexical;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

#[cfg(test)]
mod tests;

pub use embedding::EmbeddingOracle;
pub use error::OracleError;
pub use lexical::LexicalOracle;
#[cfg(any(test, feature = "mock"))]
pub use mock::MockOracle;

/// Scores how closely two texts agree in meaning.
///
/// Contract:
/// - deterministic for identical inputs within a run;
/// - `score(x, x)` is close to `1.0` for non-empty `x`;
/// - `score(x, "")` is low;
/// - results are already scaled into roughly `[0, 1]`.
pub trait SimilarityOracle {
    /// Similarity of `text_a` (the student answer) to `text_b` (the reference).
    fn score(&self, text_a: &str, text_b: &str) -> Result<f64, OracleError>;

    /// Scores several pairs at once. Must return exactly one score per pair,
    /// identical to what [`score`](Self::score) would return for it.
    fn score_batch(&self, pairs: &[(&str, &str)]) -> Result<Vec<f64>, OracleError> {
        pairs.iter().map(|(a, b)| self.score(a, b)).collect()
    }

    /// Short label used in logs.
    fn name(&self) -> &str {
        "oracle"
    }
}

impl<T: SimilarityOracle + ?Sized> SimilarityOracle for &T {
    fn score(&self, text_a: &str, text_b: &str) -> Result<f64, OracleError> {
        (**self).score(text_a, text_b)
    }

    fn score_batch(&self, pairs: &[(&str, &str)]) -> Result<Vec<f64>, OracleError> {
        (**self).score_batch(pairs)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}

impl<T: SimilarityOracle + ?Sized> SimilarityOracle for Box<T> {
    fn score(&self, text_a: &str, text_b: &str) -> Result<f64, OracleError> {
        (**self).score(text_a, text_b)
    }

    fn score_batch(&self, pairs: &[(&str, &str)]) -> Result<Vec<f64>, OracleError> {
        (**self).score_batch(pairs)
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
