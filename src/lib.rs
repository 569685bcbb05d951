//! SmartCheck library crate (used by the CLI binary and integration tests).
//!
//! Quiz responses arrive in one of several tabular shapes. The pipeline is:
//!
//! 1. [`normalize`] detects the shape of a [`RawTable`] and melts it into
//!    [`CanonicalAnswerRow`]s, sorted by student then question.
//! 2. [`grade`] (or a configured [`GradingEngine`]) joins those rows with an
//!    [`AnswerKey`], asks a [`SimilarityOracle`] how close each answer is to the
//!    reference, and applies the [`ScoringPolicy`] to produce [`GradedRecord`]s.
//!
//! # Public API Surface
//!
//! ## Core Types
//! - [`RawTable`], [`CanonicalAnswerRow`], [`AnswerKey`] - In-memory tables
//! - [`InputShape`], [`FormatError`] - Shape detection results
//! - [`GradingEngine`], [`ScoringPolicy`], [`GradedRecord`], [`GradingSummary`] - Grading
//! - [`Config`], [`ConfigError`] - Environment configuration
//!
//! ## Oracles
//! - [`SimilarityOracle`] - The scoring capability the engine depends on
//! - [`EmbeddingOracle`] - Sentence-embedding cosine similarity
//! - [`LexicalOracle`] - Model-free fallback
//!
//! ## Test/Mock Support
//! `MockOracle` is available behind `#[cfg(any(test, feature = "mock"))]`.
//!
//! ```
//! use smartcheck::{grade, normalize, AnswerKey, LexicalOracle, RawTable};
//!
//! let table = RawTable::from_strs(&["studentID", "Q1"], &[&["001", "Bangkok"]]);
//! let rows = normalize(&table).unwrap();
//! let key: AnswerKey = [("Q1", "Bangkok")].into_iter().collect();
//!
//! let records = grade(&rows, &key, &LexicalOracle::new()).unwrap();
//! assert_eq!(records[0].score, 1.0);
//! assert!(!records[0].need_review);
//! ```

pub mod config;
pub mod constants;
pub mod embedding;
pub mod grading;
pub mod hashing;
pub mod normalize;
pub mod oracle;
pub mod table;

pub use config::{Config, ConfigError};
pub use constants::{DimValidationError, validate_embedding_dim};
pub use embedding::{EmbedderConfig, EmbeddingError, SentenceEmbedder};
pub use grading::{
    Credit, GradedRecord, GradingEngine, GradingError, GradingSummary, ScoringPolicy, grade,
    round_similarity,
};
pub use hashing::{hash_text, hash_to_u64};
pub use normalize::{FormatError, InputShape, detect_shape, normalize};
#[cfg(any(test, feature = "mock"))]
pub use oracle::MockOracle;
pub use oracle::{EmbeddingOracle, LexicalOracle, OracleError, SimilarityOracle};
pub use table::{AnswerKey, AnswerKeyEntry, CanonicalAnswerRow, RawTable, TableError};
