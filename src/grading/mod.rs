//! Grading engine: answer key join, similarity scoring and the credit/review policy.
//!
//! Each canonical row is paired with its reference answer (empty when the key
//! has no entry), scored by a [`SimilarityOracle`], and mapped through a
//! [`ScoringPolicy`]. Output order and cardinality match the input exactly.

pub mod engine;
pub mod error;
pub mod policy;
pub mod types;


pub use engine::GradingEngine;
pub use error::GradingError;
pub use policy::{ScoringPolicy, round_similarity};
pub use types::{Credit, GradedRecord, GradingSummary};

use crate::oracle::SimilarityOracle;
use crate::table::{AnswerKey, CanonicalAnswerRow};

/// Grades `rows` with the default policy and batch size.
pub fn grade<O>(
    rows: &[CanonicalAnswerRow],
    key: &AnswerKey,
    oracle: &O,
) -> Result<Vec<GradedRecord>, GradingError>
where
    O: SimilarityOracle + ?Sized,
{
    GradingEngine::default().grade(rows, key, oracle)
}
