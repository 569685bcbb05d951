use thiserror::Error;

use crate::oracle::OracleError;

#[derive(Debug, Error)]
pub enum GradingError {
    #[error("similarity oracle failed: {0}")]
    Oracle(#[from] OracleError),

    #[error("grading cancelled after {graded} answers")]
    Cancelled { graded: usize },

    #[error("invalid scoring policy: {reason}")]
    InvalidPolicy { reason: String },
}
