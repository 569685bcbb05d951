//! Cross-cutting, shared constants.
//!
//! Column names and the metadata vocabulary are part of the input contract with
//! upstream exporters. Thresholds here are the defaults; runtime overrides go
//! through [`crate::config::Config`].

/// Canonical student identifier column.
pub const STUDENT_ID_COLUMN: &str = "studentID";
/// Canonical question identifier column.
pub const QUESTION_ID_COLUMN: &str = "questionID";
/// Canonical answer text column.
pub const STUDENT_ANSWER_COLUMN: &str = "studentAnswer";

/// The three columns every canonical table carries, in output order.
pub const CANONICAL_COLUMNS: [&str; 3] =
    [STUDENT_ID_COLUMN, QUESTION_ID_COLUMN, STUDENT_ANSWER_COLUMN];

/// Answer key question column.
pub const KEY_QUESTION_COLUMN: &str = QUESTION_ID_COLUMN;
/// Answer key reference text column.
pub const KEY_ANSWER_COLUMN: &str = "correctAnswer";

/// Substrings (lowercase) that together mark a form-export identifier column.
pub const IDENTIFIER_MARKERS: [&str; 2] = ["student", "id"];

/// Substrings (lowercase) that mark a form-export column as metadata.
///
/// Matching is substring based, so `"name"` also catches `"username"` and
/// `"Full Name"`.
pub const METADATA_VOCABULARY: [&str; 5] = ["timestamp", "score", "email", "username", "name"];

/// Prefix for positional question labels (`Q1`, `Q2`, ...).
pub const SYNTHETIC_QUESTION_PREFIX: &str = "Q";

pub const DEFAULT_FULL_CREDIT_THRESHOLD: f64 = 0.85;
pub const DEFAULT_PARTIAL_CREDIT_THRESHOLD: f64 = 0.75;
pub const DEFAULT_REVIEW_THRESHOLD: f64 = 0.85;

/// Decimal places kept on the reported similarity.
pub const SIMILARITY_DECIMALS: i32 = 2;

pub const DEFAULT_BATCH_SIZE: usize = 32;

pub const DEFAULT_EMBEDDING_CACHE_CAPACITY: u64 = 10_000;

/// Hidden size of all-MiniLM-L6-v2, the model the grader was tuned against.
pub const DEFAULT_EMBEDDING_DIM: usize = 384;

/// Sentence-transformers truncates MiniLM inputs at 256 word pieces.
pub const DEFAULT_MAX_SEQ_LEN: usize = 256;

/// Error returned when a model's hidden size disagrees with the configured dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimValidationError {
    /// Embedding dimension cannot be zero.
    ZeroDimension,
    /// Runtime dimension does not match expected dimension.
    DimensionMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for DimValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ZeroDimension => write!(f, "embedding dimension cannot be zero"),
            Self::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "dimension mismatch: expected {}, got {}",
                    expected, actual
                )
            }
        }
    }
}

impl std::error::Error for DimValidationError {}

/// Validates that a runtime embedding dimension matches the expected dimension.
///
/// # Example
///
/// ```
/// use smartcheck::constants::{validate_embedding_dim, DEFAULT_EMBEDDING_DIM};
///
/// validate_embedding_dim(384, DEFAULT_EMBEDDING_DIM).unwrap();
/// assert!(validate_embedding_dim(768, DEFAULT_EMBEDDING_DIM).is_err());
/// ```
pub fn validate_embedding_dim(actual: usize, expected: usize) -> Result<(), DimValidationError> {
    if actual == 0 {
        return Err(DimValidationError::ZeroDimension);
    }
    if actual != expected {
        return Err(DimValidationError::DimensionMismatch { expected, actual });
    }
    Ok(())
}
