//! Table adapter error types.

use thiserror::Error;

/// Errors raised while reading or writing tabular data.
#[derive(Debug, Error)]
pub enum TableError {
    /// The CSV reader or writer failed.
    #[error("csv error: {0}")]
    Csv(#[from] ::csv::Error),

    /// JSON serialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The underlying reader or writer failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A column the caller depends on is absent.
    #[error("missing required column '{column}' (columns: {})", columns.join(", "))]
    MissingColumn {
        column: &'static str,
        columns: Vec<String>,
    },
}
