use thiserror::Error;

/// The input table could not be mapped onto the canonical schema.
///
/// Both variants carry the (trimmed) column list that was observed so the
/// caller can show it to whoever uploaded the file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// None of the detection rules matched.
    #[error("unrecognized schema (columns: {})", columns.join(", "))]
    UnrecognizedSchema { columns: Vec<String> },

    /// A wide layout was recognized but every non-identifier column was metadata.
    #[error("no question columns (columns: {})", columns.join(", "))]
    NoQuestionColumns { columns: Vec<String> },
}

impl FormatError {
    /// Columns observed in the rejected table.
    pub fn columns(&self) -> &[String] {
        match self {
            FormatError::UnrecognizedSchema { columns }
            | FormatError::NoQuestionColumns { columns } => columns,
        }
    }
}
