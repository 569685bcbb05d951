//! Format normalization: any supported response layout → canonical rows.
//!
//! Detection runs an ordered rule list (see [`InputShape`]):
//!
//! 1. [`InputShape::Canonical`]: `studentID`, `questionID` and `studentAnswer`
//!    are all present. Projected as-is.
//! 2. [`InputShape::FormExport`]: no literal `studentID`, but some column
//!    contains both "student" and "id" (case-insensitive). Metadata columns are
//!    excluded and the rest are labelled `Q1..Qn` by position.
//! 3. [`InputShape::PlainWide`]: a literal `studentID` column; every other
//!    column is a question named by its header.
//!
//! Anything else is a [`FormatError`]. There is no fallback guessing.
//!
//! Every path trims column names first, drops blank answers, and returns rows
//! stably sorted by `(studentID, questionID)`.

mod error;
mod rules;


pub use error::FormatError;
pub use rules::InputShape;

use tracing::{debug, info};

use crate::table::{CanonicalAnswerRow, RawTable};

use rules::DETECTION_RULES;

/// Returns the layout the normalizer would use for `table`, if any.
pub fn detect_shape(table: &RawTable) -> Option<InputShape> {
    let table = table.clone().with_trimmed_columns();
    DETECTION_RULES
        .iter()
        .find(|rule| (rule.matches)(&table))
        .map(|rule| rule.shape)
}

/// Converts `table` into canonical answer rows.
///
/// Output is deterministic for a given table and sorted ascending by
/// `(student_id, question_id)` with byte-wise, case-sensitive comparison.
pub fn normalize(table: &RawTable) -> Result<Vec<CanonicalAnswerRow>, FormatError> {
    let table = table.clone().with_trimmed_columns();

    let Some(rule) = DETECTION_RULES.iter().find(|rule| (rule.matches)(&table)) else {
        debug!(columns = ?table.columns(), "No detection rule matched");
        return Err(FormatError::UnrecognizedSchema {
            columns: table.columns().to_vec(),
        });
    };

    let mut rows = (rule.transform)(&table)?;
    sort_canonical(&mut rows);

    info!(
        shape = %rule.shape,
        input_rows = table.row_count(),
        input_columns = table.column_count(),
        output_rows = rows.len(),
        "Normalized response table"
    );

    Ok(rows)
}

/// Stable sort by `(student_id, question_id)`.
pub fn sort_canonical(rows: &mut [CanonicalAnswerRow]) {
    rows.sort_by(|a, b| {
        a.student_id
            .cmp(&b.student_id)
            .then_with(|| a.question_id.cmp(&b.question_id))
    });
}
