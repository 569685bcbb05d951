use std::fmt;

use tracing::debug;

use crate::constants::{
    CANONICAL_COLUMNS, IDENTIFIER_MARKERS, METADATA_VOCABULARY, QUESTION_ID_COLUMN,
    STUDENT_ANSWER_COLUMN, STUDENT_ID_COLUMN, SYNTHETIC_QUESTION_PREFIX,
};
use crate::table::{CanonicalAnswerRow, RawTable};

use super::error::FormatError;

/// Layouts the normalizer knows how to read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputShape {
    /// Long form: `studentID, questionID, studentAnswer` (extra columns ignored).
    Canonical,
    /// Wide form-export: one identifier column like `Student ID`, metadata
    /// columns such as `Timestamp`, and one column per question.
    FormExport,
    /// Wide form: `studentID` plus one column per question, named by question id.
    PlainWide,
}

impl InputShape {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputShape::Canonical => "canonical",
            InputShape::FormExport => "form-export",
            InputShape::PlainWide => "plain-wide",
        }
    }
}

impl fmt::Display for InputShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

type Transform = fn(&RawTable) -> Result<Vec<CanonicalAnswerRow>, FormatError>;

/// A (predicate, transform) pair. Rules are tried in order; the first whose
/// predicate holds owns the table, even if its transform then fails.
pub(crate) struct DetectionRule {
    pub shape: InputShape,
    pub matches: fn(&RawTable) -> bool,
    pub transform: Transform,
}

pub(crate) const DETECTION_RULES: [DetectionRule; 3] = [
    DetectionRule {
        shape: InputShape::Canonical,
        matches: is_canonical,
        transform: project_canonical,
    },
    DetectionRule {
        shape: InputShape::FormExport,
        matches: is_form_export,
        transform: melt_form_export,
    },
    DetectionRule {
        shape: InputShape::PlainWide,
        matches: is_plain_wide,
        transform: melt_plain_wide,
    },
];

fn is_canonical(table: &RawTable) -> bool {
    CANONICAL_COLUMNS
        .iter()
        .all(|name| table.column_index(name).is_some())
}

// A literal `studentID` column means plain-wide, even though it also passes
// the identifier substring test.
fn is_form_export(table: &RawTable) -> bool {
    table.column_index(STUDENT_ID_COLUMN).is_none() && identifier_column(table).is_some()
}

fn is_plain_wide(table: &RawTable) -> bool {
    table.column_index(STUDENT_ID_COLUMN).is_some()
}

/// First column whose lowercased name contains every identifier marker.
pub(crate) fn identifier_column(table: &RawTable) -> Option<usize> {
    table.columns().iter().position(|name| {
        let lower = name.to_lowercase();
        IDENTIFIER_MARKERS.iter().all(|marker| lower.contains(marker))
    })
}

/// True if the column name contains any metadata vocabulary word.
pub(crate) fn is_metadata_column(name: &str) -> bool {
    let lower = name.to_lowercase();
    METADATA_VOCABULARY.iter().any(|word| lower.contains(word))
}

fn project_canonical(table: &RawTable) -> Result<Vec<CanonicalAnswerRow>, FormatError> {
    let index = |name: &str| {
        table
            .column_index(name)
            .ok_or_else(|| FormatError::UnrecognizedSchema {
                columns: table.columns().to_vec(),
            })
    };
    let student_col = index(STUDENT_ID_COLUMN)?;
    let question_col = index(QUESTION_ID_COLUMN)?;
    let answer_col = index(STUDENT_ANSWER_COLUMN)?;

    let mut rows = Vec::with_capacity(table.row_count());
    for row in 0..table.row_count() {
        let Some(answer) = answer_text(table.cell(row, answer_col)) else {
            continue;
        };
        rows.push(CanonicalAnswerRow::new(
            table.cell(row, student_col).unwrap_or_default(),
            table.cell(row, question_col).unwrap_or_default(),
            answer,
        ));
    }
    Ok(rows)
}

fn melt_form_export(table: &RawTable) -> Result<Vec<CanonicalAnswerRow>, FormatError> {
    let Some(id_col) = identifier_column(table) else {
        return Err(FormatError::UnrecognizedSchema {
            columns: table.columns().to_vec(),
        });
    };

    let question_cols: Vec<(usize, String)> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(idx, name)| {
            if *idx == id_col {
                return false;
            }
            if is_metadata_column(name) {
                debug!(column = %name, "Excluding metadata column");
                return false;
            }
            true
        })
        .enumerate()
        .map(|(position, (idx, _))| {
            (idx, format!("{}{}", SYNTHETIC_QUESTION_PREFIX, position + 1))
        })
        .collect();

    if question_cols.is_empty() {
        return Err(FormatError::NoQuestionColumns {
            columns: table.columns().to_vec(),
        });
    }

    debug!(
        identifier = %table.columns()[id_col],
        questions = question_cols.len(),
        "Melting form export"
    );

    Ok(melt(table, id_col, &question_cols))
}

fn melt_plain_wide(table: &RawTable) -> Result<Vec<CanonicalAnswerRow>, FormatError> {
    let Some(id_col) = table.column_index(STUDENT_ID_COLUMN) else {
        return Err(FormatError::UnrecognizedSchema {
            columns: table.columns().to_vec(),
        });
    };

    let question_cols: Vec<(usize, String)> = table
        .columns()
        .iter()
        .enumerate()
        .filter(|(idx, _)| *idx != id_col)
        .map(|(idx, name)| (idx, name.clone()))
        .collect();

    if question_cols.is_empty() {
        return Err(FormatError::NoQuestionColumns {
            columns: table.columns().to_vec(),
        });
    }

    Ok(melt(table, id_col, &question_cols))
}

/// Pivots wide rows to one row per (student, question column), column by
/// column, skipping missing and blank answers.
fn melt(
    table: &RawTable,
    id_col: usize,
    question_cols: &[(usize, String)],
) -> Vec<CanonicalAnswerRow> {
    let mut rows = Vec::with_capacity(table.row_count() * question_cols.len());
    let mut dropped = 0usize;

    for (col, question_id) in question_cols {
        for row in 0..table.row_count() {
            match answer_text(table.cell(row, *col)) {
                Some(answer) => rows.push(CanonicalAnswerRow::new(
                    table.cell(row, id_col).unwrap_or_default(),
                    question_id.as_str(),
                    answer,
                )),
                None => dropped += 1,
            }
        }
    }

    if dropped > 0 {
        debug!(dropped, "Dropped missing or blank answers");
    }

    rows
}

/// The raw answer, or `None` if it is missing or only whitespace.
fn answer_text(cell: Option<&str>) -> Option<&str> {
    cell.filter(|text| !text.trim().is_empty())
}
