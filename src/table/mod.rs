//! In-memory tabular types shared by the normalizer and the grading engine.
//!
//! - [`RawTable`] is whatever the upload layer handed us: named columns and
//!   nullable cells, shape unknown.
//! - [`CanonicalAnswerRow`] is the one shape grading understands.
//! - [`AnswerKey`] maps question ids to reference answers.
//!
//! [`csv`] adapts these to and from any `Read`/`Write`; nothing here opens files.

pub mod csv;
pub mod error;

#[cfg(test)]
mod tests;

pub use error::TableError;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::constants::{KEY_ANSWER_COLUMN, KEY_QUESTION_COLUMN};

/// A table of unknown shape. Cells are `None` when missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    columns: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Creates a table. Rows shorter than the header read as missing cells;
    /// cells past the last column are ignored.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        Self { columns, rows }
    }

    /// Creates a table from string literals, treating `""` as a missing cell.
    ///
    /// ```
    /// use smartcheck::RawTable;
    ///
    /// let table = RawTable::from_strs(&["studentID", "Q1"], &[&["001", ""]]);
    /// assert_eq!(table.cell(0, 0), Some("001"));
    /// assert_eq!(table.cell(0, 1), None);
    /// ```
    pub fn from_strs(columns: &[&str], rows: &[&[&str]]) -> Self {
        let columns = columns.iter().map(|c| c.to_string()).collect();
        let rows = rows
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| (!cell.is_empty()).then(|| cell.to_string()))
                    .collect()
            })
            .collect();
        Self { columns, rows }
    }

    /// Appends a row.
    pub fn push_row(&mut self, row: Vec<Option<String>>) {
        self.rows.push(row);
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the cell at (`row`, `column`), or `None` if missing or out of range.
    pub fn cell(&self, row: usize, column: usize) -> Option<&str> {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .and_then(|c| c.as_deref())
    }

    /// Position of the first column named exactly `name`.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Returns the table with surrounding whitespace removed from every column name.
    pub fn with_trimmed_columns(mut self) -> Self {
        for column in &mut self.columns {
            let trimmed = column.trim();
            if trimmed.len() != column.len() {
                *column = trimmed.to_string();
            }
        }
        self
    }
}

/// One student's answer to one question.
///
/// Produced only by [`crate::normalize::normalize`], which guarantees
/// `student_answer` is non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanonicalAnswerRow {
    #[serde(rename = "studentID")]
    pub student_id: String,
    #[serde(rename = "questionID")]
    pub question_id: String,
    #[serde(rename = "studentAnswer")]
    pub student_answer: String,
}

impl CanonicalAnswerRow {
    pub fn new(
        student_id: impl Into<String>,
        question_id: impl Into<String>,
        student_answer: impl Into<String>,
    ) -> Self {
        Self {
            student_id: student_id.into(),
            question_id: question_id.into(),
            student_answer: student_answer.into(),
        }
    }
}

/// A single `(questionID, correctAnswer)` line of an answer key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerKeyEntry {
    #[serde(rename = "questionID")]
    pub question_id: String,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
}

impl AnswerKeyEntry {
    pub fn new(question_id: impl Into<String>, correct_answer: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            correct_answer: correct_answer.into(),
        }
    }
}

/// Question id → reference answer. Later entries overwrite earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerKey {
    answers: HashMap<String, String>,
}

impl AnswerKey {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a key from entries; a repeated question id keeps the last answer.
    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = AnswerKeyEntry>,
    {
        let mut key = Self::new();
        for entry in entries {
            key.insert(entry.question_id, entry.correct_answer);
        }
        key
    }

    /// Builds a key from a table with `questionID` and `correctAnswer` columns.
    ///
    /// Rows without a question id are skipped; a missing answer cell becomes `""`.
    pub fn from_table(table: &RawTable) -> Result<Self, TableError> {
        let table = table.clone().with_trimmed_columns();
        let question_col =
            table
                .column_index(KEY_QUESTION_COLUMN)
                .ok_or_else(|| TableError::MissingColumn {
                    column: KEY_QUESTION_COLUMN,
                    columns: table.columns().to_vec(),
                })?;
        let answer_col =
            table
                .column_index(KEY_ANSWER_COLUMN)
                .ok_or_else(|| TableError::MissingColumn {
                    column: KEY_ANSWER_COLUMN,
                    columns: table.columns().to_vec(),
                })?;

        let mut key = Self::new();
        for row in 0..table.row_count() {
            let Some(question_id) = table.cell(row, question_col) else {
                debug!(row, "Skipping answer key row without a question id");
                continue;
            };
            let answer = table.cell(row, answer_col).unwrap_or_default();
            key.insert(question_id.to_string(), answer.to_string());
        }
        Ok(key)
    }

    /// Inserts or overwrites a reference answer, returning the previous one.
    pub fn insert(&mut self, question_id: String, correct_answer: String) -> Option<String> {
        let previous = self.answers.insert(question_id, correct_answer);
        if previous.is_some() {
            debug!("Answer key entry overwritten by a later duplicate");
        }
        previous
    }

    pub fn get(&self, question_id: &str) -> Option<&str> {
        self.answers.get(question_id).map(String::as_str)
    }

    /// Reference answer for `question_id`, or `""` when the key has none.
    pub fn reference_for(&self, question_id: &str) -> &str {
        self.get(question_id).unwrap_or_default()
    }

    pub fn contains(&self, question_id: &str) -> bool {
        self.answers.contains_key(question_id)
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }
}

impl<Q: Into<String>, A: Into<String>> FromIterator<(Q, A)> for AnswerKey {
    fn from_iter<T: IntoIterator<Item = (Q, A)>>(iter: T) -> Self {
        Self::from_entries(
            iter.into_iter()
                .map(|(q, a)| AnswerKeyEntry::new(q, a)),
        )
    }
}
