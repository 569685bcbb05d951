//! CSV and JSON adapters for the table types.
//!
//! Readers follow the conventions of the spreadsheet exports we receive: empty
//! cells are missing, whitespace around fields is dropped, and a quoted field
//! preceded by a space (`001, "Bangkok"`) loses its quotes. Fields quoted the
//! standard way are decoded by the `csv` reader and kept verbatim otherwise.

use std::borrow::Cow;
use std::io::{Read, Write};

use ::csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::Serialize;
use tracing::debug;

use super::error::TableError;
use super::{AnswerKey, RawTable};

/// Reads a CSV document (header row first) into a [`RawTable`].
pub fn read_raw_table<R: Read>(reader: R) -> Result<RawTable, TableError> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::None)
        .from_reader(reader);

    let columns: Vec<String> = csv_reader
        .headers()?
        .iter()
        .map(|h| clean_field(h).to_string())
        .collect();

    let mut table = RawTable::new(columns, Vec::new());
    for record in csv_reader.records() {
        let record = record?;
        let row = record
            .iter()
            .map(|field| {
                let field = clean_field(field);
                (!field.is_empty()).then(|| field.to_string())
            })
            .collect();
        table.push_row(row);
    }

    debug!(
        columns = table.column_count(),
        rows = table.row_count(),
        "Read CSV table"
    );

    Ok(table)
}

/// Writes any serializable records as CSV, header row included.
pub fn write_csv<T: Serialize, W: Write>(records: &[T], writer: W) -> Result<(), TableError> {
    let mut csv_writer = WriterBuilder::new().has_headers(true).from_writer(writer);
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Writes records as a pretty-printed JSON array.
pub fn write_json<T: Serialize, W: Write>(records: &[T], mut writer: W) -> Result<(), TableError> {
    serde_json::to_writer_pretty(&mut writer, records)?;
    writer.write_all(b"\n")?;
    Ok(())
}

impl RawTable {
    /// Reads a table from CSV. See [`read_raw_table`].
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        read_raw_table(reader)
    }
}

impl AnswerKey {
    /// Reads a `questionID,correctAnswer` CSV into a key.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        let table = read_raw_table(reader)?;
        AnswerKey::from_table(&table)
    }
}

/// Trims a decoded field. When the raw field opened with padding and then a
/// quote, the reader left the quotes in place, so one enclosing pair is
/// stripped and doubled quotes inside are unescaped.
fn clean_field(field: &str) -> Cow<'_, str> {
    let trimmed = field.trim();
    let padded_quote = field.starts_with(char::is_whitespace) && trimmed.starts_with('"');
    if padded_quote && trimmed.len() >= 2 && trimmed.ends_with('"') {
        let inner = &trimmed[1..trimmed.len() - 1];
        Cow::Owned(inner.replace("\"\"", "\"").trim().to_string())
    } else {
        Cow::Borrowed(trimmed)
    }
}
