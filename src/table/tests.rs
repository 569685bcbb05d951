use super::csv::{read_raw_table, write_csv, write_json};
use super::*;

#[test]
fn test_raw_table_cell_access() {
    let table = RawTable::from_strs(&["studentID", "Q1", "Q2"], &[&["001", "Bangkok", ""]]);

    assert_eq!(table.column_count(), 3);
    assert_eq!(table.row_count(), 1);
    assert_eq!(table.cell(0, 1), Some("Bangkok"));
    assert_eq!(table.cell(0, 2), None);
    assert_eq!(table.cell(0, 9), None);
    assert_eq!(table.cell(5, 0), None);
}

#[test]
fn test_raw_table_short_rows_read_as_missing() {
    let table = RawTable::new(
        vec!["a".into(), "b".into()],
        vec![vec![Some("1".into())]],
    );
    assert_eq!(table.cell(0, 0), Some("1"));
    assert_eq!(table.cell(0, 1), None);
}

#[test]
fn test_with_trimmed_columns() {
    let table = RawTable::from_strs(&["  studentID ", "\tQ1"], &[]).with_trimmed_columns();
    assert_eq!(table.columns(), &["studentID".to_string(), "Q1".to_string()]);
    assert_eq!(table.column_index("Q1"), Some(1));
}

#[test]
fn test_column_index_first_match() {
    let table = RawTable::from_strs(&["x", "dup", "dup"], &[]);
    assert_eq!(table.column_index("dup"), Some(1));
    assert_eq!(table.column_index("missing"), None);
}

#[test]
fn test_answer_key_last_entry_wins() {
    let key = AnswerKey::from_entries(vec![
        AnswerKeyEntry::new("Q1", "first"),
        AnswerKeyEntry::new("Q2", "other"),
        AnswerKeyEntry::new("Q1", "second"),
    ]);

    assert_eq!(key.len(), 2);
    assert_eq!(key.get("Q1"), Some("second"));
}

#[test]
fn test_answer_key_missing_resolves_to_empty() {
    let key: AnswerKey = [("Q1", "Bangkok")].into_iter().collect();
    assert_eq!(key.reference_for("Q1"), "Bangkok");
    assert_eq!(key.reference_for("Q9"), "");
    assert!(!key.contains("Q9"));
}

#[test]
fn test_answer_key_from_table() {
    let table = RawTable::from_strs(
        &[" questionID", "correctAnswer "],
        &[&["Q1", "Bangkok"], &["", "orphan"], &["Q2", ""]],
    );
    let key = AnswerKey::from_table(&table).expect("valid key table");

    assert_eq!(key.len(), 2);
    assert_eq!(key.get("Q1"), Some("Bangkok"));
    assert_eq!(key.get("Q2"), Some(""));
}

#[test]
fn test_answer_key_from_table_missing_column() {
    let table = RawTable::from_strs(&["questionID", "answer"], &[]);
    let err = AnswerKey::from_table(&table).unwrap_err();

    match err {
        TableError::MissingColumn { column, columns } => {
            assert_eq!(column, "correctAnswer");
            assert_eq!(columns, vec!["questionID".to_string(), "answer".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_read_csv_with_padded_fields() {
    let input = "studentID, Q1, Q2\n001, \"Bangkok\", \"Control center\"\n002, Paris,\n";
    let table = read_raw_table(input.as_bytes()).expect("valid csv");

    assert_eq!(table.columns(), &["studentID", "Q1", "Q2"].map(String::from));
    assert_eq!(table.cell(0, 1), Some("Bangkok"));
    assert_eq!(table.cell(0, 2), Some("Control center"));
    assert_eq!(table.cell(1, 1), Some("Paris"));
    assert_eq!(table.cell(1, 2), None);
}

#[test]
fn test_read_csv_quoted_commas() {
    let input = "studentID,questionID,studentAnswer\n001,Q1,\"Bangkok, Thailand\"\n";
    let table = read_raw_table(input.as_bytes()).expect("valid csv");
    assert_eq!(table.cell(0, 2), Some("Bangkok, Thailand"));
}

#[test]
fn test_read_csv_ragged_rows() {
    let input = "a,b,c\n1,2\n";
    let table = read_raw_table(input.as_bytes()).expect("flexible csv");
    assert_eq!(table.cell(0, 1), Some("2"));
    assert_eq!(table.cell(0, 2), None);
}

#[test]
fn test_answer_key_from_csv() {
    let input = "questionID, correctAnswer\nQ1, \"Bangkok is the capital of Thailand.\"\n";
    let key = AnswerKey::from_csv_reader(input.as_bytes()).expect("valid key csv");
    assert_eq!(key.get("Q1"), Some("Bangkok is the capital of Thailand."));
}

#[test]
fn test_write_canonical_csv() {
    let rows = vec![
        CanonicalAnswerRow::new("001", "Q1", "Bangkok"),
        CanonicalAnswerRow::new("001", "Q2", "Control center, brain"),
    ];
    let mut out = Vec::new();
    write_csv(&rows, &mut out).expect("write succeeds");

    let text = String::from_utf8(out).expect("utf8");
    assert_eq!(
        text,
        "studentID,questionID,studentAnswer\n001,Q1,Bangkok\n001,Q2,\"Control center, brain\"\n"
    );
}

#[test]
fn test_read_csv_keeps_escaped_quotes() {
    let csv = "studentID,Q1,Q2\n001,\"\"\"Hello\"\"\",\"\"\"\"\"\"\n";
    let table = read_raw_table(csv.as_bytes()).expect("valid csv");

    assert_eq!(table.cell(0, 1), Some("\"Hello\""));
    assert_eq!(table.cell(0, 2), Some("\"\""));
}

#[test]
fn test_written_quotes_read_back_unchanged() {
    let answers = ["\"Hello\"", "say \"hi\"", "\"\"", "Bangkok, Thailand"];
    let rows: Vec<CanonicalAnswerRow> = answers
        .iter()
        .enumerate()
        .map(|(i, answer)| CanonicalAnswerRow::new("001", format!("Q{}", i + 1), *answer))
        .collect();
    let mut out = Vec::new();
    write_csv(&rows, &mut out).expect("write succeeds");

    let table = read_raw_table(out.as_slice()).expect("valid csv");
    assert_eq!(table.row_count(), answers.len());
    for (i, answer) in answers.iter().enumerate() {
        assert_eq!(table.cell(i, 2), Some(*answer));
    }
}

#[test]
fn test_write_json() {
    let rows = vec![CanonicalAnswerRow::new("001", "Q1", "Bangkok")];
    let mut out = Vec::new();
    write_json(&rows, &mut out).expect("write succeeds");

    let value: serde_json::Value = serde_json::from_slice(&out).expect("valid json");
    assert_eq!(value[0]["studentID"], "001");
    assert_eq!(value[0]["questionID"], "Q1");
    assert_eq!(value[0]["studentAnswer"], "Bangkok");
}
