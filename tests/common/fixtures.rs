//! Test fixtures for integration tests.

use smartcheck::{AnswerKey, RawTable};

/// Three students answering three questions, one column per question.
pub const SAMPLE_QUIZ_CSV: &str = "\
studentID,Q1,Q2,Q3
001,Bangkok is the capital city of Thailand.,Brain's main control center.,Water boils at 100 C.
002,Bangkok,main control center of the brain.,100 degrees Celsius is the boiling point of water.
003,Samut Prakan is near Bangkok.,control center.,The boiling point of water is 100 degrees Celsius.
";

pub const SAMPLE_KEY_CSV: &str = "\
questionID, correctAnswer
Q1, \"Bangkok is the capital of Thailand.\"
Q2, \"The hypothalamus acts as the brain's main control center.\"
Q3, \"The boiling point of water is 100 degrees Celsius.\"
";

/// Survey-tool export: metadata columns plus full question text headers.
pub const FORM_EXPORT_CSV: &str = "\
Timestamp,Score,Student ID,What is the capital of Thailand?,What is the function of the hypothalamus?
11/19/2025 23:04:56,,001,Bangkok,Control center
11/19/2025 23:06:10,,002,Paris,Hypothalamus
";

/// Long format with padded, quoted answers.
pub const LONG_FORMAT_CSV: &str = "\
studentID, questionID, studentAnswer
002, Q1, \"Paris\"
001, Q2, \"Control center\"
001, Q1, \"Bangkok\"
";

pub const SAMPLE_STUDENTS: usize = 3;

pub const SAMPLE_QUESTIONS: usize = 3;

pub fn table(csv: &str) -> RawTable {
    RawTable::from_csv_reader(csv.as_bytes()).expect("fixture CSV should parse")
}

pub fn sample_key() -> AnswerKey {
    AnswerKey::from_csv_reader(SAMPLE_KEY_CSV.as_bytes()).expect("fixture key should parse")
}

/// Wide table of `students` x `questions` synthetic answers.
pub fn generated_wide_table(students: usize, questions: usize) -> RawTable {
    let mut columns = vec!["studentID".to_string()];
    columns.extend((1..=questions).map(|q| format!("Q{q}")));

    let rows = (1..=students)
        .map(|s| {
            let mut row = vec![Some(format!("{s:04}"))];
            row.extend((1..=questions).map(|q| Some(format!("answer {s} to question {q}"))));
            row
        })
        .collect();

    RawTable::new(columns, rows)
}
