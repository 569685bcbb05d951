//! Normalize and grade the sample quiz with the model-free lexical oracle.
//!
//! Run with: cargo run --example grade_sample

use anyhow::Result;

use smartcheck::table::csv::write_csv;
use smartcheck::{AnswerKey, GradingSummary, LexicalOracle, RawTable, detect_shape, grade, normalize};

const QUIZ: &str = "\
studentID,Q1,Q2,Q3
001,Bangkok is the capital city of Thailand.,Brain's main control center.,Water boils at 100 C.
002,Bangkok,main control center of the brain.,100 degrees Celsius is the boiling point of water.
003,Samut Prakan is near Bangkok.,control center.,The boiling point of water is 100 degrees Celsius.
";

const KEY: &str = "\
questionID,correctAnswer
Q1,Bangkok is the capital of Thailand.
Q2,The hypothalamus acts as the brain's main control center.
Q3,The boiling point of water is 100 degrees Celsius.
";

fn main() -> Result<()> {
    let table = RawTable::from_csv_reader(QUIZ.as_bytes())?;
    if let Some(shape) = detect_shape(&table) {
        eprintln!("detected {shape} input");
    }

    let rows = normalize(&table)?;
    let key = AnswerKey::from_csv_reader(KEY.as_bytes())?;
    let records = grade(&rows, &key, &LexicalOracle::new())?;

    write_csv(&records, std::io::stdout().lock())?;
    eprintln!("{}", GradingSummary::from_records(&records, &key));

    Ok(())
}
