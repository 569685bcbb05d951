//! Plugging a custom similarity measure into the grading engine.
//!
//! Run with: cargo run --example custom_oracle

use anyhow::Result;

use smartcheck::{
    AnswerKey, CanonicalAnswerRow, GradingEngine, OracleError, ScoringPolicy, SimilarityOracle,
};

/// Case-insensitive exact match: 1.0 or 0.0.
struct ExactMatch;

impl SimilarityOracle for ExactMatch {
    fn score(&self, student: &str, reference: &str) -> Result<f64, OracleError> {
        let same = student.trim().eq_ignore_ascii_case(reference.trim());
        Ok(if same && !reference.trim().is_empty() { 1.0 } else { 0.0 })
    }

    fn name(&self) -> &str {
        "exact-match"
    }
}

fn main() -> Result<()> {
    let rows = vec![
        CanonicalAnswerRow::new("001", "Q1", "Bangkok"),
        CanonicalAnswerRow::new("002", "Q1", "bangkok "),
        CanonicalAnswerRow::new("003", "Q1", "Chiang Mai"),
        CanonicalAnswerRow::new("003", "Q2", "Mekong"),
    ];
    let key: AnswerKey = [("Q1", "Bangkok")].into_iter().collect();

    // Stricter bands than the default: no partial credit at all.
    let policy = ScoringPolicy::new(0.99, 0.99, 0.99)?;
    let engine = GradingEngine::new(policy, 2)?;

    for record in engine.grade(&rows, &key, &ExactMatch)? {
        println!(
            "{} {} score={} review={}",
            record.student_id, record.question_id, record.score, record.need_review
        );
    }

    Ok(())
}
