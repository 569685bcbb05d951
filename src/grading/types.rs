use std::collections::{BTreeSet, HashSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::table::AnswerKey;

/// Credit band awarded for an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Credit {
    Full,
    Partial,
    Zero,
}

impl Credit {
    pub fn points(self) -> f64 {
        match self {
            Credit::Full => 1.0,
            Credit::Partial => 0.5,
            Credit::Zero => 0.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Credit::Full => "full",
            Credit::Partial => "partial",
            Credit::Zero => "zero",
        }
    }
}

impl fmt::Display for Credit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One graded answer. Field names serialize in the exported column style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradedRecord {
    #[serde(rename = "studentID")]
    pub student_id: String,
    #[serde(rename = "questionID")]
    pub question_id: String,
    #[serde(rename = "studentAnswer")]
    pub student_answer: String,
    #[serde(rename = "correctAnswer")]
    pub correct_answer: String,
    /// Reported similarity in `[0, 1]`, rounded to two decimals.
    pub similarity: f64,
    /// `1.0`, `0.5` or `0.0`.
    pub score: f64,
    #[serde(rename = "needReview")]
    pub need_review: bool,
}

/// Run-level figures for a graded sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradingSummary {
    pub total_answers: usize,
    pub students: usize,
    /// Mean of `score` over all records (`0.0` when there are none).
    pub average_score: f64,
    pub needs_review: usize,
    /// Question ids that had no answer key entry, sorted.
    pub missing_key_questions: Vec<String>,
}

impl GradingSummary {
    pub fn from_records(records: &[GradedRecord], key: &AnswerKey) -> Self {
        let students: HashSet<&str> = records.iter().map(|r| r.student_id.as_str()).collect();
        let missing: BTreeSet<&str> = records
            .iter()
            .map(|r| r.question_id.as_str())
            .filter(|question_id| !key.contains(question_id))
            .collect();

        let average_score = if records.is_empty() {
            0.0
        } else {
            records.iter().map(|r| r.score).sum::<f64>() / records.len() as f64
        };

        Self {
            total_answers: records.len(),
            students: students.len(),
            average_score,
            needs_review: records.iter().filter(|r| r.need_review).count(),
            missing_key_questions: missing.into_iter().map(str::to_string).collect(),
        }
    }
}

impl fmt::Display for GradingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} answers from {} students, average score {:.2}, {} need review",
            self.total_answers, self.students, self.average_score, self.needs_review
        )?;
        if !self.missing_key_questions.is_empty() {
            write!(
                f,
                ", missing from key: {}",
                self.missing_key_questions.join(", ")
            )?;
        }
        Ok(())
    }
}
