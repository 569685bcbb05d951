use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, info, warn};

use crate::constants::DEFAULT_BATCH_SIZE;
use crate::oracle::{OracleError, SimilarityOracle};
use crate::table::{AnswerKey, CanonicalAnswerRow};

use super::error::GradingError;
use super::policy::{ScoringPolicy, round_similarity};
use super::types::GradedRecord;

/// Scores canonical answers against an answer key through a similarity oracle.
#[derive(Debug, Clone)]
pub struct GradingEngine {
    policy: ScoringPolicy,
    batch_size: usize,
}

impl Default for GradingEngine {
    fn default() -> Self {
        Self {
            policy: ScoringPolicy::default(),
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }
}

impl GradingEngine {
    pub fn new(policy: ScoringPolicy, batch_size: usize) -> Result<Self, GradingError> {
        policy.validate()?;
        if batch_size == 0 {
            return Err(GradingError::InvalidPolicy {
                reason: "batch_size must be greater than zero".to_string(),
            });
        }
        Ok(Self { policy, batch_size })
    }

    pub fn with_policy(policy: ScoringPolicy) -> Result<Self, GradingError> {
        Self::new(policy, DEFAULT_BATCH_SIZE)
    }

    pub fn policy(&self) -> &ScoringPolicy {
        &self.policy
    }

    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Grades every row, in input order. Any oracle failure aborts the run.
    pub fn grade<O>(
        &self,
        rows: &[CanonicalAnswerRow],
        key: &AnswerKey,
        oracle: &O,
    ) -> Result<Vec<GradedRecord>, GradingError>
    where
        O: SimilarityOracle + ?Sized,
    {
        let never = AtomicBool::new(false);
        self.grade_with_cancel(rows, key, oracle, &never)
    }

    /// Like [`grade`](Self::grade), checking `cancel` before each batch.
    pub fn grade_with_cancel<O>(
        &self,
        rows: &[CanonicalAnswerRow],
        key: &AnswerKey,
        oracle: &O,
        cancel: &AtomicBool,
    ) -> Result<Vec<GradedRecord>, GradingError>
    where
        O: SimilarityOracle + ?Sized,
    {
        info!(
            rows = rows.len(),
            key_entries = key.len(),
            oracle = oracle.name(),
            batch_size = self.batch_size,
            "Grading run started"
        );

        let mut warned: HashSet<&str> = HashSet::new();
        let mut graded = Vec::with_capacity(rows.len());

        for chunk in rows.chunks(self.batch_size) {
            if cancel.load(Ordering::Relaxed) {
                warn!(graded = graded.len(), "Grading run cancelled");
                return Err(GradingError::Cancelled {
                    graded: graded.len(),
                });
            }

            let pairs: Vec<(&str, &str)> = chunk
                .iter()
                .map(|row| {
                    let reference = key.get(&row.question_id);
                    if reference.is_none() && warned.insert(row.question_id.as_str()) {
                        warn!(
                            question_id = %row.question_id,
                            "Question missing from answer key, grading against empty reference"
                        );
                    }
                    (row.student_answer.as_str(), reference.unwrap_or(""))
                })
                .collect();

            let scores = oracle.score_batch(&pairs)?;
            if scores.len() != pairs.len() {
                return Err(OracleError::BatchSizeMismatch {
                    expected: pairs.len(),
                    actual: scores.len(),
                }
                .into());
            }

            for ((row, (_, reference)), raw) in chunk.iter().zip(&pairs).zip(scores) {
                let key_missing = !key.contains(&row.question_id);
                graded.push(self.grade_row(row, reference, key_missing, raw)?);
            }
        }

        let needs_review = graded.iter().filter(|r| r.need_review).count();
        info!(
            graded = graded.len(),
            needs_review,
            oracle = oracle.name(),
            "Grading run finished"
        );

        Ok(graded)
    }

    fn grade_row(
        &self,
        row: &CanonicalAnswerRow,
        reference: &str,
        key_missing: bool,
        raw: f64,
    ) -> Result<GradedRecord, GradingError> {
        if !raw.is_finite() {
            return Err(OracleError::NonFinite { value: raw }.into());
        }

        let credit = self.policy.credit(raw);
        let need_review = key_missing || self.policy.needs_review(raw);
        let similarity = round_similarity(raw.clamp(0.0, 1.0));

        debug!(
            student_id = %row.student_id,
            question_id = %row.question_id,
            raw_similarity = raw,
            similarity,
            credit = %credit,
            need_review,
            "Graded answer"
        );

        Ok(GradedRecord {
            student_id: row.student_id.clone(),
            question_id: row.question_id.clone(),
            student_answer: row.student_answer.clone(),
            correct_answer: reference.to_string(),
            similarity,
            score: credit.points(),
            need_review,
        })
    }
}
