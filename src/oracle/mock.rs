use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{OracleError, SimilarityOracle};

/// Scripted oracle for tests.
///
/// Returns the score registered for an exact `(student, reference)` pair,
/// else `0.0` when the reference is empty, else the default score.
#[derive(Debug, Default)]
pub struct MockOracle {
    pairs: HashMap<(String, String), f64>,
    default_score: f64,
    fail_after: Option<usize>,
    calls: AtomicUsize,
    batches: AtomicUsize,
}

impl MockOracle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Oracle that returns `score` for every non-empty reference.
    pub fn constant(score: f64) -> Self {
        Self::new().with_default(score)
    }

    pub fn with_default(mut self, score: f64) -> Self {
        self.default_score = score;
        self
    }

    pub fn with_pair(
        mut self,
        student_answer: impl Into<String>,
        reference: impl Into<String>,
        score: f64,
    ) -> Self {
        self.pairs
            .insert((student_answer.into(), reference.into()), score);
        self
    }

    /// Fails every call once `successes` pairs have been scored.
    pub fn failing_after(mut self, successes: usize) -> Self {
        self.fail_after = Some(successes);
        self
    }

    /// Number of pairs scored so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of `score_batch` invocations so far.
    pub fn batches(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }
}

impl SimilarityOracle for MockOracle {
    fn score(&self, text_a: &str, text_b: &str) -> Result<f64, OracleError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(limit) = self.fail_after
            && call >= limit
        {
            return Err(OracleError::Unavailable {
                reason: format!("mock oracle configured to fail after {limit} calls"),
            });
        }

        if let Some(score) = self.pairs.get(&(text_a.to_string(), text_b.to_string())) {
            return Ok(*score);
        }
        if text_b.is_empty() {
            return Ok(0.0);
        }
        Ok(self.default_score)
    }

    fn score_batch(&self, pairs: &[(&str, &str)]) -> Result<Vec<f64>, OracleError> {
        self.batches.fetch_add(1, Ordering::SeqCst);
        pairs.iter().map(|(a, b)| self.score(a, b)).collect()
    }

    fn name(&self) -> &str {
        "mock"
    }
}
