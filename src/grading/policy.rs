use crate::constants::{
    DEFAULT_FULL_CREDIT_THRESHOLD, DEFAULT_PARTIAL_CREDIT_THRESHOLD, DEFAULT_REVIEW_THRESHOLD,
    SIMILARITY_DECIMALS,
};

use super::error::GradingError;
use super::types::Credit;

/// Threshold policy mapping a similarity to credit and a review flag.
///
/// Both decisions use the similarity exactly as the oracle returned it.
/// Rounding only affects the value reported on the record, so `0.849999`
/// earns partial credit even though it is reported as `0.85`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringPolicy {
    full_credit_threshold: f64,
    partial_credit_threshold: f64,
    review_threshold: f64,
}

impl Default for ScoringPolicy {
    fn default() -> Self {
        Self {
            full_credit_threshold: DEFAULT_FULL_CREDIT_THRESHOLD,
            partial_credit_threshold: DEFAULT_PARTIAL_CREDIT_THRESHOLD,
            review_threshold: DEFAULT_REVIEW_THRESHOLD,
        }
    }
}

impl ScoringPolicy {
    pub fn new(
        full_credit_threshold: f64,
        partial_credit_threshold: f64,
        review_threshold: f64,
    ) -> Result<Self, GradingError> {
        let policy = Self {
            full_credit_threshold,
            partial_credit_threshold,
            review_threshold,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Thresholds must lie in `[0, 1]` with partial ≤ full.
    pub fn validate(&self) -> Result<(), GradingError> {
        for (name, value) in [
            ("full_credit_threshold", self.full_credit_threshold),
            ("partial_credit_threshold", self.partial_credit_threshold),
            ("review_threshold", self.review_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GradingError::InvalidPolicy {
                    reason: format!("{name} must be within [0, 1], got {value}"),
                });
            }
        }

        if self.partial_credit_threshold > self.full_credit_threshold {
            return Err(GradingError::InvalidPolicy {
                reason: format!(
                    "partial_credit_threshold ({}) exceeds full_credit_threshold ({})",
                    self.partial_credit_threshold, self.full_credit_threshold
                ),
            });
        }

        Ok(())
    }

    pub fn full_credit_threshold(&self) -> f64 {
        self.full_credit_threshold
    }

    pub fn partial_credit_threshold(&self) -> f64 {
        self.partial_credit_threshold
    }

    pub fn review_threshold(&self) -> f64 {
        self.review_threshold
    }

    /// First matching band wins: full, then partial, else none.
    pub fn credit(&self, similarity: f64) -> Credit {
        if similarity >= self.full_credit_threshold {
            Credit::Full
        } else if similarity >= self.partial_credit_threshold {
            Credit::Partial
        } else {
            Credit::Zero
        }
    }

    pub fn needs_review(&self, similarity: f64) -> bool {
        similarity < self.review_threshold
    }
}

/// Rounds to two decimals, ties to even (`0.125 → 0.12`, `0.375 → 0.38`).
///
/// ```
/// use smartcheck::grading::round_similarity;
///
/// assert_eq!(round_similarity(0.625), 0.62);
/// assert_eq!(round_similarity(0.876), 0.88);
/// ```
pub fn round_similarity(value: f64) -> f64 {
    let factor = 10f64.powi(SIMILARITY_DECIMALS);
    (value * factor).round_ties_even() / factor
}
