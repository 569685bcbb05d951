use std::collections::HashSet;

use tracing::trace;

use super::{OracleError, SimilarityOracle};

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "is", "are", "was", "were", "be", "been", "being", "have", "has", "had",
    "do", "does", "did", "will", "would", "could", "should", "may", "might", "must", "shall",
    "can", "to", "of", "in", "for", "on", "with", "at", "by", "from", "as", "into", "through",
    "during", "before", "after", "above", "below", "between", "under", "then", "once", "here",
    "there", "when", "where", "why", "how", "all", "each", "few", "more", "most", "other",
    "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than", "too", "very",
    "just", "and", "but", "if", "or", "because", "until", "while", "what", "which", "who",
    "whom", "this", "that", "these", "those", "am", "it", "its",
];

/// Model-free similarity from content-word overlap.
///
/// Blends recall of the student's content words with Jaccard overlap, then
/// squashes through a logistic curve centred at 0.5 so that disjoint answers
/// land near 0. Answers equal up to case and surrounding whitespace score
/// exactly 1. An answer made only of stop words is compared on all of its
/// tokens. Deterministic and cheap; far less forgiving of paraphrase than
/// [`EmbeddingOracle`](super::EmbeddingOracle).
#[derive(Debug, Clone)]
pub struct LexicalOracle {
    stop_words: HashSet<&'static str>,
    steepness: f64,
}

impl Default for LexicalOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl LexicalOracle {
    const DEFAULT_STEEPNESS: f64 = 8.0;
    const RECALL_WEIGHT: f64 = 0.6;
    const JACCARD_WEIGHT: f64 = 0.4;

    pub fn new() -> Self {
        Self {
            stop_words: STOP_WORDS.iter().copied().collect(),
            steepness: Self::DEFAULT_STEEPNESS,
        }
    }

    fn tokens(text: &str) -> HashSet<String> {
        text.to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
            .map(str::to_string)
            .collect()
    }

    fn content_words(&self, text: &str) -> HashSet<String> {
        Self::tokens(text)
            .into_iter()
            .filter(|w| !self.stop_words.contains(w.as_str()))
            .collect()
    }

    fn similarity(&self, text_a: &str, text_b: &str) -> f64 {
        let normalized_a = text_a.trim().to_lowercase();
        if !normalized_a.is_empty() && normalized_a == text_b.trim().to_lowercase() {
            return 1.0;
        }

        let mut words_a = self.content_words(text_a);
        let mut words_b = self.content_words(text_b);

        // Answers like "No" or "Before" are all stop words; match on every token.
        if words_a.is_empty() {
            words_a = Self::tokens(text_a);
            words_b = Self::tokens(text_b);
            if words_a.is_empty() {
                return 0.0;
            }
        }

        let matches = words_a.intersection(&words_b).count() as f64;
        let recall = matches / words_a.len() as f64;
        let union = words_a.union(&words_b).count() as f64;
        let jaccard = if union > 0.0 { matches / union } else { 0.0 };

        let base = Self::RECALL_WEIGHT * recall + Self::JACCARD_WEIGHT * jaccard;
        let squashed = 1.0 / (1.0 + (-self.steepness * (base - 0.5)).exp());

        squashed.clamp(0.0, 1.0)
    }
}

impl SimilarityOracle for LexicalOracle {
    fn score(&self, text_a: &str, text_b: &str) -> Result<f64, OracleError> {
        let score = self.similarity(text_a, text_b);
        trace!(score, "Lexical similarity");
        Ok(score)
    }

    fn name(&self) -> &str {
        "lexical"
    }
}
