use super::*;

mod lexical_tests {
    use super::*;

    #[test]
    fn test_identical_text_scores_high() {
        let oracle = LexicalOracle::new();
        let score = oracle
            .score("Photosynthesis converts light", "Photosynthesis converts light")
            .unwrap();
        assert!(score > 0.95, "score = {score}");
        assert!(score <= 1.0);
    }

    #[test]
    fn test_empty_reference_scores_low() {
        let oracle = LexicalOracle::new();
        let score = oracle.score("Bangkok", "").unwrap();
        assert!(score < 0.1, "score = {score}");
    }

    #[test]
    fn test_disjoint_text_scores_low() {
        let oracle = LexicalOracle::new();
        let score = oracle.score("Bangkok", "Mitochondria release energy").unwrap();
        assert!(score < 0.1, "score = {score}");
    }

    #[test]
    fn test_partial_overlap_is_between() {
        let oracle = LexicalOracle::new();
        let full = oracle
            .score(
                "Bangkok is the capital of Thailand",
                "Bangkok is the capital of Thailand",
            )
            .unwrap();
        let partial = oracle
            .score("Bangkok", "Bangkok is the capital of Thailand")
            .unwrap();
        let none = oracle
            .score("Hanoi", "Bangkok is the capital of Thailand")
            .unwrap();
        assert!(none < partial && partial < full);
    }

    #[test]
    fn test_case_and_punctuation_insensitive() {
        let oracle = LexicalOracle::new();
        let a = oracle.score("BANGKOK!", "bangkok").unwrap();
        let b = oracle.score("Bangkok.", "bangkok").unwrap();
        assert_eq!(a, b);
        assert!(a > 0.95, "score = {a}");
    }

    #[test]
    fn test_equal_up_to_case_and_padding_is_one() {
        let oracle = LexicalOracle::new();
        assert_eq!(oracle.score("  Bangkok ", "bangkok").unwrap(), 1.0);
    }

    #[test]
    fn test_identical_stop_word_answers_score_high() {
        let oracle = LexicalOracle::new();
        for answer in ["No", "Before", "more", "Above", "it is"] {
            let score = oracle.score(answer, answer).unwrap();
            assert!(score > 0.95, "score({answer:?}, {answer:?}) = {score}");
        }
    }

    #[test]
    fn test_stop_word_answers_compare_tokens() {
        let oracle = LexicalOracle::new();
        let same = oracle.score("not before", "Before, not").unwrap();
        let different = oracle.score("Before", "After").unwrap();
        assert!(same > 0.95, "score = {same}");
        assert!(different < 0.1, "score = {different}");
    }

    #[test]
    fn test_stop_word_answer_earns_full_credit() {
        let rows = [crate::table::CanonicalAnswerRow::new("001", "Q1", "No")];
        let key: crate::table::AnswerKey = [("Q1", "No")].into_iter().collect();

        let records = crate::grading::grade(&rows, &key, &LexicalOracle::new()).unwrap();
        assert_eq!(records[0].similarity, 1.0);
        assert_eq!(records[0].score, 1.0);
        assert!(!records[0].need_review);
    }

    #[test]
    fn test_blank_answers_score_zero() {
        let oracle = LexicalOracle::new();
        assert_eq!(oracle.score("", "").unwrap(), 0.0);
        assert_eq!(oracle.score("?!", "No").unwrap(), 0.0);
    }

    #[test]
    fn test_deterministic() {
        let oracle = LexicalOracle::new();
        let a = oracle.score("control center", "the control center").unwrap();
        let b = oracle.score("control center", "the control center").unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_batch_matches_single() {
        let oracle = LexicalOracle::new();
        let pairs = [("a cat", "a cat"), ("dog", "cat"), ("", "")];
        let batch = oracle.score_batch(&pairs).unwrap();
        for ((a, b), score) in pairs.iter().zip(&batch) {
            assert_eq!(oracle.score(a, b).unwrap(), *score);
        }
    }

    #[test]
    fn test_name() {
        assert_eq!(LexicalOracle::default().name(), "lexical");
    }
}

mod mock_tests {
    use super::*;

    #[test]
    fn test_constant_score() {
        let oracle = MockOracle::constant(0.9);
        assert_eq!(oracle.score("Bangkok", "Bangkok is the capital").unwrap(), 0.9);
    }

    #[test]
    fn test_empty_reference_is_zero() {
        let oracle = MockOracle::constant(0.9);
        assert_eq!(oracle.score("Bangkok", "").unwrap(), 0.0);
    }

    #[test]
    fn test_pair_overrides_default() {
        let oracle = MockOracle::constant(0.1).with_pair("a", "b", 0.8);
        assert_eq!(oracle.score("a", "b").unwrap(), 0.8);
        assert_eq!(oracle.score("b", "a").unwrap(), 0.1);
    }

    #[test]
    fn test_pair_can_score_empty_reference() {
        let oracle = MockOracle::new().with_pair("x", "", 0.4);
        assert_eq!(oracle.score("x", "").unwrap(), 0.4);
    }

    #[test]
    fn test_failing_after() {
        let oracle = MockOracle::constant(0.5).failing_after(2);
        assert!(oracle.score("a", "b").is_ok());
        assert!(oracle.score("a", "b").is_ok());
        let err = oracle.score("a", "b").unwrap_err();
        assert!(matches!(err, OracleError::Unavailable { .. }));
    }

    #[test]
    fn test_counters() {
        let oracle = MockOracle::constant(0.5);
        oracle.score_batch(&[("a", "b"), ("c", "d")]).unwrap();
        oracle.score("e", "f").unwrap();
        assert_eq!(oracle.calls(), 3);
        assert_eq!(oracle.batches(), 1);
    }
}

mod embedding_tests {
    use super::*;
    use crate::embedding::{EmbedderConfig, SentenceEmbedder};

    fn stub_oracle() -> EmbeddingOracle {
        EmbeddingOracle::load(EmbedderConfig::stub()).unwrap()
    }

    #[test]
    fn test_identical_text_is_one() {
        let oracle = stub_oracle();
        let score = oracle.score("Bangkok", "Bangkok").unwrap();
        assert!((score - 1.0).abs() < 1e-5, "score = {score}");
    }

    #[test]
    fn test_blank_side_is_zero() {
        let oracle = stub_oracle();
        assert_eq!(oracle.score("Bangkok", "").unwrap(), 0.0);
        assert_eq!(oracle.score("   ", "Bangkok").unwrap(), 0.0);
        assert_eq!(oracle.cached_embeddings(), 0);
    }

    #[test]
    fn test_score_is_clamped() {
        let oracle = stub_oracle();
        for (a, b) in [("Paris", "Berlin"), ("cell", "nucleus"), ("x", "y")] {
            let score = oracle.score(a, b).unwrap();
            assert!((0.0..=1.0).contains(&score), "score = {score}");
        }
    }

    #[test]
    fn test_cache_reuses_reference() {
        let oracle = stub_oracle();
        oracle.score("Bangkok", "Capital of Thailand").unwrap();
        oracle.score("Hanoi", "Capital of Thailand").unwrap();
        assert_eq!(oracle.cached_embeddings(), 3);
    }

    #[test]
    fn test_batch_matches_single() {
        let batched = stub_oracle();
        let single = stub_oracle();
        let pairs = [
            ("Bangkok", "Capital of Thailand"),
            ("Hanoi", "Capital of Thailand"),
            ("", "Capital of Thailand"),
            ("Bangkok", "Bangkok"),
        ];

        let scores = batched.score_batch(&pairs).unwrap();
        assert_eq!(scores.len(), pairs.len());
        for ((a, b), score) in pairs.iter().zip(&scores) {
            assert_eq!(single.score(a, b).unwrap(), *score);
        }
        assert_eq!(batched.cached_embeddings(), 3);
    }

    #[test]
    fn test_new_with_embedder() {
        let embedder = SentenceEmbedder::load(EmbedderConfig::stub()).unwrap();
        let oracle = EmbeddingOracle::new(embedder, 16);
        assert!(oracle.embedder().is_stub());
        assert_eq!(oracle.name(), "embedding");
    }

    #[test]
    fn test_load_missing_model_fails() {
        let err = EmbeddingOracle::load(EmbedderConfig::new("/nonexistent/smartcheck/model"))
            .unwrap_err();
        assert!(matches!(err, OracleError::Embedding(_)));
    }
}

mod blanket_impl_tests {
    use super::*;

    fn score_through<O: SimilarityOracle>(oracle: O) -> f64 {
        oracle.score("a", "b").unwrap()
    }

    #[test]
    fn test_reference_impl() {
        let oracle = MockOracle::constant(0.7);
        assert_eq!(score_through(&oracle), 0.7);
        assert_eq!((&oracle).name(), "mock");
    }

    #[test]
    fn test_boxed_trait_object() {
        let oracle: Box<dyn SimilarityOracle> = Box::new(MockOracle::constant(0.6));
        assert_eq!(score_through(oracle), 0.6);
    }

    #[test]
    fn test_boxed_forwards_batch() {
        let mock = MockOracle::constant(0.6);
        let boxed: Box<&MockOracle> = Box::new(&mock);
        boxed.score_batch(&[("a", "b")]).unwrap();
        assert_eq!(mock.batches(), 1);
    }
}
