use proptest::prelude::*;

use fillrank::scoring::{ArenaModule, NativeScorer, Scorer, fallback_score};

proptest! {
    #[test]
    fn test_fallback_score_in_unit_range(query in ".{0,16}", candidate in ".{0,64}") {
        let score = fallback_score(&query, &candidate);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_native_score_in_unit_range(query in ".{0,16}", candidate in ".{0,64}") {
        let mut scorer = NativeScorer::new(Box::new(ArenaModule::default()));
        let score = scorer.score(&query, &candidate).unwrap();
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_backends_agree(query in ".{0,16}", candidate in ".{0,64}") {
        let mut native = NativeScorer::new(Box::new(ArenaModule::default()));
        let left = native.score(&query, &candidate).unwrap();
        let right = fallback_score(&query, &candidate);
        prop_assert!((left - right).abs() < 1e-9, "native {left} vs fallback {right}");
    }

    #[test]
    fn test_backends_agree_on_polish_letters(
        query in "[ąćęłńóśźżĄĆĘŁŃÓŚŹŻa-z ]{1,8}",
        candidate in "[ąćęłńóśźżĄĆĘŁŃÓŚŹŻa-z ]{0,32}",
    ) {
        let mut native = NativeScorer::new(Box::new(ArenaModule::default()));
        let left = native.score(&query, &candidate).unwrap();
        let right = fallback_score(&query, &candidate);
        prop_assert!((left - right).abs() < 1e-9, "native {left} vs fallback {right}");
    }

    #[test]
    fn test_query_case_is_irrelevant(query in "[a-zA-Z]{1,8}", candidate in "[a-zA-Z ]{0,32}") {
        prop_assert_eq!(
            fallback_score(&query, &candidate),
            fallback_score(&query.to_uppercase(), &candidate)
        );
    }
}
