//! Property tests for the calculator and content helpers

use ngamumule::content::{normalize_audio_filename, progress_percent};
use ngamumule::tools::{evaluate, format_number};
use proptest::prelude::*;

proptest! {
    #[test]
    fn integer_arithmetic_matches_rust(a in -10_000i64..10_000, b in -10_000i64..10_000) {
        let sum = evaluate(&format!("{} + ({})", a, b)).unwrap();
        prop_assert_eq!(sum, (a + b) as f64);

        let product = evaluate(&format!("{} * ({})", a, b)).unwrap();
        prop_assert_eq!(product, (a * b) as f64);
    }

    #[test]
    fn division_by_zero_always_fails(a in -1_000i64..1_000) {
        let expr = format!("{} / 0", a);
        prop_assert!(evaluate(&expr).is_err());
    }

    #[test]
    fn whole_numbers_format_without_decimals(n in -1_000_000i64..1_000_000) {
        prop_assert_eq!(format_number(n as f64), n.to_string());
    }

    #[test]
    fn evaluate_never_panics(input in "[0-9+*/^%() .x-]{0,24}") {
        let _ = evaluate(&input);
    }

    #[test]
    fn normalized_names_are_path_safe(word in "\\PC{0,30}") {
        let name = normalize_audio_filename(&word);
        prop_assert!(!name.contains(char::is_whitespace));
        prop_assert!(!name.contains('/'));
        prop_assert!(!name.starts_with('-') && !name.ends_with('-'));
        prop_assert!(!name.contains("--"));
    }

    #[test]
    fn normalization_is_idempotent(word in "[a-zA-Zéèêëô -]{0,20}") {
        let once = normalize_audio_filename(&word);
        prop_assert_eq!(normalize_audio_filename(&once), once.clone());
    }

    #[test]
    fn progress_stays_in_range(done in 0usize..50, total in 0usize..50) {
        let pct = progress_percent(done, total);
        prop_assert!(pct <= 100);
        if total > 0 && done >= total {
            prop_assert_eq!(pct, 100);
        }
    }
}
