//! Property tests for the mechanical invariants of the pipeline.

use lesson_extract::markup::normalize;
use lesson_extract::statement::{split, BoundaryMode};
use lesson_extract::{answer, section};
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

proptest! {
    #[test]
    fn normalize_is_idempotent(input in any::<String>()) {
        let once = normalize(&input);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalized_text_has_no_markup_left(input in any::<String>()) {
        let once = normalize(&input);
        prop_assert!(!once.contains('\\'));
        prop_assert!(!once.contains('{'), "normalized text retained an open brace");
        prop_assert!(!once.contains('}'), "normalized text retained a close brace");
    }

    #[test]
    fn split_statements_respect_the_floor_and_are_unique(input in "\\PC{0,400}") {
        let statements = split(&input, BoundaryMode::Strict);
        let mut seen = HashSet::new();
        for statement in &statements {
            prop_assert!(statement.chars().count() >= 10);
            prop_assert!(!section::SECTION_HEADERS
                .iter()
                .any(|h| statement.to_lowercase().contains(&h.to_lowercase())));
            prop_assert!(seen.insert(statement.split_whitespace().collect::<Vec<_>>().join(" ")));
        }
    }

    #[test]
    fn multiple_choice_always_yields_four_distinct_options(
        question in "\\PC{1,120}",
        body in "\\PC{0,400}",
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let choices = answer::multiple_choice(&question, &body, &mut rng);
        prop_assert_eq!(choices.options.len(), 4);
        prop_assert!(choices.correct < 4);
        for option in &choices.options {
            prop_assert!(!option.is_empty());
            prop_assert!(option.chars().count() <= 80);
        }
        let distinct: HashSet<&String> = choices.options.iter().collect();
        prop_assert_eq!(distinct.len(), 4);
    }

    #[test]
    fn fill_in_blank_prompts_hold_exactly_one_marker(
        body in "\\PC{0,400}",
        seed in any::<u64>(),
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        if let Some(blank) = answer::fill_in_blank(&body, &mut rng) {
            prop_assert_eq!(blank.prompt.matches(answer::BLANK_MARKER).count(), 1);
            prop_assert!(!blank.answer.is_empty());
            prop_assert!(!blank.prompt.to_lowercase().contains(&blank.answer));
        }
    }

    #[test]
    fn drag_items_stay_in_bounds(
        question in "\\PC{1,120}",
        body in "\\PC{0,400}",
    ) {
        let items = answer::drag_drop_items(&question, &body);
        prop_assert!((2..=6).contains(&items.len()));
        let distinct: HashSet<&String> = items.iter().collect();
        prop_assert_eq!(distinct.len(), items.len());
    }

    #[test]
    fn synthesis_is_deterministic_for_a_seed(
        question in "\\PC{1,120}",
        body in "\\PC{0,400}",
        seed in any::<u64>(),
    ) {
        let mut first = StdRng::seed_from_u64(seed);
        let mut second = StdRng::seed_from_u64(seed);
        prop_assert_eq!(
            answer::multiple_choice(&question, &body, &mut first),
            answer::multiple_choice(&question, &body, &mut second)
        );
    }
}
