use std::collections::HashSet;

use prepost_core::normalize::normalize;
use prepost_core::schema::fill_scheme;
use prepost_core::score::{score, SCORE_FLOOR};
use prepost_core::table::align_table;
use prepost_core::{colorize, extract_changes};
use proptest::prelude::*;

proptest! {
    #[test]
    fn normalize_is_idempotent(line in "[ a-zA-Z0-9\t,\\.]{0,30}") {
        let once = normalize(&line);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_output_is_clean(line in "[ a-zA-Z0-9\t,\\.]{0,30}") {
        let normalized = normalize(&line);
        prop_assert!(!normalized.contains('\t'));
        prop_assert!(!normalized.contains("  "));
        prop_assert_eq!(normalized.trim(), normalized.as_str());
    }

    #[test]
    fn changed_lines_are_disjoint_from_other_side(
        before in proptest::collection::vec("[abc ]{0,6}", 0..8),
        after in proptest::collection::vec("[abc ]{0,6}", 0..8),
    ) {
        let changed = extract_changes(&before, &after);
        let before_set: HashSet<String> = before.iter().map(|l| normalize(l)).collect();
        let after_set: HashSet<String> = after.iter().map(|l| normalize(l)).collect();
        prop_assert!(changed.before_only.iter().all(|l| !after_set.contains(l)));
        prop_assert!(changed.after_only.iter().all(|l| !before_set.contains(l)));
        prop_assert!(changed.before_only.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(changed.after_only.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn score_floors_on_empty_side(line in "[a-z ]{0,12}", keycut in 0usize..8) {
        prop_assert_eq!(score("", &line, keycut), SCORE_FLOOR);
        prop_assert_eq!(score(&line, "", keycut), SCORE_FLOOR);
    }

    #[test]
    fn score_floors_when_keycut_exceeds_length(
        before in "[a-z ]{0,10}",
        after in "[a-z ]{0,10}",
        extra in 1usize..5,
    ) {
        // Collapsing never lengthens a line, so this keycut is out of
        // reach for both sides.
        let keycut = before.chars().count().max(after.chars().count()) + extra;
        prop_assert_eq!(score(&before, &after, keycut), SCORE_FLOOR);
    }

    #[test]
    fn fill_scheme_sides_stay_equal_length(
        minor in proptest::collection::vec("[A-Z]{4}[ a-z][a-z ]{0,8}", 0..6),
        major in proptest::collection::vec("[A-Z]{4}[ a-z][a-z ]{0,8}", 0..6),
        keycut in 1usize..8,
    ) {
        let (minor_side, major_side) = fill_scheme(&minor, &major, keycut, false);
        prop_assert_eq!(minor_side.len(), major_side.len());
    }

    #[test]
    fn fill_scheme_conserves_lines_when_pits_are_kept(
        minor in proptest::collection::vec("[A-Z]{4}[ a-z][a-z ]{0,8}", 0..6),
        major in proptest::collection::vec("[A-Z]{4}[ a-z][a-z ]{0,8}", 0..6),
        keycut in 1usize..8,
    ) {
        let (minor_side, major_side) = fill_scheme(&minor, &major, keycut, true);

        let mut placed: Vec<String> = minor_side.iter().flatten().cloned().collect();
        placed.sort();
        let mut expected = minor.clone();
        expected.sort();
        prop_assert_eq!(placed, expected);

        let mut kept: Vec<String> = major_side.iter().flatten().cloned().collect();
        kept.sort();
        let mut expected = major.clone();
        expected.sort();
        prop_assert_eq!(kept, expected);
    }

    #[test]
    fn align_table_sides_come_from_inputs(
        before in proptest::collection::vec("[a-d]{2} [a-d]{1,3}", 0..6),
        after in proptest::collection::vec("[a-d]{2} [a-d]{1,3}", 0..6),
        keycut in 1usize..5,
    ) {
        for pair in align_table(&before, &after, keycut) {
            if let Some(line) = &pair.before {
                prop_assert!(before.contains(line));
            }
            if let Some(line) = &pair.after {
                prop_assert!(after.contains(line));
            }
        }
    }

    #[test]
    fn colorize_equal_counts_give_one_segment_per_word(
        word_pairs in proptest::collection::vec(("[a-z]{1,4}", "[a-z]{1,4}"), 1..6),
        keycut in 0usize..6,
    ) {
        let before = word_pairs
            .iter()
            .map(|(b, _)| b.clone())
            .collect::<Vec<_>>()
            .join(" ");
        let after = word_pairs
            .iter()
            .map(|(_, a)| a.clone())
            .collect::<Vec<_>>()
            .join(" ");
        let (before_segments, after_segments) = colorize(&before, &after, keycut);
        prop_assert_eq!(before_segments.len(), word_pairs.len());
        prop_assert_eq!(after_segments.len(), word_pairs.len());
    }
}
