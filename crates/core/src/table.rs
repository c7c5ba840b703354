//! Table (keyed row) matching
//!
//! Table dumps carry one record per line with a fixed-width key prefix.
//! Changed rows are paired first-fit on their reference key, driven
//! from the longer side so every surplus row surfaces as an addition or
//! deletion.

use crate::normalize::{is_date, reference_key};
use crate::result::MatchPair;

/// Pair each `source` line with the first unused `target` line sharing
/// its reference key. Unmatched source lines pair with `None`; leftover
/// target lines are appended afterwards, also paired with `None`.
///
/// An empty reference key never matches anything.
pub(crate) fn match_by_key(
    keycut: usize,
    source: &[String],
    target: &[String],
) -> Vec<(Option<String>, Option<String>)> {
    let mut used = vec![false; target.len()];
    let mut pairs = Vec::with_capacity(source.len().max(target.len()));

    for line in source {
        let key = reference_key(line, keycut);
        let mut hit = None;
        if !key.is_empty() {
            for (index, candidate) in target.iter().enumerate() {
                if !used[index] && reference_key(candidate, keycut) == key {
                    hit = Some(index);
                    break;
                }
            }
        }
        match hit {
            Some(index) => {
                used[index] = true;
                pairs.push((Some(line.clone()), Some(target[index].clone())));
            }
            None => pairs.push((Some(line.clone()), None)),
        }
    }

    for (index, candidate) in target.iter().enumerate() {
        if !used[index] {
            pairs.push((None, Some(candidate.clone())));
        }
    }
    pairs
}

/// Align changed table rows into (before, after) pairs.
pub fn align_table(before: &[String], after: &[String], keycut: usize) -> Vec<MatchPair> {
    let oriented: Vec<(Option<String>, Option<String>)> = if before.len() > after.len() {
        match_by_key(keycut, before, after)
    } else {
        match_by_key(keycut, after, before)
            .into_iter()
            .map(|(after_line, before_line)| (before_line, after_line))
            .collect()
    };

    oriented
        .into_iter()
        .filter(|(before_line, after_line)| {
            is_meaningful_pair(before_line.as_deref(), after_line.as_deref())
        })
        .map(|(before_line, after_line)| MatchPair::from_sides(before_line, after_line))
        .collect()
}

/// True when a pair is worth reporting: the sides differ, a lone date
/// stamp is noise, and a date-to-date change is noise too.
fn is_meaningful_pair(before: Option<&str>, after: Option<&str>) -> bool {
    let before = before.unwrap_or("");
    let after = after.unwrap_or("");
    if before == after {
        return false;
    }
    let before_is_date = is_date(before);
    let after_is_date = is_date(after);
    if before_is_date && after.is_empty() {
        return false;
    }
    if after_is_date && before.is_empty() {
        return false;
    }
    if before_is_date && after_is_date {
        return false;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::result::PairKind;
    use proptest::prelude::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_match_by_key_first_fit() {
        let source = lines(&["K1 a", "K1 b"]);
        let target = lines(&["K1 x", "K1 y"]);
        let pairs = match_by_key(2, &source, &target);
        assert_eq!(
            pairs,
            vec![
                (Some("K1 a".to_string()), Some("K1 x".to_string())),
                (Some("K1 b".to_string()), Some("K1 y".to_string())),
            ]
        );
    }

    #[test]
    fn test_match_by_key_leftover_targets_appended() {
        let source = lines(&["K1 a"]);
        let target = lines(&["K2 b", "K1 c"]);
        let pairs = match_by_key(2, &source, &target);
        assert_eq!(
            pairs,
            vec![
                (Some("K1 a".to_string()), Some("K1 c".to_string())),
                (None, Some("K2 b".to_string())),
            ]
        );
    }

    #[test]
    fn test_match_by_key_empty_key_never_matches() {
        let source = lines(&["   "]);
        let target = lines(&["ab"]);
        let pairs = match_by_key(2, &source, &target);
        assert_eq!(
            pairs,
            vec![
                (Some("   ".to_string()), None),
                (None, Some("ab".to_string())),
            ]
        );
    }

    #[test]
    fn test_align_table_pairs_changed_rows() {
        let before = lines(&["A001 FOO 1,00"]);
        let after = lines(&["A001 FOO 2,00"]);
        let pairs = align_table(&before, &after, 4);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].before.as_deref(), Some("A001 FOO 1,00"));
        assert_eq!(pairs[0].after.as_deref(), Some("A001 FOO 2,00"));
    }

    #[test]
    fn test_align_table_surplus_rows_surface() {
        let before = lines(&["A001 FOO 1,00"]);
        let after = lines(&["A001 FOO 2,00", "B002 BAR 3,00"]);
        let pairs = align_table(&before, &after, 4);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].kind(), PairKind::Changed);
        assert_eq!(pairs[1].kind(), PairKind::Added);
        assert_eq!(pairs[1].after.as_deref(), Some("B002 BAR 3,00"));
    }

    #[test]
    fn test_align_table_drops_equal_and_reorients() {
        let before = lines(&["SAME", "OLD x"]);
        let after = lines(&["SAME", "NEW x"]);
        let pairs = align_table(&before, &after, 4);
        assert_eq!(pairs.len(), 2);
        assert_eq!(pairs[0].kind(), PairKind::Added);
        assert_eq!(pairs[0].after.as_deref(), Some("NEW x"));
        assert_eq!(pairs[1].kind(), PairKind::Deleted);
        assert_eq!(pairs[1].before.as_deref(), Some("OLD x"));
    }

    #[test]
    fn test_is_meaningful_pair_date_rules() {
        assert!(!is_meaningful_pair(Some("01.02.2024 09:00"), None));
        assert!(!is_meaningful_pair(None, Some("01.02.2024 09:00")));
        assert!(!is_meaningful_pair(
            Some("01.02.2024 09:00"),
            Some("03.04.2024 10:00")
        ));
        assert!(is_meaningful_pair(Some("01.02.2024 09:00"), Some("text")));
        assert!(is_meaningful_pair(Some("a"), Some("b")));
        assert!(!is_meaningful_pair(Some("a"), Some("a")));
        assert!(!is_meaningful_pair(None, None));
    }

    proptest! {
        #[test]
        fn prop_match_by_key_conserves_lines(
            source in proptest::collection::vec("[A-D]{2} [a-z]{1,3}", 0..6),
            target in proptest::collection::vec("[A-D]{2} [a-z]{1,3}", 0..6),
        ) {
            let pairs = match_by_key(2, &source, &target);
            let firsts: Vec<String> =
                pairs.iter().filter_map(|(s, _)| s.clone()).collect();
            prop_assert_eq!(firsts, source);

            let mut seconds: Vec<String> =
                pairs.iter().filter_map(|(_, t)| t.clone()).collect();
            seconds.sort();
            let mut expected = target;
            expected.sort();
            prop_assert_eq!(seconds, expected);
        }
    }
}
