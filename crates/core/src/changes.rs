//! Changed-line extraction
//!
//! Reduces two raw line lists to the lines unique to each side. Matching
//! is set-based over normalized lines, so reordering and duplication do
//! not register as changes.

use std::collections::BTreeSet;

use crate::normalize::{is_date, normalize};

/// Lines unique to one side of a comparison.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangedLines {
    /// Normalized lines present only in the before version, sorted
    pub before_only: Vec<String>,
    /// Normalized lines present only in the after version, sorted
    pub after_only: Vec<String>,
    /// Whether the raw inputs had the same line count
    pub same_len: bool,
}

impl ChangedLines {
    /// True when both sides hold the same set of lines.
    pub fn is_empty(&self) -> bool {
        self.before_only.is_empty() && self.after_only.is_empty()
    }
}

/// Extract the lines unique to each side.
///
/// Every line is normalized first and the symmetric difference of the
/// two normalized sets is taken. Empty and date lines are dropped, and
/// both result lists come back sorted. `same_len` reflects the raw
/// input line counts before any normalization.
pub fn extract_changes(before: &[String], after: &[String]) -> ChangedLines {
    let same_len = before.len() == after.len();

    let before_set: BTreeSet<String> = before.iter().map(|line| normalize(line)).collect();
    let after_set: BTreeSet<String> = after.iter().map(|line| normalize(line)).collect();

    let only_in = |own: &BTreeSet<String>, other: &BTreeSet<String>| -> Vec<String> {
        own.iter()
            .filter(|line| !line.is_empty() && !other.contains(*line) && !is_date(line))
            .cloned()
            .collect()
    };

    ChangedLines {
        before_only: only_in(&before_set, &after_set),
        after_only: only_in(&after_set, &before_set),
        same_len,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_basic_difference() {
        let before = lines(&["A 1", "B 2"]);
        let after = lines(&["A 1", "B 3"]);
        let changed = extract_changes(&before, &after);
        assert_eq!(changed.before_only, vec!["B 2"]);
        assert_eq!(changed.after_only, vec!["B 3"]);
        assert!(changed.same_len);
    }

    #[test]
    fn test_reorder_and_duplicates_are_not_changes() {
        let before = lines(&["B", "A", "A", "A"]);
        let after = lines(&["A", "B", "A", "A"]);
        let changed = extract_changes(&before, &after);
        assert!(changed.is_empty());
        assert!(changed.same_len);
    }

    #[test]
    fn test_normalization_applies_before_matching() {
        let before = lines(&["A001\tFOO   1,00"]);
        let after = lines(&["A001 FOO 1,00  "]);
        let changed = extract_changes(&before, &after);
        assert!(changed.is_empty());
    }

    #[test]
    fn test_empty_and_date_lines_dropped() {
        let before = lines(&["01.02.2024 120000", "", "   ", "X"]);
        let after = lines(&[]);
        let changed = extract_changes(&before, &after);
        assert_eq!(changed.before_only, vec!["X"]);
        assert!(changed.after_only.is_empty());
        assert!(!changed.same_len);
    }

    #[test]
    fn test_outputs_sorted() {
        let before = lines(&["b 1", "a 1", "c 1"]);
        let after = lines(&[]);
        let changed = extract_changes(&before, &after);
        assert_eq!(changed.before_only, vec!["a 1", "b 1", "c 1"]);
    }
}
