//! Weighted line similarity scoring
//!
//! Produces the ranking score the schema matcher assigns candidate
//! pairs by. The value only orders candidates against each other; it
//! has no absolute meaning.

use crate::normalize::collapse_spaces;
use crate::schema::is_pit;

/// Sentinel returned for unusable pairings (empty or shorter than the
/// key window). Real scores can go far below this through mismatch
/// penalties, so it is a marker value rather than a minimum.
pub const SCORE_FLOOR: i64 = -200;

/// Score the similarity of two lines under a `keycut`-wide key window.
///
/// Both inputs get their space runs collapsed first. When both are PIT
/// lines the first eight characters (schema id plus line-number window)
/// are dropped so the volatile line number cannot influence the score.
/// Then, per character inside the key window, a match at 0-based
/// position `i` adds `(i+1)^2` and a mismatch subtracts
/// `50 + (keycut-(i+1))*keycut`. Beyond the window, positionally equal
/// words add their length plus the position and words merely contained
/// somewhere in the other remainder add their length.
///
/// The function is deliberately asymmetric: callers pass the candidate
/// line first and the slot line second.
pub fn score(source: &str, candidate: &str, keycut: usize) -> i64 {
    let mut source = collapse_spaces(source);
    let mut candidate = collapse_spaces(candidate);

    if is_pit(&source) && is_pit(&candidate) {
        source = source.chars().skip(8).collect();
        candidate = candidate.chars().skip(8).collect();
    }

    let src: Vec<char> = source.chars().collect();
    let cand: Vec<char> = candidate.chars().collect();

    if src.is_empty() || cand.is_empty() {
        return SCORE_FLOOR;
    }
    if src.len() < keycut || cand.len() < keycut {
        return SCORE_FLOOR;
    }

    let mut total = src.len().min(cand.len()) as i64 - src.len().max(cand.len()) as i64;

    let window = keycut.min(src.len()).min(cand.len());
    for i in 0..window {
        let pos = (i + 1) as i64;
        if src[i] == cand[i] {
            total += pos * pos;
        } else {
            total -= 50 + (keycut as i64 - pos) * keycut as i64;
        }
    }

    let source_tail: String = src[keycut..].iter().collect();
    let candidate_tail: String = cand[keycut..].iter().collect();
    let source_words: Vec<&str> = source_tail.split_whitespace().collect();
    let candidate_words: Vec<&str> = candidate_tail.split_whitespace().collect();

    // The word pass is bounded by the full source word count, not the
    // tail word count, and stops at the first exhausted side.
    let source_word_count = source.split_whitespace().count();
    for i in 0..source_word_count {
        let source_word = source_words.get(i).copied().unwrap_or("");
        let candidate_word = candidate_words.get(i).copied().unwrap_or("");
        if source_word.is_empty() || candidate_word.is_empty() {
            break;
        }
        if source_word == candidate_word {
            total += (i + 1) as i64 + source_word.chars().count() as i64;
        } else if candidate_tail.contains(source_word) {
            total += source_word.chars().count() as i64;
        }
    }

    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_on_empty_input() {
        assert_eq!(score("", "abc", 1), SCORE_FLOOR);
        assert_eq!(score("abc", "", 1), SCORE_FLOOR);
        assert_eq!(score("", "", 1), SCORE_FLOOR);
    }

    #[test]
    fn test_floor_on_lines_shorter_than_keycut() {
        assert_eq!(score("ab", "abc", 3), SCORE_FLOOR);
        assert_eq!(score("abcd", "ab", 3), SCORE_FLOOR);
    }

    #[test]
    fn test_identical_key_window() {
        // Positions 1..=4 all match: 1 + 4 + 9 + 16.
        assert_eq!(score("abcd", "abcd", 4), 30);
    }

    #[test]
    fn test_mismatch_penalty() {
        // Position 1 matches (+1), position 2 mismatches (-(50 + 0*2)).
        assert_eq!(score("ab", "ax", 2), -49);
    }

    #[test]
    fn test_word_bonus_beyond_window() {
        // Window "ab" scores 5; "cd" and "ef" add (1+2) and (2+2).
        assert_eq!(score("ab cd ef", "ab cd ef", 2), 12);
    }

    #[test]
    fn test_moved_word_gets_length_only() {
        // Same words swapped beyond the window: each adds its length.
        assert_eq!(score("ab cd ef", "ab ef cd", 2), 9);
    }

    #[test]
    fn test_pit_line_number_window_ignored() {
        // Both PIT: chars 0..8 are dropped, so the differing line
        // numbers cannot reach the score.
        let a = "ZX01 001 AAAA";
        let b = "ZX01 002 AAAA";
        assert_eq!(score(a, b, 4), score(a, a, 4));
        assert_eq!(score(a, b, 4), 32);
    }

    #[test]
    fn test_longer_line_penalized_by_length_difference() {
        let near = score("abcde f", "abcde f", 2);
        let far = score("abcde f", "abcde f gh", 2);
        assert!(near > far);
    }
}
