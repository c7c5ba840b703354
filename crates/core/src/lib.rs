//! # prepost
//!
//! Line-level alignment engine for before/after flat-text export dumps.
//! Compares two versions of keyed table rows or payroll rule schemas
//! and isolates exactly what changed, tolerant of the reordering,
//! duplication, and retroactive-copy noise common in such exports.
//!
//! ## Core Concepts
//!
//! - **Normalization**: tabs and space runs collapse before any comparison
//! - **Change extraction**: a set difference keeps only lines unique to one side
//! - **Matching**: schema dumps group by a 4-char id and assign greedily
//!   by similarity score; table dumps pair first-fit on a reference key
//! - **Colorization**: matched pairs re-diff per word for highlighting
//!
//! ## Example
//!
//! ```rust
//! use prepost_core::{compare_lines, CompareConfig};
//!
//! let before = vec!["A001 FOO   1,00".to_string()];
//! let after = vec!["A001 FOO   2,00".to_string()];
//! let config = CompareConfig::new().with_keycut("t512w", 4);
//!
//! let result = compare_lines("t512w", &before, &after, Some(config)).unwrap();
//! assert_eq!(result.pairs.len(), 1);
//! ```

pub mod changes;
pub mod colorize;
pub mod config;
pub mod engine;
pub mod error;
pub mod normalize;
pub mod report;
pub mod result;
pub mod schema;
pub mod score;
pub mod source;
pub mod table;

// Re-export main types
pub use changes::{extract_changes, ChangedLines};
pub use colorize::{colorize, ColoredSegment};
pub use config::{CompareConfig, GenericRule, NO_KEYCUT};
pub use engine::CompareEngine;
pub use error::CompareError;
pub use report::TextReport;
pub use result::{CompareResult, MatchPair, PairKind};

/// Main entry point for comparing one record's line sets
///
/// # Arguments
///
/// * `record` - Record name, used to classify the dump and resolve its keycut
/// * `before` - Raw lines of the older dump
/// * `after` - Raw lines of the newer dump
/// * `config` - Optional configuration (uses default if None)
///
/// # Returns
///
/// A `CompareResult` with the aligned pairs, or `None` when the dumps
/// hold the same lines
///
/// # Example
///
/// ```rust
/// use prepost_core::compare_lines;
///
/// let before = vec!["A001 FOO 1,00".to_string()];
/// let after = vec!["A001 FOO 1,00".to_string()];
/// assert!(compare_lines("t512w", &before, &after, None).is_none());
/// ```
pub fn compare_lines(
    record: &str,
    before: &[String],
    after: &[String],
    config: Option<CompareConfig>,
) -> Option<CompareResult> {
    let config = config.unwrap_or_default();
    let engine = CompareEngine::new(config);
    engine.compare_record(record, before, after)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compare_lines_default_config() {
        // With no keycut configured the whole line is the key, so the
        // changed rows never pair up.
        let before = vec!["A001 FOO 1,00".to_string()];
        let after = vec!["A001 FOO 2,00".to_string()];
        let result = compare_lines("t512w", &before, &after, None).unwrap();
        assert_eq!(result.pairs.len(), 2);
    }

    #[test]
    fn test_compare_lines_with_keycut() {
        let config = CompareConfig::new().with_keycut("t512w", 4);
        let before = vec!["A001 FOO 1,00".to_string()];
        let after = vec!["A001 FOO 2,00".to_string()];
        let result = compare_lines("t512w", &before, &after, Some(config)).unwrap();
        assert_eq!(result.pairs.len(), 1);
        assert_eq!(result.pairs[0].before.as_deref(), Some("A001 FOO 1,00"));
    }
}
