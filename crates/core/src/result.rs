//! Comparison results
//!
//! The aligners produce [`MatchPair`]s; a full record comparison wraps
//! them in a [`CompareResult`] together with the settings that produced
//! them, which the report layer needs to render the pairs.

use std::fmt;

use crate::schema::schema_id;

/// How a pair reads when both sides are considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PairKind {
    /// Present only in the after dump
    Added,
    /// Present only in the before dump
    Deleted,
    /// Present in both dumps with a different body
    Changed,
}

/// One aligned pair of changed lines. `None` marks the side that has no
/// counterpart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchPair {
    pub before: Option<String>,
    pub after: Option<String>,
}

impl MatchPair {
    /// Build a pair from optional sides. Empty strings count as absent.
    pub fn from_sides(before: Option<String>, after: Option<String>) -> Self {
        MatchPair {
            before: before.filter(|line| !line.is_empty()),
            after: after.filter(|line| !line.is_empty()),
        }
    }

    pub fn changed(before: impl Into<String>, after: impl Into<String>) -> Self {
        MatchPair::from_sides(Some(before.into()), Some(after.into()))
    }

    pub fn added(after: impl Into<String>) -> Self {
        MatchPair::from_sides(None, Some(after.into()))
    }

    pub fn deleted(before: impl Into<String>) -> Self {
        MatchPair::from_sides(Some(before.into()), None)
    }

    pub fn kind(&self) -> PairKind {
        match (&self.before, &self.after) {
            (None, Some(_)) => PairKind::Added,
            (Some(_), None) => PairKind::Deleted,
            _ => PairKind::Changed,
        }
    }

    /// Schema id of the pair, taken from whichever side is present.
    pub fn schema_id(&self) -> String {
        let line = self
            .before
            .as_deref()
            .or(self.after.as_deref())
            .unwrap_or("");
        schema_id(line)
    }
}

/// All differences found in one record, plus the settings the report
/// layer needs to render them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompareResult {
    /// Record name the pairs belong to
    pub record: String,
    /// Aligned (before, after) pairs in report order
    pub pairs: Vec<MatchPair>,
    /// Whether the record was matched as a rule schema
    pub is_schema: bool,
    /// Keycut the pairs were aligned with, after any reset
    pub keycut: usize,
}

impl CompareResult {
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn summary(&self) -> String {
        format!("{} difference(s)", self.pairs.len())
    }
}

impl fmt::Display for CompareResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.record, self.summary())
    }
}
