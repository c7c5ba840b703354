//! Schema (rule file) matching
//!
//! Rule dumps group lines under a 4-character schema id. Matching runs
//! independently per id: the smaller side's lines ("minor") are placed
//! into the larger side's slots ("major") by a greedy best-score
//! assignment, with a short-circuit for PIT lines that differ only in
//! their line-number window.
//!
//! A PIT line carries a space at character 4 and a volatile line-number
//! field at characters 4..8 that is excluded from identity checks.

use std::collections::{BTreeSet, HashMap};

use log::trace;

use crate::normalize::{is_date, reference_key};
use crate::result::MatchPair;
use crate::score::score;

/// Characters of a rule line that form its schema id.
pub const SCHEMA_ID_LEN: usize = 4;

/// End of the PIT line-number window (characters 4..8).
const PIT_WINDOW_END: usize = 8;

/// True for schema lines carrying a line-number window: a space at
/// character 4.
pub fn is_pit(line: &str) -> bool {
    line.chars().nth(SCHEMA_ID_LEN) == Some(' ')
}

/// True when two PIT lines differ only inside the line-number window.
pub fn pit_identical(before: &str, after: &str) -> bool {
    if !is_pit(before) || !is_pit(after) {
        return false;
    }
    outside_window(before) == outside_window(after)
}

/// The schema id of a rule line (its first four characters).
pub fn schema_id(line: &str) -> String {
    line.chars().take(SCHEMA_ID_LEN).collect()
}

fn outside_window(line: &str) -> String {
    line.chars()
        .take(SCHEMA_ID_LEN)
        .chain(line.chars().skip(PIT_WINDOW_END))
        .collect()
}

/// Matching key of a schema line: PIT lines cut at the schema id
/// length, everything else at `keycut`.
fn schema_reference(line: &str, keycut: usize) -> String {
    let cut = if is_pit(line) { SCHEMA_ID_LEN } else { keycut };
    reference_key(line, cut)
}

// ============================================================================
// Greedy assignment
// ============================================================================

/// Phases of the assignment loop.
enum Step {
    /// Collect scored candidates over pending lines and open slots
    Scan,
    /// Commit the best candidate
    Assign,
    /// Insert all remaining pending lines as new slots
    Insert,
    /// Alignment complete
    Done,
}

/// A possible pairing found during a scan.
struct Candidate {
    score: i64,
    minor: usize,
    major: usize,
}

/// Align `minor` lines into `major` slots, greedily by score.
///
/// Returns two equal-length vectors: the minor side placed into slot
/// positions and the major side including any slots grown for minor
/// lines that matched nothing. `None` marks an absent side. Every minor
/// line and every major line appears exactly once.
///
/// When the first minor line is a PIT line and `keep_identical_pit` is
/// false, PIT-identical pairs are removed from both sides before
/// matching starts.
pub fn fill_scheme(
    minor: &[String],
    major: &[String],
    keycut: usize,
    keep_identical_pit: bool,
) -> (Vec<Option<String>>, Vec<Option<String>>) {
    let mut minor: Vec<String> = minor.to_vec();
    let mut major: Vec<String> = major.to_vec();

    if minor.is_empty() {
        return (vec![None; major.len()], major.into_iter().map(Some).collect());
    }
    if is_pit(&minor[0]) && !keep_identical_pit {
        drop_identical_pits(&mut minor, &mut major);
    }
    if minor.is_empty() {
        return (vec![None; major.len()], major.into_iter().map(Some).collect());
    }
    if major.is_empty() {
        let count = minor.len();
        return (minor.into_iter().map(Some).collect(), vec![None; count]);
    }

    // Tombstone arenas: assigned pending lines and filled slots are
    // taken, never removed, so indices stay stable across iterations.
    let mut pending: Vec<Option<String>> = minor.into_iter().map(Some).collect();
    let mut slots: Vec<Option<String>> = vec![None; major.len()];
    let mut majors: Vec<Option<String>> = major.into_iter().map(Some).collect();

    let mut candidates: Vec<Candidate> = Vec::new();
    let mut step = Step::Scan;

    loop {
        match step {
            Step::Scan => {
                for entry in pending.iter_mut() {
                    if matches!(entry.as_deref(), Some("")) {
                        *entry = None;
                    }
                }
                if pending.iter().all(Option::is_none) {
                    step = Step::Done;
                    continue;
                }

                candidates.clear();
                let mut assigned_identical = false;
                'scan: for i in 0..pending.len() {
                    let line = match &pending[i] {
                        Some(line) => line.clone(),
                        None => continue,
                    };
                    let line_key = schema_reference(&line, keycut);
                    for j in 0..majors.len() {
                        if slots[j].is_some() {
                            continue;
                        }
                        let slot_line = majors[j].as_deref().unwrap_or("");
                        if is_pit(&line) && is_pit(slot_line) {
                            if pit_identical(&line, slot_line) {
                                // Identical up to the line number: claim the
                                // slot and restart the scan from scratch.
                                slots[j] = pending[i].take();
                                candidates.clear();
                                assigned_identical = true;
                                break 'scan;
                            }
                            candidates.push(Candidate {
                                score: score(&line, slot_line, keycut),
                                minor: i,
                                major: j,
                            });
                        } else {
                            let slot_key = if slot_line.is_empty() {
                                String::new()
                            } else {
                                schema_reference(slot_line, keycut)
                            };
                            if !line_key.is_empty() && line_key == slot_key {
                                candidates.push(Candidate {
                                    score: score(&line, slot_line, keycut),
                                    minor: i,
                                    major: j,
                                });
                            }
                        }
                    }
                }

                if assigned_identical {
                    continue;
                }
                step = if candidates.is_empty() {
                    Step::Insert
                } else {
                    Step::Assign
                };
            }
            Step::Assign => {
                // First maximum wins: ties keep the earliest pending line,
                // then the earliest open slot.
                let mut best = 0;
                for (index, candidate) in candidates.iter().enumerate().skip(1) {
                    if candidate.score > candidates[best].score {
                        best = index;
                    }
                }
                let chosen = &candidates[best];
                trace!(
                    "assign pending {} to slot {} (score {})",
                    chosen.minor,
                    chosen.major,
                    chosen.score
                );
                slots[chosen.major] = pending[chosen.minor].take();
                step = Step::Scan;
            }
            Step::Insert => {
                // Nothing matched by key. Each remaining line becomes a new
                // slot right after the last major line sharing its
                // reference key, or at the end.
                for i in 0..pending.len() {
                    let line = match pending[i].take() {
                        Some(line) => line,
                        None => continue,
                    };
                    let line_key = schema_reference(&line, keycut);
                    let mut insert_after = None;
                    for k in 0..majors.len() {
                        let major_line = majors[k].as_deref().unwrap_or("");
                        if reference_key(major_line, keycut) == line_key {
                            insert_after = Some(k);
                        }
                    }
                    trace!("insert unmatched line after slot {:?}", insert_after);
                    match insert_after {
                        Some(k) => {
                            slots.insert(k + 1, Some(line));
                            majors.insert(k + 1, None);
                        }
                        None => {
                            slots.push(Some(line));
                            majors.push(None);
                        }
                    }
                }
                step = Step::Done;
            }
            Step::Done => break,
        }
    }

    (slots, majors)
}

/// Remove PIT-identical pairs from both lists. Each minor line consumes
/// the first not-yet-removed major line it is PIT-identical to.
fn drop_identical_pits(minor: &mut Vec<String>, major: &mut Vec<String>) {
    let mut removed_minor = vec![false; minor.len()];
    let mut removed_major = vec![false; major.len()];
    for (i, line) in minor.iter().enumerate() {
        for (j, slot) in major.iter().enumerate() {
            if !removed_major[j] && pit_identical(line, slot) {
                removed_minor[i] = true;
                removed_major[j] = true;
                break;
            }
        }
    }
    retain_kept(minor, &removed_minor);
    retain_kept(major, &removed_major);
}

fn retain_kept(lines: &mut Vec<String>, removed: &[bool]) {
    *lines = std::mem::take(lines)
        .into_iter()
        .zip(removed)
        .filter(|(_, &removed)| !removed)
        .map(|(line, _)| line)
        .collect();
}

// ============================================================================
// Per-id grouping
// ============================================================================

/// Align changed schema lines, grouped by schema id.
///
/// Groups are processed in ascending id order. Within a group the
/// smaller side plays minor (ties keep the before side minor) and the
/// aligned pairs are re-oriented back to (before, after). Aligned pairs
/// that are PIT-identical are dropped unless `keep_identical_pit`.
pub fn align_schema(
    before: &[String],
    after: &[String],
    keycut: usize,
    keep_identical_pit: bool,
) -> Vec<MatchPair> {
    let mut ids: BTreeSet<String> = BTreeSet::new();
    for line in before.iter().chain(after.iter()) {
        if !line.is_empty() && !is_date(line) {
            ids.insert(schema_id(line));
        }
    }
    if ids.is_empty() {
        return Vec::new();
    }

    let mut before_groups: HashMap<String, Vec<String>> = HashMap::new();
    for line in before {
        if !line.is_empty() {
            before_groups
                .entry(schema_id(line))
                .or_default()
                .push(line.clone());
        }
    }
    let mut after_groups: HashMap<String, Vec<String>> = HashMap::new();
    for line in after {
        if !line.is_empty() {
            after_groups
                .entry(schema_id(line))
                .or_default()
                .push(line.clone());
        }
    }

    let empty: Vec<String> = Vec::new();
    let mut pairs = Vec::new();
    for id in &ids {
        let before_group = before_groups.get(id).unwrap_or(&empty);
        let after_group = after_groups.get(id).unwrap_or(&empty);
        trace!(
            "schema group {id}: {} before, {} after",
            before_group.len(),
            after_group.len()
        );

        let (before_side, after_side) = if before_group.len() <= after_group.len() {
            fill_scheme(before_group, after_group, keycut, keep_identical_pit)
        } else {
            let (minor_side, major_side) =
                fill_scheme(after_group, before_group, keycut, keep_identical_pit);
            (major_side, minor_side)
        };

        for (b, a) in before_side.into_iter().zip(after_side) {
            let identical = match (&b, &a) {
                (Some(b), Some(a)) => pit_identical(b, a),
                _ => false,
            };
            if keep_identical_pit || !identical {
                pairs.push(MatchPair::from_sides(b, a));
            }
        }
    }
    pairs
}
