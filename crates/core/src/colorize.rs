//! Word-level highlighting
//!
//! Splits an aligned pair into words and decides which words deserve a
//! highlight. Equal word counts mark positionally; unequal counts skip
//! the key prefix, then mark words that appear nowhere near their
//! position on the other side. A word that merely moved stays plain.

/// One word of a line plus its highlight flag. Empty words are
/// placeholders for positions past the end of the shorter side and are
/// skipped when rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredSegment {
    pub word: String,
    pub changed: bool,
}

impl ColoredSegment {
    pub fn new(word: impl Into<String>, changed: bool) -> Self {
        ColoredSegment {
            word: word.into(),
            changed,
        }
    }
}

/// Split a changed pair into highlight segments, one `Vec` per side.
///
/// A blank side short-circuits: both lines come back as single
/// unmarked segments, untouched.
pub fn colorize(
    before: &str,
    after: &str,
    keycut: usize,
) -> (Vec<ColoredSegment>, Vec<ColoredSegment>) {
    if before.trim().is_empty() || after.trim().is_empty() {
        return (
            vec![ColoredSegment::new(before, false)],
            vec![ColoredSegment::new(after, false)],
        );
    }

    let before_words: Vec<&str> = before.split_whitespace().collect();
    let after_words: Vec<&str> = after.split_whitespace().collect();

    if before_words.len() == after_words.len() {
        let mut before_segments = Vec::with_capacity(before_words.len());
        let mut after_segments = Vec::with_capacity(after_words.len());
        for (p, q) in before_words.iter().zip(&after_words) {
            let changed = p != q;
            before_segments.push(ColoredSegment::new(*p, changed));
            after_segments.push(ColoredSegment::new(*q, changed));
        }
        return (before_segments, after_segments);
    }

    let total = before_words.len().max(after_words.len());
    let mut before_segments = Vec::with_capacity(total);
    let mut after_segments = Vec::with_capacity(total);

    // Words whose characters fall inside the keycut are key material,
    // never marked. The character count follows the before side only.
    let mut prefix_len = 0;
    let mut char_count = 0;
    for i in 0..total {
        if let Some(word) = before_words.get(i) {
            char_count += word.chars().count();
        }
        if char_count > keycut {
            break;
        }
        if let Some(word) = before_words.get(i) {
            before_segments.push(ColoredSegment::new(*word, false));
        }
        if let Some(word) = after_words.get(i) {
            after_segments.push(ColoredSegment::new(*word, false));
        }
        prefix_len = i + 1;
    }

    let spread = before_words.len().abs_diff(after_words.len());
    let mut hit = false;
    for i in prefix_len..total {
        let p = before_words.get(i).copied().unwrap_or("");
        let q = after_words.get(i).copied().unwrap_or("");
        if p == q {
            before_segments.push(ColoredSegment::new(p, false));
            after_segments.push(ColoredSegment::new(q, false));
            continue;
        }
        if p.is_empty() {
            before_segments.push(ColoredSegment::new("", false));
        } else if word_elsewhere(p, &after_words, i, spread, prefix_len) {
            before_segments.push(ColoredSegment::new(p, false));
        } else {
            before_segments.push(ColoredSegment::new(p, true));
            hit = true;
        }
        if q.is_empty() {
            after_segments.push(ColoredSegment::new("", false));
        } else if word_elsewhere(q, &before_words, i, spread, prefix_len) {
            after_segments.push(ColoredSegment::new(q, false));
        } else {
            after_segments.push(ColoredSegment::new(q, true));
            hit = true;
        }
    }

    if !hit {
        // Nothing got marked even though the word counts differ: the
        // surplus tail of the longer side is the change.
        let shorter = before_words.len().min(after_words.len());
        if before_words.len() > after_words.len() {
            before_segments = before_words
                .iter()
                .enumerate()
                .map(|(i, word)| ColoredSegment::new(*word, i >= shorter))
                .collect();
        } else {
            after_segments = after_words
                .iter()
                .enumerate()
                .map(|(i, word)| ColoredSegment::new(*word, i >= shorter))
                .collect();
        }
    }

    (before_segments, after_segments)
}

/// Whether `word` occurs on the other side at or after a window start
/// derived from its position. The window never starts past the key
/// prefix, so moved words are found even far from their position.
fn word_elsewhere(
    word: &str,
    other_side: &[&str],
    position: usize,
    spread: usize,
    prefix_len: usize,
) -> bool {
    let start = position.saturating_sub(spread).min(prefix_len);
    other_side[start.min(other_side.len())..]
        .iter()
        .any(|other| *other == word)
}
