//! Line normalization and low-level text helpers
//!
//! Export dumps pad columns with runs of spaces and occasionally tabs, so
//! every comparison starts from a canonical form produced by
//! [`normalize`]. The lighter [`collapse_spaces`] variant is used where
//! column positions must survive (scoring), and [`reference_key`] builds
//! the de-spaced key prefix the matchers pair lines on.

/// Canonicalize a raw dump line.
///
/// Tabs are mapped to single spaces and runs of two or more spaces
/// collapse to one, then surrounding whitespace is trimmed. Idempotent.
pub fn normalize(line: &str) -> String {
    collapse_spaces(&line.replace('\t', " "))
        .trim()
        .to_string()
}

/// Collapse runs of two or more spaces to a single space.
///
/// Tabs and other whitespace pass through untouched and nothing is
/// trimmed, so character positions inside the key window stay stable.
pub fn collapse_spaces(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_run = false;
    for ch in text.chars() {
        if ch == ' ' {
            if !in_run {
                out.push(ch);
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

/// Remove every space character.
pub fn strip_spaces(text: &str) -> String {
    text.chars().filter(|&ch| ch != ' ').collect()
}

/// First `keycut` characters of the line with all spaces removed.
///
/// This is the key the matchers compare: shorter lines yield shorter
/// keys, and a `keycut` of zero yields the empty key.
pub fn reference_key(text: &str, keycut: usize) -> String {
    strip_spaces(text).chars().take(keycut).collect()
}

/// True when the trimmed text starts with a `dd.mm.yyyy` token.
///
/// Dump headers repeat the export date on both sides; those lines are
/// noise and get dropped from change extraction.
pub fn is_date(text: &str) -> bool {
    let text = text.trim();
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if first.is_ascii_digit() => {}
        _ => return false,
    }
    let first_token = text.split_whitespace().next().unwrap_or("");
    if first_token.chars().count() < 10 {
        return false;
    }
    let head: Vec<char> = text.chars().take(6).collect();
    head.get(2) == Some(&'.') && head.get(5) == Some(&'.')
}
