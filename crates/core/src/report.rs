//! Plain-text report rendering
//!
//! Renders comparison results as a line-per-pair grid: `+` added, `-`
//! deleted, `~` changed with both sides on one row. Changed words are
//! painted red, or wrapped in brackets when colors are off. Schema
//! results get a sub-header whenever the schema id changes.

use owo_colors::OwoColorize;

use crate::colorize::{colorize, ColoredSegment};
use crate::result::{CompareResult, MatchPair};

/// Text renderer for comparison results.
pub struct TextReport {
    color: bool,
}

impl TextReport {
    pub fn new() -> Self {
        TextReport { color: true }
    }

    /// Enable or disable ANSI colors; disabled, changed words are
    /// bracket-marked instead.
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn render(&self, results: &[CompareResult]) -> String {
        let mut output = String::new();
        for result in results {
            output.push_str(&self.render_result(result));
        }
        output
    }

    pub fn render_result(&self, result: &CompareResult) -> String {
        let mut output = String::new();
        output.push_str(&format!("==== {} ====\n", result.record));

        let mut current_id: Option<String> = None;
        for pair in &result.pairs {
            if result.is_schema {
                let id = pair.schema_id();
                if current_id.as_deref() != Some(id.as_str()) {
                    output.push_str(&format!("-- {id} --\n"));
                    current_id = Some(id);
                }
            }
            output.push_str(&self.render_pair(pair, result.keycut));
        }
        output
    }

    fn render_pair(&self, pair: &MatchPair, keycut: usize) -> String {
        match (&pair.before, &pair.after) {
            (Some(before), Some(after)) => {
                let (before_segments, after_segments) = colorize(before, after, keycut);
                format!(
                    "~ {} | {}\n",
                    self.join(&before_segments),
                    self.join(&after_segments)
                )
            }
            (Some(before), None) => format!("- {before}\n"),
            (None, Some(after)) => format!("+ {after}\n"),
            (None, None) => String::new(),
        }
    }

    fn join(&self, segments: &[ColoredSegment]) -> String {
        let mut words = Vec::new();
        for segment in segments {
            if segment.word.is_empty() {
                continue;
            }
            if !segment.changed {
                words.push(segment.word.clone());
            } else if self.color {
                words.push(segment.word.red().to_string());
            } else {
                words.push(format!("[{}]", segment.word));
            }
        }
        words.join(" ")
    }
}

impl Default for TextReport {
    fn default() -> Self {
        Self::new()
    }
}
