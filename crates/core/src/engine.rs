//! Comparison engine that orchestrates the full pipeline

use std::path::Path;

use log::debug;

use crate::changes::{extract_changes, ChangedLines};
use crate::config::CompareConfig;
use crate::error::CompareError;
use crate::result::CompareResult;
use crate::schema::align_schema;
use crate::source::{pair_files, read_lines, record_name, FilePair};
use crate::table::align_table;

/// The main comparison engine
pub struct CompareEngine {
    config: CompareConfig,
}

impl CompareEngine {
    /// Create a new engine with the given configuration
    pub fn new(config: CompareConfig) -> Self {
        Self { config }
    }

    /// Create an engine with the default configuration
    pub fn default_config() -> Self {
        Self::new(CompareConfig::default())
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    /// Compare one record's before and after lines.
    ///
    /// Classifies the record and resolves its keycut from the
    /// configuration, then runs the pipeline:
    /// 1. Extract changed lines (normalize, set difference)
    /// 2. Nothing changed: return `None`
    /// 3. Align by schema grouping or table key matching
    /// 4. Reset the keycut where whole-line coloring applies
    pub fn compare_record(
        &self,
        record: &str,
        before: &[String],
        after: &[String],
    ) -> Option<CompareResult> {
        let is_schema = self.config.is_schema_record(record);
        let keycut = self.config.resolve_keycut(record, is_schema);
        self.compare_classified(record, is_schema, keycut, before, after)
    }

    /// Compare lines for callers that classified the record and
    /// resolved the keycut themselves.
    pub fn compare_classified(
        &self,
        record: &str,
        is_schema: bool,
        keycut: usize,
        before: &[String],
        after: &[String],
    ) -> Option<CompareResult> {
        debug!("analyzing {record}");
        let changed = extract_changes(before, after);
        if changed.is_empty() {
            debug!("{record}: no changes found");
            return None;
        }
        debug!(
            "{record}: {} before-only and {} after-only lines, keycut {keycut}",
            changed.before_only.len(),
            changed.after_only.len()
        );
        self.align(record, is_schema, keycut, &changed)
    }

    fn align(
        &self,
        record: &str,
        is_schema: bool,
        keycut: usize,
        changed: &ChangedLines,
    ) -> Option<CompareResult> {
        let pairs = if is_schema {
            align_schema(
                &changed.before_only,
                &changed.after_only,
                keycut,
                self.config.keep_identical_pit,
            )
        } else {
            align_table(&changed.before_only, &changed.after_only, keycut)
        };
        if pairs.is_empty() {
            return None;
        }

        // Same-size tables with an effectively unset keycut get whole-line
        // coloring: the colorizer sees no key prefix to skip.
        let keycut = if !is_schema && keycut > 100 && changed.same_len {
            0
        } else {
            keycut
        };

        Some(CompareResult {
            record: record.to_string(),
            pairs,
            is_schema,
            keycut,
        })
    }

    /// Compare two files, or two directory trees pairwise by file name.
    ///
    /// Records with no differences are dropped from the output.
    pub fn compare_paths(
        &self,
        before: impl AsRef<Path>,
        after: impl AsRef<Path>,
    ) -> Result<Vec<CompareResult>, CompareError> {
        let before = before.as_ref();
        let after = after.as_ref();

        let pairs = if before.is_file() && after.is_file() {
            let name = match before.file_name() {
                Some(name) => name.to_string_lossy().to_lowercase(),
                None => String::new(),
            };
            vec![FilePair {
                name,
                before: before.to_path_buf(),
                after: after.to_path_buf(),
            }]
        } else if before.is_dir() && after.is_dir() {
            pair_files(before, after)
        } else {
            return Err(CompareError::MixedInputKinds);
        };

        let mut results = Vec::new();
        for pair in pairs {
            let record = record_name(&pair.before, &self.config.name_cut_marks);
            let before_lines = read_lines(&pair.before)?;
            let after_lines = read_lines(&pair.after)?;
            if let Some(result) = self.compare_record(&record, &before_lines, &after_lines) {
                debug!("{record}: {}", result.summary());
                results.push(result);
            }
        }
        Ok(results)
    }
}

impl Default for CompareEngine {
    fn default() -> Self {
        Self::default_config()
    }
}
