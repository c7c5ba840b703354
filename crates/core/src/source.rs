//! Input files
//!
//! Export dumps arrive in whatever encoding the exporting system felt
//! like: UTF-8 with or without a BOM, or a single-byte legacy encoding.
//! Decoding is total: valid UTF-8 is taken as-is, anything else is read
//! as Latin-1 so no file is ever rejected.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::error::CompareError;

/// A before/after file matched by name across two directory trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    /// Lowercased file name common to both sides
    pub name: String,
    pub before: PathBuf,
    pub after: PathBuf,
}

/// Read a dump file into lines, with encoding fallback.
pub fn read_lines(path: impl AsRef<Path>) -> Result<Vec<String>, CompareError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| CompareError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode(&bytes).lines().map(str::to_string).collect())
}

fn decode(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => bytes.iter().map(|&b| b as char).collect(),
    }
}

/// Walk two directory trees and pair files by lowercased name.
///
/// Pairs come back sorted by name. Files present on only one side are
/// skipped; within one side, a name collision keeps the file seen last.
pub fn pair_files(before_dir: impl AsRef<Path>, after_dir: impl AsRef<Path>) -> Vec<FilePair> {
    let before = index_files(before_dir.as_ref());
    let after = index_files(after_dir.as_ref());
    debug!(
        "{} files in before tree, {} in after tree",
        before.len(),
        after.len()
    );

    before
        .into_iter()
        .filter_map(|(name, before_path)| {
            after.get(&name).map(|after_path| FilePair {
                name: name.clone(),
                before: before_path,
                after: after_path.clone(),
            })
        })
        .collect()
}

fn index_files(dir: &Path) -> BTreeMap<String, PathBuf> {
    WalkDir::new(dir)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            let name = entry.file_name().to_string_lossy().to_lowercase();
            (name, entry.into_path())
        })
        .collect()
}

/// Record name of a dump file: the file stem, truncated at the first
/// cut mark found past the start of the stem.
pub fn record_name(path: impl AsRef<Path>, cut_marks: &[String]) -> String {
    let stem = match path.as_ref().file_stem() {
        Some(stem) => stem.to_string_lossy().into_owned(),
        None => String::new(),
    };
    for mark in cut_marks {
        if let Some(pos) = stem.find(mark.as_str()) {
            if pos > 0 {
                return stem[..pos].to_string();
            }
        }
    }
    stem
}
