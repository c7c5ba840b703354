//! Comparison configuration
//!
//! Keycuts are resolved per record name: a case-insensitive exact entry
//! wins, then the first generic substring rule, then the global
//! override replaces whatever was found. A record that resolves to
//! nothing gets the [`NO_KEYCUT`] sentinel, which effectively disables
//! key-based matching for it.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::CompareError;

/// Sentinel for records without a configured keycut.
pub const NO_KEYCUT: usize = 5000;

/// A substring-matched fallback rule: any record whose lowercased name
/// contains `pattern` gets `keycut`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenericRule {
    pub pattern: String,
    pub keycut: usize,
}

/// Settings for a comparison run.
///
/// Build programmatically with the `with_*` methods or load from a TOML
/// document:
///
/// ```toml
/// keep_identical_pit = false
/// schema_keycut = 9
///
/// [keycuts]
/// t512w = 4
///
/// [[generic_rules]]
/// pattern = "t5"
/// keycut = 6
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    /// Exact record-name keycuts, lowercased keys
    pub keycuts: HashMap<String, usize>,

    /// Ordered substring fallbacks; the first match wins
    pub generic_rules: Vec<GenericRule>,

    /// Keycut for schema records; `None` falls back to the "schema"
    /// entry of `keycuts`
    pub schema_keycut: Option<usize>,

    /// When set, replaces every resolved keycut
    pub override_keycut: Option<usize>,

    /// Report schema pairs that differ only in the PIT line number
    pub keep_identical_pit: bool,

    /// Lowercased substrings that mark a record name as a schema
    pub schema_markers: Vec<String>,

    /// Filename fragments that truncate a record name
    pub name_cut_marks: Vec<String>,
}

impl Default for CompareConfig {
    fn default() -> Self {
        CompareConfig {
            keycuts: HashMap::new(),
            generic_rules: Vec::new(),
            schema_keycut: None,
            override_keycut: None,
            keep_identical_pit: false,
            schema_markers: vec!["schema".to_string()],
            name_cut_marks: Vec::new(),
        }
    }
}

impl CompareConfig {
    /// Create a new default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the keycut for one record name (case-insensitive)
    pub fn with_keycut(mut self, record: impl Into<String>, keycut: usize) -> Self {
        self.keycuts.insert(record.into().to_lowercase(), keycut);
        self
    }

    /// Append a generic substring rule; rules are tried in insertion order
    pub fn with_generic_rule(mut self, pattern: impl Into<String>, keycut: usize) -> Self {
        self.generic_rules.push(GenericRule {
            pattern: pattern.into().to_lowercase(),
            keycut,
        });
        self
    }

    /// Set the keycut used for schema records
    pub fn with_schema_keycut(mut self, keycut: usize) -> Self {
        self.schema_keycut = Some(keycut);
        self
    }

    /// Force one keycut for every record
    pub fn with_override_keycut(mut self, keycut: usize) -> Self {
        self.override_keycut = Some(keycut);
        self
    }

    /// Keep schema pairs that differ only in the PIT line number
    pub fn with_keep_identical_pit(mut self, keep: bool) -> Self {
        self.keep_identical_pit = keep;
        self
    }

    /// Add a substring that marks a record name as a schema
    pub fn with_schema_marker(mut self, marker: impl Into<String>) -> Self {
        self.schema_markers.push(marker.into().to_lowercase());
        self
    }

    /// Add a filename fragment that truncates record names
    pub fn with_name_cut_mark(mut self, mark: impl Into<String>) -> Self {
        self.name_cut_marks.push(mark.into());
        self
    }

    /// True when the record name contains any schema marker.
    pub fn is_schema_record(&self, record: &str) -> bool {
        let name = record.to_lowercase();
        self.schema_markers
            .iter()
            .any(|marker| name.contains(marker.as_str()))
    }

    /// Resolve the keycut for a record.
    ///
    /// Schema records use `schema_keycut`, else the `"schema"` map
    /// entry. Table records use their exact map entry. Either way a
    /// still-unset value falls through to the first matching generic
    /// rule, and `override_keycut` replaces the result unconditionally.
    pub fn resolve_keycut(&self, record: &str, is_schema: bool) -> usize {
        let name = record.to_lowercase();
        let mut keycut = if is_schema {
            match self.schema_keycut {
                Some(value) => value,
                None => self.keycuts.get("schema").copied().unwrap_or(NO_KEYCUT),
            }
        } else {
            self.keycuts.get(&name).copied().unwrap_or(NO_KEYCUT)
        };

        if keycut == NO_KEYCUT {
            for rule in &self.generic_rules {
                if name.contains(rule.pattern.as_str()) {
                    keycut = rule.keycut;
                    break;
                }
            }
        }

        if let Some(value) = self.override_keycut {
            keycut = value;
        }
        keycut
    }

    /// Parse a TOML document into a config.
    pub fn from_toml_str(text: &str) -> Result<Self, CompareError> {
        let mut config: CompareConfig =
            toml::from_str(text).map_err(|err| CompareError::Config(err.to_string()))?;
        config.normalize_keys();
        Ok(config)
    }

    /// Load a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CompareError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| CompareError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    fn normalize_keys(&mut self) {
        self.keycuts = std::mem::take(&mut self.keycuts)
            .into_iter()
            .map(|(name, keycut)| (name.to_lowercase(), keycut))
            .collect();
        for rule in &mut self.generic_rules {
            rule.pattern = rule.pattern.to_lowercase();
        }
        for marker in &mut self.schema_markers {
            *marker = marker.to_lowercase();
        }
    }
}
