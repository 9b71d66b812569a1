//! File selection configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Which files a batch run looks at.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Directory walked when no explicit file list is given. Default: `Assets/`.
    pub root: Option<String>,
    /// Explicit file list. When non-empty, replaces directory discovery.
    pub file_paths: Vec<String>,
    /// Extensions (with leading dot) a file must end with to be processed.
    pub allowed_extensions: Vec<String>,
    /// Path fragments that exclude a file even when its extension is allowed.
    pub ignored_path_substrings: Vec<String>,
    /// Path fragments excluded during directory discovery.
    pub excluded_file_masks: Vec<String>,
}

impl ScanConfig {
    /// Returns the effective discovery root, defaulting to `Assets/`.
    pub fn effective_root(&self) -> &str {
        self.root.as_deref().unwrap_or(constants::DEFAULT_ASSETS_ROOT)
    }

    /// Returns the effective allowed extensions.
    pub fn effective_allowed_extensions(&self) -> Vec<String> {
        or_defaults(&self.allowed_extensions, &constants::DEFAULT_ALLOWED_EXTENSIONS)
    }

    /// Returns the effective ignored path substrings.
    pub fn effective_ignored_path_substrings(&self) -> Vec<String> {
        or_defaults(
            &self.ignored_path_substrings,
            &constants::DEFAULT_IGNORED_PATH_SUBSTRINGS,
        )
    }

    /// Returns the effective discovery masks.
    pub fn effective_excluded_file_masks(&self) -> Vec<String> {
        or_defaults(&self.excluded_file_masks, &constants::DEFAULT_EXCLUDED_FILE_MASKS)
    }
}

pub(crate) fn or_defaults(values: &[String], defaults: &[&str]) -> Vec<String> {
    if values.is_empty() {
        defaults.iter().map(|s| s.to_string()).collect()
    } else {
        values.to_vec()
    }
}
