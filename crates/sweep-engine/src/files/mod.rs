//! Project file discovery.

use std::path::Path;

use sweep_core::config::ScanConfig;
use sweep_core::constants::{DEFAULT_ASSETS_ROOT, DEFAULT_EXCLUDED_FILE_MASKS, META_EXTENSION};
use sweep_core::errors::AssetError;
use walkdir::WalkDir;

/// Flat list of project files a batch run iterates over.
#[derive(Debug, Clone)]
pub struct FilesMap {
    excluded_masks: Vec<String>,
    files: Vec<String>,
}

impl Default for FilesMap {
    fn default() -> Self {
        Self::new(
            DEFAULT_EXCLUDED_FILE_MASKS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        )
    }
}

impl FilesMap {
    pub fn new(excluded_masks: Vec<String>) -> Self {
        Self {
            excluded_masks,
            files: Vec::new(),
        }
    }

    pub fn from_config(scan: &ScanConfig) -> Self {
        Self::new(scan.effective_excluded_file_masks())
    }

    /// Collect every file under `dir` (default `Assets/`).
    ///
    /// Skips `.meta` sidecars and any path containing an excluded mask.
    /// Separators are normalized to `/` and the result is sorted.
    pub fn prepare_files(&mut self, dir: Option<&str>) -> Result<&[String], AssetError> {
        let root = dir.unwrap_or(DEFAULT_ASSETS_ROOT);
        if !Path::new(root).is_dir() {
            return Err(AssetError::NotFound {
                path: root.to_string(),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path().to_string_lossy().replace('\\', "/");
            if path.ends_with(META_EXTENSION) {
                continue;
            }
            if self.excluded_masks.iter().any(|mask| path.contains(mask.as_str())) {
                continue;
            }
            files.push(path);
        }
        files.sort_unstable();

        tracing::info!(root, files = files.len(), "prepared file list");
        self.files = files;
        Ok(&self.files)
    }

    pub fn all_files(&self) -> &[String] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
