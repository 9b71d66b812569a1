//! Outcome of a batch run.

use sweep_core::errors::BatchError;

use crate::model::DirtyTarget;

/// Counters, dirty marks and non-fatal errors collected during one run.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub operation: &'static str,
    pub files_processed: usize,
    pub files_skipped: usize,
    pub scenes_processed: usize,
    pub values_processed: usize,
    /// Dirty marks forwarded to the backend, in order, without duplicates.
    pub dirty: Vec<DirtyTarget>,
    pub errors: Vec<BatchError>,
    pub duration_ms: u64,
}

impl BatchReport {
    pub fn new(operation: &'static str) -> Self {
        Self {
            operation,
            ..Self::default()
        }
    }

    pub fn add_error(&mut self, error: BatchError) {
        self.errors.push(error);
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    pub fn dirty_marks(&self) -> usize {
        self.dirty.len()
    }

    pub fn is_dirty(&self, path: &str) -> bool {
        self.dirty.iter().any(|t| t.asset_path() == Some(path))
    }
}
