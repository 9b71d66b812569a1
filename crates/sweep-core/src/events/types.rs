//! Event payload types.

/// Payload for `on_batch_started`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchStartedEvent {
    pub operation: &'static str,
    pub file_count: usize,
}

/// Payload for `on_file_skipped`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSkippedEvent {
    pub path: String,
    pub reason: String,
}

/// Payload for `on_value_processed`. Fields are absent when the traversal
/// cursor had no value for them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueProcessedEvent {
    pub file_path: Option<String>,
    pub hierarchy: Option<String>,
    pub field: Option<String>,
    pub value: String,
}

/// Payload for `on_asset_dirtied`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetDirtiedEvent {
    pub target: String,
}

/// Payload for `on_scene_opened`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SceneOpenedEvent {
    pub path: String,
}

/// Payload for `on_batch_complete`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchCompleteEvent {
    pub files_processed: usize,
    pub files_skipped: usize,
    pub values_processed: usize,
    pub dirty_marks: usize,
    pub errors: usize,
    pub duration_ms: u64,
}

/// Payload for `on_error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEvent {
    pub message: String,
    pub error_code: String,
}
