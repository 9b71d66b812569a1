//! SweepEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Trait for observing batch runs.
///
/// Handlers only override the events they care about.
pub trait SweepEventHandler: Send + Sync {
    // ---- Batch lifecycle ----
    fn on_batch_started(&self, _event: &BatchStartedEvent) {}
    fn on_file_skipped(&self, _event: &FileSkippedEvent) {}
    fn on_scene_opened(&self, _event: &SceneOpenedEvent) {}
    fn on_batch_complete(&self, _event: &BatchCompleteEvent) {}

    // ---- Traversal ----
    fn on_value_processed(&self, _event: &ValueProcessedEvent) {}
    fn on_asset_dirtied(&self, _event: &AssetDirtiedEvent) {}

    // ---- Errors ----
    fn on_error(&self, _event: &ErrorEvent) {}
}
