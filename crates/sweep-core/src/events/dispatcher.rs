//! Synchronous event dispatch. Zero overhead when no handler is registered.

use std::sync::Arc;

use super::handler::SweepEventHandler;
use super::types::*;

/// Synchronous event dispatcher wrapping a list of handlers.
#[derive(Default)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn SweepEventHandler>>,
}

impl EventDispatcher {
    /// Create a new empty dispatcher.
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register an event handler.
    pub fn register(&mut self, handler: Arc<dyn SweepEventHandler>) {
        self.handlers.push(handler);
    }

    /// Returns the number of registered handlers.
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// Emit an event to all registered handlers.
    /// A panicking handler does not stop later handlers from receiving the event.
    fn emit<F: Fn(&dyn SweepEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                tracing::warn!("event handler panicked; continuing with remaining handlers");
            }
        }
    }

    // ---- Batch lifecycle ----
    pub fn emit_batch_started(&self, event: &BatchStartedEvent) {
        self.emit(|h| h.on_batch_started(event));
    }

    pub fn emit_file_skipped(&self, event: &FileSkippedEvent) {
        self.emit(|h| h.on_file_skipped(event));
    }

    pub fn emit_scene_opened(&self, event: &SceneOpenedEvent) {
        self.emit(|h| h.on_scene_opened(event));
    }

    pub fn emit_batch_complete(&self, event: &BatchCompleteEvent) {
        self.emit(|h| h.on_batch_complete(event));
    }

    // ---- Traversal ----
    pub fn emit_value_processed(&self, event: &ValueProcessedEvent) {
        self.emit(|h| h.on_value_processed(event));
    }

    pub fn emit_asset_dirtied(&self, event: &AssetDirtiedEvent) {
        self.emit(|h| h.on_asset_dirtied(event));
    }

    // ---- Errors ----
    pub fn emit_error(&self, event: &ErrorEvent) {
        self.emit(|h| h.on_error(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
