//! Tests for the sweep event system.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sweep_core::events::types::*;
use sweep_core::events::{EventDispatcher, SweepEventHandler};

#[derive(Default)]
struct CountingHandler {
    processed: AtomicUsize,
    dirtied: AtomicUsize,
    errors: AtomicUsize,
}

impl SweepEventHandler for CountingHandler {
    fn on_value_processed(&self, _event: &ValueProcessedEvent) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    fn on_asset_dirtied(&self, _event: &AssetDirtiedEvent) {
        self.dirtied.fetch_add(1, Ordering::Relaxed);
    }

    fn on_error(&self, _event: &ErrorEvent) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }
}

struct PanickingHandler;

impl SweepEventHandler for PanickingHandler {
    fn on_value_processed(&self, _event: &ValueProcessedEvent) {
        panic!("handler failure");
    }
}

fn processed_event() -> ValueProcessedEvent {
    ValueProcessedEvent {
        file_path: Some("Assets/A.prefab".into()),
        hierarchy: None,
        field: Some("label".into()),
        value: "\"hello\"".into(),
    }
}

#[test]
fn test_empty_dispatcher_is_noop() {
    let dispatcher = EventDispatcher::new();
    assert_eq!(dispatcher.handler_count(), 0);
    dispatcher.emit_value_processed(&processed_event());
}

#[test]
fn test_events_reach_every_handler() {
    let first = Arc::new(CountingHandler::default());
    let second = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(first.clone());
    dispatcher.register(second.clone());

    dispatcher.emit_value_processed(&processed_event());
    dispatcher.emit_asset_dirtied(&AssetDirtiedEvent {
        target: "Assets/A.prefab".into(),
    });
    dispatcher.emit_error(&ErrorEvent {
        message: "boom".into(),
        error_code: "ASSET_ERROR".into(),
    });

    for handler in [&first, &second] {
        assert_eq!(handler.processed.load(Ordering::Relaxed), 1);
        assert_eq!(handler.dirtied.load(Ordering::Relaxed), 1);
        assert_eq!(handler.errors.load(Ordering::Relaxed), 1);
    }
}

#[test]
fn test_panicking_handler_does_not_block_others() {
    let counter = Arc::new(CountingHandler::default());
    let mut dispatcher = EventDispatcher::new();
    dispatcher.register(Arc::new(PanickingHandler));
    dispatcher.register(counter.clone());

    dispatcher.emit_value_processed(&processed_event());

    assert_eq!(counter.processed.load(Ordering::Relaxed), 1);
}
