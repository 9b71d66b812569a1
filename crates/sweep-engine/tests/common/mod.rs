//! Shared fixtures for engine integration tests.

#![allow(dead_code)]

use std::cell::Cell;
use std::sync::{Arc, Mutex};

use sweep_core::events::types::*;
use sweep_core::events::SweepEventHandler;
use sweep_engine::model::{Object, TypeKey, TypeRegistry, Value};
use sweep_engine::traversal::Action;

/// Types used across tests.
pub struct Fixture {
    pub registry: TypeRegistry,
    /// Target component: `LocalizedText : Behaviour { key: string }`.
    pub localized: TypeKey,
    /// Data object holding one target field: `TextHolder : DataObject { text }`.
    pub text_holder: TypeKey,
    /// Component without any target: `Health : Behaviour { hp: int }`.
    pub health: TypeKey,
    /// Component with nested data: `Dialogue : Behaviour { line: DialogueLine, lines: List<DialogueLine>, extras: List<object> }`.
    pub dialogue: TypeKey,
    /// `DialogueLine { text: LocalizedText, speaker: string }`.
    pub dialogue_line: TypeKey,
    /// Component with a typed list of targets: `Menu : Behaviour { labels: List<LocalizedText> }`.
    pub menu: TypeKey,
}

impl Fixture {
    pub fn new() -> Self {
        let mut registry = TypeRegistry::new();
        let localized = registry
            .class("LocalizedText")
            .extends(TypeKey::BEHAVIOUR)
            .field("key", TypeKey::STRING)
            .build()
            .unwrap();
        let text_holder = registry
            .class("TextHolder")
            .extends(TypeKey::DATA_OBJECT)
            .field("text", localized)
            .build()
            .unwrap();
        let health = registry
            .class("Health")
            .extends(TypeKey::BEHAVIOUR)
            .field("hp", TypeKey::INT)
            .build()
            .unwrap();
        let dialogue_line = registry
            .class("DialogueLine")
            .field("text", localized)
            .field("speaker", TypeKey::STRING)
            .build()
            .unwrap();
        let lines = registry.list_of(dialogue_line);
        let dialogue = registry
            .class("Dialogue")
            .extends(TypeKey::BEHAVIOUR)
            .field("line", dialogue_line)
            .field("lines", lines)
            .field("extras", TypeKey::ANY_LIST)
            .build()
            .unwrap();
        let labels = registry.list_of(localized);
        let menu = registry
            .class("Menu")
            .extends(TypeKey::BEHAVIOUR)
            .field("labels", labels)
            .build()
            .unwrap();

        Self {
            registry,
            localized,
            text_holder,
            health,
            dialogue,
            dialogue_line,
            menu,
        }
    }

    pub fn localized_value(&self, key: &str) -> Value {
        Object::new(self.localized).with("key", key).into()
    }

    pub fn text_holder_value(&self, key: &str) -> Value {
        Object::new(self.text_holder)
            .with("text", self.localized_value(key))
            .into()
    }

    pub fn dialogue_line(&self, key: &str) -> Value {
        Object::new(self.dialogue_line)
            .with("text", self.localized_value(key))
            .with("speaker", "narrator")
            .into()
    }

    pub fn health_object(&self) -> Object {
        Object::new(self.health).with("hp", 100_i64)
    }
}

/// Register a chain `Level{n} -> ... -> Level0 -> target` and build a value
/// for it. The target sits behind `n` nested objects.
pub fn build_chain(registry: &mut TypeRegistry, target: TypeKey, n: usize) -> Value {
    let mut level_type = registry
        .class(format!("Level0_{n}"))
        .field("target", target)
        .build()
        .unwrap();
    let mut value: Value = Object::new(level_type)
        .with("target", Object::new(target))
        .into();

    for i in 1..=n {
        let outer = registry
            .class(format!("Level{i}_{n}"))
            .field("next", level_type)
            .build()
            .unwrap();
        value = Object::new(outer).with("next", value).into();
        level_type = outer;
    }
    value
}

/// Action counting its invocations and answering `result`.
pub fn counting_action(counter: &Cell<usize>, result: bool) -> Action<'_> {
    Action::simple(move |_| {
        counter.set(counter.get() + 1);
        result
    })
}

/// Handler recording every event as a line of text.
#[derive(Default)]
pub struct RecordingHandler {
    pub lines: Mutex<Vec<String>>,
}

impl RecordingHandler {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.lines.lock().unwrap())
    }

    fn push(&self, line: String) {
        self.lines.lock().unwrap().push(line);
    }
}

impl SweepEventHandler for RecordingHandler {
    fn on_batch_started(&self, event: &BatchStartedEvent) {
        self.push(format!("started {} {}", event.operation, event.file_count));
    }

    fn on_file_skipped(&self, event: &FileSkippedEvent) {
        self.push(format!("skipped {}: {}", event.path, event.reason));
    }

    fn on_scene_opened(&self, event: &SceneOpenedEvent) {
        self.push(format!("scene {}", event.path));
    }

    fn on_value_processed(&self, event: &ValueProcessedEvent) {
        self.push(format!(
            "processed {:?} {:?} {:?} {}",
            event.file_path, event.hierarchy, event.field, event.value
        ));
    }

    fn on_asset_dirtied(&self, event: &AssetDirtiedEvent) {
        self.push(format!("dirty {}", event.target));
    }

    fn on_batch_complete(&self, event: &BatchCompleteEvent) {
        self.push(format!(
            "complete processed={} skipped={} values={} dirty={} errors={}",
            event.files_processed,
            event.files_skipped,
            event.values_processed,
            event.dirty_marks,
            event.errors
        ));
    }

    fn on_error(&self, event: &ErrorEvent) {
        self.push(format!("error {} {}", event.error_code, event.message));
    }
}
