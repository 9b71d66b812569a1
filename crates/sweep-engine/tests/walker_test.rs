//! Object graph walker: matching, depth bound, list handling, idempotence.

mod common;

use std::cell::{Cell, RefCell};
use std::sync::Arc;

use common::{build_chain, counting_action, Fixture, RecordingHandler};
use proptest::prelude::*;
use sweep_core::events::EventDispatcher;
use sweep_engine::model::{Object, ObjectRef, TypeKey, TypeRegistry, Value};
use sweep_engine::policy::TraversalConfig;
use sweep_engine::traversal::{Action, TargetType, Traversal};

#[test]
fn test_graph_without_target_never_calls_action() {
    let fx = Fixture::new();
    let config = TraversalConfig::defaults(&fx.registry);
    let calls = Cell::new(0);

    let mut traversal = Traversal::new(
        &fx.registry,
        &config,
        TargetType::new(fx.dialogue_line),
        counting_action(&calls, true),
    );
    let mut value: Value = fx.health_object().into();
    assert!(!traversal.apply_to_fields(&mut value, config.max_nesting));
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_direct_field_found_with_minimal_budget() {
    let fx = Fixture::new();
    let config = TraversalConfig::defaults(&fx.registry);
    let calls = Cell::new(0);

    let mut traversal = Traversal::new(
        &fx.registry,
        &config,
        TargetType::new(fx.localized),
        counting_action(&calls, true),
    );
    let mut value = fx.text_holder_value("menu.title");
    assert!(traversal.apply_to_fields(&mut value, 1));
    assert_eq!(calls.get(), 1);
}

#[test]
fn test_depth_bound_is_exact() {
    for max in 1..=6usize {
        for n in 0..=7usize {
            let mut registry = TypeRegistry::new();
            let target = registry.class("Target").build().unwrap();
            let mut root = build_chain(&mut registry, target, n);
            let config = TraversalConfig::defaults(&registry).with_max_nesting(max);
            let calls = Cell::new(0);

            let found = {
                let mut traversal = Traversal::new(
                    &registry,
                    &config,
                    TargetType::new(target),
                    counting_action(&calls, true),
                );
                traversal.apply_to_fields(&mut root, max)
            };

            assert_eq!(found, n < max, "n={n} max={max}");
            assert_eq!(calls.get(), usize::from(n < max), "n={n} max={max}");
        }
    }
}

proptest! {
    #[test]
    fn prop_chain_found_iff_shallower_than_budget(n in 0usize..12, max in 1usize..12) {
        let mut registry = TypeRegistry::new();
        let target = registry.class("Target").build().unwrap();
        let mut root = build_chain(&mut registry, target, n);
        let config = TraversalConfig::defaults(&registry).with_max_nesting(max);
        let calls = Cell::new(0);

        let found = {
            let mut traversal = Traversal::new(
                &registry,
                &config,
                TargetType::new(target),
                counting_action(&calls, true),
            );
            traversal.apply_to_fields(&mut root, max)
        };

        prop_assert_eq!(found, n < max);
        prop_assert_eq!(calls.get() == 1, n < max);
    }
}

#[test]
fn test_nested_object_and_typed_list_are_visited() {
    let fx = Fixture::new();
    let config = TraversalConfig::defaults(&fx.registry);
    let keys = RefCell::new(Vec::new());

    let mut component: Value = Object::new(fx.dialogue)
        .with("line", fx.dialogue_line("intro"))
        .with(
            "lines",
            vec![fx.dialogue_line("a"), Value::Null, fx.dialogue_line("b")],
        )
        .into();

    let mut traversal = Traversal::new(
        &fx.registry,
        &config,
        TargetType::new(fx.localized),
        Action::detailed(|visit| {
            let key = visit
                .value
                .as_object()
                .and_then(|o| o.get("key"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            keys.borrow_mut().push((key, visit.field.map(|f| f.name.clone())));
            false
        }),
    );
    assert!(!traversal.apply_to_fields(&mut component, 10));
    drop(traversal);

    let keys = keys.into_inner();
    assert_eq!(
        keys,
        vec![
            ("intro".to_string(), Some("text".to_string())),
            ("a".to_string(), Some("text".to_string())),
            ("b".to_string(), Some("text".to_string())),
        ]
    );
}

#[test]
fn test_action_can_rewrite_value_in_place() {
    let fx = Fixture::new();
    let config = TraversalConfig::defaults(&fx.registry);
    let mut value = fx.text_holder_value("old.key");

    {
        let mut traversal = Traversal::new(
            &fx.registry,
            &config,
            TargetType::new(fx.localized),
            Action::simple(|v| match v.as_object_mut() {
                Some(obj) => {
                    obj.set("key", "new.key");
                    true
                }
                None => false,
            }),
        );
        assert!(traversal.apply_to_fields(&mut value, 10));
    }

    let text = value.as_object().unwrap().get("text").unwrap();
    assert_eq!(
        text.as_object().unwrap().get("key").and_then(Value::as_str),
        Some("new.key")
    );
}

#[test]
fn test_typed_list_elements_are_leaves_and_update_owner() {
    let fx = Fixture::new();
    let config = TraversalConfig::defaults(&fx.registry);
    let owners = RefCell::new(Vec::new());

    let mut menu: Value = Object::new(fx.menu)
        .with(
            "labels",
            vec![
                Value::from(
                    ObjectRef::new(fx.localized)
                        .in_asset("Assets/UI.prefab")
                        .on_node("Canvas ► Title"),
                ),
                Value::from(
                    ObjectRef::new(fx.localized)
                        .in_asset("Assets/UI.prefab")
                        .on_node("Canvas ► Footer"),
                ),
            ],
        )
        .into();

    let mut traversal = Traversal::new(
        &fx.registry,
        &config,
        TargetType::new(fx.localized),
        Action::detailed(|visit| {
            owners
                .borrow_mut()
                .push(visit.owner.map(|o| o.hierarchy.clone()));
            true
        }),
    );
    traversal.begin_file("Assets/UI.prefab");
    assert!(traversal.apply_to_fields(&mut menu, 10));

    let dirty = traversal.take_dirty();
    drop(traversal);

    assert_eq!(
        owners.into_inner(),
        vec![
            Some("Canvas ► Title".to_string()),
            Some("Canvas ► Footer".to_string())
        ]
    );
    assert_eq!(dirty.len(), 2);
}

#[test]
fn test_list_heuristic_judges_by_first_populated_element() {
    // The first non-null element is a string, so the whole list is skipped even
    // though a later element holds a target.
    let fx = Fixture::new();
    let config = TraversalConfig::defaults(&fx.registry);
    let calls = Cell::new(0);

    let mut component: Value = Object::new(fx.dialogue)
        .with(
            "extras",
            vec![Value::Null, Value::from("note"), fx.dialogue_line("hidden")],
        )
        .into();

    let mut traversal = Traversal::new(
        &fx.registry,
        &config,
        TargetType::new(fx.localized),
        counting_action(&calls, true),
    );
    assert!(!traversal.apply_to_fields(&mut component, 10));
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_list_heuristic_recurses_when_first_element_is_data() {
    let fx = Fixture::new();
    let config = TraversalConfig::defaults(&fx.registry);
    let calls = Cell::new(0);

    let mut component: Value = Object::new(fx.dialogue)
        .with(
            "extras",
            vec![fx.dialogue_line("shown"), Value::from("note"), fx.dialogue_line("also")],
        )
        .into();

    let mut traversal = Traversal::new(
        &fx.registry,
        &config,
        TargetType::new(fx.localized),
        counting_action(&calls, true),
    );
    assert!(traversal.apply_to_fields(&mut component, 10));
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_null_missing_and_empty_lists_are_skipped() {
    let fx = Fixture::new();
    let config = TraversalConfig::defaults(&fx.registry);
    let calls = Cell::new(0);

    let cases: Vec<(&str, Value)> = vec![
        ("typed list is null", Object::new(fx.menu).with("labels", Value::Null).into()),
        ("typed list is missing", Object::new(fx.menu).into()),
        ("data list is null", Object::new(fx.dialogue).with("lines", Value::Null).into()),
        ("mixed list is empty", Object::new(fx.dialogue).with("extras", Vec::<Value>::new()).into()),
        (
            "mixed list holds only nulls",
            Object::new(fx.dialogue)
                .with("extras", vec![Value::Null, Value::Null])
                .into(),
        ),
    ];

    for (case, mut value) in cases {
        let before = value.clone();
        let mut traversal = Traversal::new(
            &fx.registry,
            &config,
            TargetType::new(fx.localized),
            counting_action(&calls, true),
        );
        assert!(!traversal.apply_to_fields(&mut value, 10), "{case}");
        assert_eq!(calls.get(), 0, "{case}");
        assert_eq!(value, before, "{case}");
    }
}

#[test]
fn test_platform_object_fields_are_opaque() {
    let mut registry = TypeRegistry::new();
    let target = registry.class("Target").build().unwrap();
    let texture = registry
        .class("Texture")
        .extends(TypeKey::ENGINE_OBJECT)
        .field("inner", target)
        .build()
        .unwrap();
    let holder = registry
        .class("Holder")
        .field("texture", texture)
        .build()
        .unwrap();
    let config = TraversalConfig::defaults(&registry);
    let calls = Cell::new(0);

    let mut value: Value = Object::new(holder)
        .with("texture", Object::new(texture).with("inner", Object::new(target)))
        .into();
    let mut traversal = Traversal::new(
        &registry,
        &config,
        TargetType::new(target),
        counting_action(&calls, true),
    );
    assert!(!traversal.apply_to_fields(&mut value, 10));
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_repeat_run_with_rejecting_action_is_idempotent() {
    let fx = Fixture::new();
    let config = TraversalConfig::defaults(&fx.registry);
    let mut value: Value = Object::new(fx.dialogue)
        .with("line", fx.dialogue_line("x"))
        .into();

    let mut runs = Vec::new();
    for _ in 0..2 {
        let recorder = RecordingHandler::new();
        let mut events = EventDispatcher::new();
        events.register(Arc::clone(&recorder) as Arc<dyn sweep_core::events::SweepEventHandler>);
        let mut traversal = Traversal::with_events(
            &fx.registry,
            &config,
            TargetType::new(fx.localized),
            Action::simple(|_| false),
            events,
        );
        traversal.begin_file("Assets/Dialogue.asset");
        assert!(!traversal.apply_to_fields(&mut value, 10));
        assert!(traversal.take_dirty().is_empty());
        assert_eq!(traversal.stats().dirty_marks, 0);
        drop(traversal);
        runs.push(recorder.take());
    }
    assert_eq!(runs[0], runs[1]);
}
