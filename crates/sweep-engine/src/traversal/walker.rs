//! Recursive field walk over object graphs.

use super::context::OwnerNode;
use super::Traversal;
use crate::model::{TypeKey, Value};
use crate::policy::{should_ignore_field_type, should_ignore_list};

impl Traversal<'_> {
    /// Visit every target-typed value reachable from `root` through fields.
    ///
    /// The budget drops by one on entry. Fields typed exactly as the target
    /// are always visited; everything else is only descended into while budget
    /// remains, so a value behind `n` nested objects is found iff
    /// `n < remaining_depth`. Deep data can therefore be missed silently.
    ///
    /// Returns whether any visit reported a change. Non-object roots return
    /// `false`.
    pub fn apply_to_fields(&mut self, root: &mut Value, remaining_depth: usize) -> bool {
        let Value::Object(object) = root else {
            return false;
        };

        let registry = self.registry;
        let depth = remaining_depth.saturating_sub(1);
        let fields = self.reflector.fields(registry, object.type_key());
        let mut applied = false;

        for field in fields.iter() {
            self.context
                .set_field(field, registry.name(field.declaring_type));

            if self.target.matches_field(field.field_type) {
                applied |= match field.get_mut(object) {
                    Some(slot) => self.perform_action(slot),
                    None => {
                        // Unset fields stay unset unless the action writes one.
                        let mut scratch = Value::Null;
                        let processed = self.perform_action(&mut scratch);
                        if !scratch.is_null() {
                            field.set(object, scratch);
                        }
                        processed
                    }
                };
                continue;
            }

            if depth == 0 {
                continue;
            }

            if should_ignore_field_type(
                registry,
                field.field_type,
                self.config.object_base_type,
                &self.config.ignored_field_types,
            ) {
                continue;
            }

            if let Some(element) = registry.list_element(field.field_type) {
                let Some(Value::List(items)) = field.get_mut(object) else {
                    continue;
                };

                if element == self.target.key() {
                    // Typed list elements are leaves.
                    for item in items.iter_mut() {
                        self.track_owner(item);
                        applied |= self.perform_action(item);
                    }
                    continue;
                }

                if items.is_empty()
                    || should_ignore_list(items.as_slice(), &self.config.ignored_field_types)
                {
                    continue;
                }
                for item in items.iter_mut() {
                    applied |= self.apply_to_fields(item, depth);
                }
                continue;
            }

            if let Some(nested) = field.get_mut(object) {
                applied |= self.apply_to_fields(nested, depth);
            }
        }

        self.context.clear_field();
        applied
    }

    /// A reference to an object living on a node becomes the current owner.
    fn track_owner(&mut self, item: &Value) {
        let Value::Ref(reference) = item else {
            return;
        };
        let Some(node_path) = &reference.node_path else {
            return;
        };
        let on_node = self
            .registry
            .is_assignable(reference.type_key, TypeKey::COMPONENT)
            || self.registry.is_assignable(reference.type_key, TypeKey::NODE);
        if on_node {
            self.context.set_owner(OwnerNode {
                hierarchy: node_path.clone(),
                component_type: self.registry.name(reference.type_key).to_string(),
            });
        }
    }
}
