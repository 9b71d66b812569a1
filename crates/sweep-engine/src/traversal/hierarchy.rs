//! Node tree walk for prefabs and scenes.

use super::Traversal;
use crate::model::{Component, Node};

impl Traversal<'_> {
    /// Walk `node` and its whole subtree.
    ///
    /// Both the node and its children are always visited; the results are
    /// OR-ed after the fact, so a match on the node never cuts the walk short.
    pub fn apply_to_node_and_descendants(&mut self, node: &mut Node) -> bool {
        self.context.push_node(&node.name);
        let on_node = self.apply_with_check(node);
        let below = self.apply_to_children(node);
        self.context.pop_node();
        on_node | below
    }

    fn apply_to_children(&mut self, node: &mut Node) -> bool {
        let mut applied = false;
        for child in node.children.iter_mut() {
            self.context.push_node(&child.name);
            let on_child = self.apply_with_check(child);
            let below = self.apply_to_children(child);
            self.context.pop_node();
            applied |= on_child | below;
        }
        applied
    }

    /// Outermost prefab instance roots with no recorded overrides only get
    /// their variant components visited.
    fn apply_with_check(&mut self, node: &mut Node) -> bool {
        let variant_only =
            node.is_outermost_prefab_instance_root() && !node.has_property_overrides();
        if variant_only {
            tracing::trace!(node = %node.name, "variant-aware component walk");
        }
        self.apply_to_components(node, variant_only)
    }

    fn apply_to_components(&mut self, node: &mut Node, variant_only: bool) -> bool {
        let max_nesting = self.config.max_nesting;
        let mut applied = false;

        for component in node.components.iter_mut().flatten() {
            if variant_only && !component.part_of_variant {
                continue;
            }

            self.enter_component(component);

            if self.is_target_component(component) {
                applied |= self.perform_action(&mut component.value);
            }
            applied |= self.apply_to_fields(&mut component.value, max_nesting);
        }

        applied
    }

    /// Visit every attached component assignable to the target in `node` and
    /// all of its descendants. Component fields are not searched.
    pub fn apply_to_components_in_children(&mut self, node: &mut Node) -> bool {
        self.context.push_node(&node.name);
        let mut applied = false;

        for component in node.components.iter_mut().flatten() {
            if !self.is_target_component(component) {
                continue;
            }
            self.enter_component(component);
            applied |= self.perform_action(&mut component.value);
        }
        for child in node.children.iter_mut() {
            applied |= self.apply_to_components_in_children(child);
        }

        self.context.pop_node();
        applied
    }

    fn is_target_component(&self, component: &Component) -> bool {
        component
            .type_key()
            .is_some_and(|ty| self.target.matches_component(self.registry, ty))
    }

    fn enter_component(&mut self, component: &Component) {
        let registry = self.registry;
        let type_name = match component.type_key() {
            Some(ty) => registry.name(ty),
            None => "<null>",
        };
        self.context.set_owner_component(type_name);
    }
}
