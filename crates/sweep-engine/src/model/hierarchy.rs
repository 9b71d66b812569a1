//! Scene and prefab hierarchy model: nodes, attached components, prefab
//! instance data.

use serde::{Deserialize, Serialize};

use super::registry::TypeKey;
use super::value::{Object, Value};

/// A component attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Component data; always an `Object` when built through the constructors.
    pub value: Value,
    /// Whether the component is part of a prefab variant.
    pub part_of_variant: bool,
}

impl Component {
    pub fn new(object: Object) -> Self {
        Self {
            value: Value::Object(object),
            part_of_variant: false,
        }
    }

    /// A component flagged as belonging to a variant prefab.
    pub fn variant(object: Object) -> Self {
        Self {
            value: Value::Object(object),
            part_of_variant: true,
        }
    }

    pub fn type_key(&self) -> Option<TypeKey> {
        self.value.runtime_type()
    }
}

/// A single recorded property override on a prefab instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyModification {
    pub target: String,
    pub property_path: String,
    pub value: String,
}

/// Prefab instance data carried by a node that instantiates a prefab.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PrefabInstance {
    /// Top-level node of the instance, as opposed to a nested sub-instance.
    pub outermost_root: bool,
    /// Path of the prefab asset the instance was made from.
    pub source: Option<String>,
    pub property_modifications: Vec<PropertyModification>,
}

/// A node in a prefab or scene hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    /// Attached components; `None` is a missing (unloadable) component.
    pub components: Vec<Option<Component>>,
    pub children: Vec<Node>,
    pub prefab: Option<PrefabInstance>,
}

impl Node {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            components: Vec::new(),
            children: Vec::new(),
            prefab: None,
        }
    }

    pub fn with_component(mut self, component: Component) -> Self {
        self.components.push(Some(component));
        self
    }

    pub fn with_missing_component(mut self) -> Self {
        self.components.push(None);
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_prefab(mut self, prefab: PrefabInstance) -> Self {
        self.prefab = Some(prefab);
        self
    }

    pub fn is_outermost_prefab_instance_root(&self) -> bool {
        self.prefab.as_ref().is_some_and(|p| p.outermost_root)
    }

    /// True when the node carries at least one recorded property modification.
    pub fn has_property_overrides(&self) -> bool {
        self.prefab
            .as_ref()
            .is_some_and(|p| !p.property_modifications.is_empty())
    }
}

/// How a hierarchy asset relates to prefabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrefabAssetType {
    NotAPrefab,
    Regular,
    Model,
    Variant,
    MissingAsset,
}

impl PrefabAssetType {
    /// Regular prefabs and variants are the only editable prefab assets.
    pub fn is_editable(self) -> bool {
        matches!(self, PrefabAssetType::Regular | PrefabAssetType::Variant)
    }
}

/// A serialized node tree stored as a single asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HierarchyAsset {
    pub root: Node,
    pub asset_type: PrefabAssetType,
}

impl HierarchyAsset {
    pub fn regular(root: Node) -> Self {
        Self {
            root,
            asset_type: PrefabAssetType::Regular,
        }
    }

    pub fn variant(root: Node) -> Self {
        Self {
            root,
            asset_type: PrefabAssetType::Variant,
        }
    }
}

/// An opened scene: a list of root nodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub path: String,
    pub roots: Vec<Node>,
}

impl Scene {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            roots: Vec::new(),
        }
    }

    pub fn with_root(mut self, root: Node) -> Self {
        self.roots.push(root);
        self
    }
}
