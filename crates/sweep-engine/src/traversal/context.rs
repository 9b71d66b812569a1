//! Cursor state correlating each visited value with where it was found.

use std::fmt;

use sweep_core::constants::HIERARCHY_SEPARATOR;
use sweep_core::types::SmallVec8;

use crate::model::AssetHandle;
use crate::reflect::FieldDescriptor;

/// The node (and component on it) owning the value being visited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerNode {
    /// Node path from the hierarchy root, joined with ` ► `.
    pub hierarchy: String,
    pub component_type: String,
}

/// The field currently being inspected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCursor {
    pub name: String,
    pub declaring_type: String,
}

impl fmt::Display for FieldCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.declaring_type, self.name)
    }
}

/// Mutable traversal cursor. Reset at the start of every file.
#[derive(Debug, Default)]
pub struct TraversalContext {
    file_path: Option<String>,
    asset: Option<AssetHandle>,
    owner: Option<OwnerNode>,
    field: Option<FieldCursor>,
    hierarchy: SmallVec8<String>,
}

impl TraversalContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything from the previous file and point at `file_path`.
    pub fn reset(&mut self, file_path: &str) {
        self.file_path = Some(file_path.to_string());
        self.asset = None;
        self.owner = None;
        self.field = None;
        self.hierarchy.clear();
    }

    pub fn file_path(&self) -> Option<&str> {
        self.file_path.as_deref()
    }

    pub fn set_asset(&mut self, asset: AssetHandle) {
        self.asset = Some(asset);
    }

    pub fn asset(&self) -> Option<&AssetHandle> {
        self.asset.as_ref()
    }

    pub fn owner(&self) -> Option<&OwnerNode> {
        self.owner.as_ref()
    }

    pub fn set_owner(&mut self, owner: OwnerNode) {
        self.owner = Some(owner);
    }

    /// Owner becomes the component `component_type` on the current node.
    pub fn set_owner_component(&mut self, component_type: &str) {
        self.owner = Some(OwnerNode {
            hierarchy: self.hierarchy_path(),
            component_type: component_type.to_string(),
        });
    }

    pub fn field(&self) -> Option<&FieldCursor> {
        self.field.as_ref()
    }

    pub(crate) fn set_field(&mut self, descriptor: &FieldDescriptor, declaring_type: &str) {
        self.field = Some(FieldCursor {
            name: descriptor.name.clone(),
            declaring_type: declaring_type.to_string(),
        });
    }

    pub fn clear_field(&mut self) {
        self.field = None;
    }

    pub fn push_node(&mut self, name: &str) {
        self.hierarchy.push(name.to_string());
    }

    pub fn pop_node(&mut self) {
        self.hierarchy.pop();
    }

    pub fn depth_in_hierarchy(&self) -> usize {
        self.hierarchy.len()
    }

    pub fn hierarchy_path(&self) -> String {
        self.hierarchy.join(HIERARCHY_SEPARATOR)
    }
}
