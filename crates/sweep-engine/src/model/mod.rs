//! Object model walked by the engine: type registry, values, hierarchy nodes
//! and loaded assets.

pub mod asset;
pub mod hierarchy;
pub mod registry;
pub mod value;

pub use asset::{AssetHandle, AssetKind, DirtyTarget, MainAsset};
pub use hierarchy::{
    Component, HierarchyAsset, Node, PrefabAssetType, PrefabInstance, PropertyModification,
    Scene,
};
pub use registry::{ClassBuilder, FieldDef, TypeDef, TypeKey, TypeKind, TypeRegistry};
pub use value::{Object, ObjectRef, Value};
