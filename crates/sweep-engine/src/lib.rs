//! # sweep-engine
//!
//! Batch asset mutation engine. Walks every reachable occurrence of a target
//! type across prefabs, scenes and data objects, hands each one to a caller
//! action, and tracks which assets must be persisted.
//!
//! Layering, leaf first:
//! - `model`: explicit type registry, runtime values, hierarchy nodes, assets
//! - `reflect`: flattened field descriptors per type
//! - `policy`: skip decisions and the resolved per-run configuration
//! - `traversal`: object graph walker, hierarchy walker, cursor context
//! - `backend`: asset database / scene manager / prefab factory seams
//! - `session`: scoped batch edit guard
//! - `files`: project file discovery
//! - `processor`: per-file classification and dispatch
//! - `updater`: public entry points

pub mod backend;
pub mod files;
pub mod model;
pub mod policy;
pub mod processor;
pub mod reflect;
pub mod session;
pub mod traversal;
pub mod updater;

pub use backend::{AssetDatabase, EditorBackend, InMemoryProject, PrefabFactory, SceneManager};
pub use files::FilesMap;
pub use policy::{PathFilter, TraversalConfig};
pub use processor::{AssetsUpdateProcessor, BatchReport};
pub use session::SafeEditingSession;
pub use traversal::{Action, TargetType, Traversal, TraversalContext, Visit};
pub use updater::{
    create_prefab_variant, update_components_in_all_prefabs,
    update_not_nested_components_in_all_regular_prefabs, UpdateParams,
};
