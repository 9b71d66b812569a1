//! Seams to the authoring environment: asset persistence, scenes, prefabs.
//!
//! The engine only talks to these traits. [`InMemoryProject`] implements all
//! of them for tests and tooling.

pub mod memory;

use sweep_core::errors::AssetError;

use crate::model::{DirtyTarget, MainAsset, Node, Scene};

pub use memory::{BackendCall, InMemoryProject};

/// Asset loading and persistence.
pub trait AssetDatabase {
    /// Load the main asset stored at `path`.
    fn load_main_asset(&mut self, path: &str) -> Result<&mut MainAsset, AssetError>;

    /// Record that `target` must be rewritten on the next save.
    fn set_dirty(&mut self, target: DirtyTarget);

    /// Begin a batched edit. Imports are deferred until the matching stop.
    fn start_asset_editing(&mut self);

    fn stop_asset_editing(&mut self);

    /// Write every dirty asset.
    fn save_assets(&mut self);

    /// Rebuild derived indexes after writes.
    fn refresh(&mut self);
}

/// Scene state. Opening a scene changes the active scene.
pub trait SceneManager {
    fn active_scene_path(&self) -> Option<String>;

    fn open_scene(&mut self, path: &str) -> Result<&mut Scene, AssetError>;

    fn save_scene(&mut self, path: &str) -> Result<(), AssetError>;
}

/// Prefab instantiation and variant creation.
pub trait PrefabFactory {
    /// Instantiate the hierarchy asset at `path` as an outermost instance root.
    fn instantiate_prefab(&mut self, path: &str) -> Result<Node, AssetError>;

    /// Save `instance` as a variant of `base_path` at `to`.
    fn save_as_prefab_variant(
        &mut self,
        instance: &Node,
        base_path: &str,
        to: &str,
    ) -> Result<(), AssetError>;
}

/// Everything a batch run needs.
pub trait EditorBackend: AssetDatabase + SceneManager {}

impl<T: AssetDatabase + SceneManager + ?Sized> EditorBackend for T {}
