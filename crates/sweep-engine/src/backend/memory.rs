//! In-memory project implementing every backend trait.
//!
//! Saves serialize dirty assets to JSON snapshots. Every trait call is
//! recorded so tests can assert on ordering (edit bracketing, saves, scene
//! switches).

use sweep_core::errors::AssetError;
use sweep_core::types::{FxHashMap, FxHashSet};

use super::{AssetDatabase, PrefabFactory, SceneManager};
use crate::model::{DirtyTarget, HierarchyAsset, MainAsset, Node, PrefabInstance, Scene};

/// A recorded backend call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    LoadMainAsset(String),
    SetDirty(DirtyTarget),
    StartAssetEditing,
    StopAssetEditing,
    SaveAssets,
    Refresh,
    OpenScene(String),
    SaveScene(String),
    InstantiatePrefab(String),
    SaveAsPrefabVariant { base: String, to: String },
}

#[derive(Debug, Default)]
pub struct InMemoryProject {
    assets: FxHashMap<String, MainAsset>,
    scenes: FxHashMap<String, Scene>,
    broken_scenes: FxHashSet<String>,
    active_scene: Option<String>,
    pending_dirty: Vec<DirtyTarget>,
    dirty_log: Vec<DirtyTarget>,
    snapshots: FxHashMap<String, String>,
    calls: Vec<BackendCall>,
    editing_depth: usize,
}

impl InMemoryProject {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_asset(mut self, path: impl Into<String>, asset: MainAsset) -> Self {
        self.insert_asset(path, asset);
        self
    }

    /// Register a scene file; it loads as a scene marker and opens as `scene`.
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.assets.insert(scene.path.clone(), MainAsset::Scene);
        self.scenes.insert(scene.path.clone(), scene);
        self
    }

    pub fn with_active_scene(mut self, path: impl Into<String>) -> Self {
        self.active_scene = Some(path.into());
        self
    }

    /// A scene that loads as a marker but fails to open.
    pub fn with_broken_scene(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.assets.insert(path.clone(), MainAsset::Scene);
        self.broken_scenes.insert(path);
        self
    }

    pub fn insert_asset(&mut self, path: impl Into<String>, asset: MainAsset) {
        self.assets.insert(path.into(), asset);
    }

    pub fn asset(&self, path: &str) -> Option<&MainAsset> {
        self.assets.get(path)
    }

    pub fn scene(&self, path: &str) -> Option<&Scene> {
        self.scenes.get(path)
    }

    /// JSON written by the last save of `path`.
    pub fn snapshot(&self, path: &str) -> Option<&str> {
        self.snapshots.get(path).map(String::as_str)
    }

    /// Paths with a saved snapshot, sorted.
    pub fn saved_paths(&self) -> Vec<&str> {
        let mut paths: Vec<&str> = self.snapshots.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Every dirty mark received, in order.
    pub fn dirty_log(&self) -> &[DirtyTarget] {
        &self.dirty_log
    }

    pub fn is_editing(&self) -> bool {
        self.editing_depth > 0
    }

    fn snapshot_asset(&mut self, path: &str) {
        let Some(asset) = self.assets.get(path) else {
            return;
        };
        match serde_json::to_string_pretty(asset) {
            Ok(json) => {
                self.snapshots.insert(path.to_string(), json);
            }
            Err(e) => tracing::error!(path, error = %e, "failed to serialize asset"),
        }
    }
}

impl AssetDatabase for InMemoryProject {
    fn load_main_asset(&mut self, path: &str) -> Result<&mut MainAsset, AssetError> {
        self.calls.push(BackendCall::LoadMainAsset(path.to_string()));
        self.assets.get_mut(path).ok_or_else(|| AssetError::NotFound {
            path: path.to_string(),
        })
    }

    fn set_dirty(&mut self, target: DirtyTarget) {
        self.calls.push(BackendCall::SetDirty(target.clone()));
        self.dirty_log.push(target.clone());
        if !self.pending_dirty.contains(&target) {
            self.pending_dirty.push(target);
        }
    }

    fn start_asset_editing(&mut self) {
        self.calls.push(BackendCall::StartAssetEditing);
        self.editing_depth += 1;
    }

    fn stop_asset_editing(&mut self) {
        self.calls.push(BackendCall::StopAssetEditing);
        self.editing_depth = self.editing_depth.saturating_sub(1);
    }

    fn save_assets(&mut self) {
        self.calls.push(BackendCall::SaveAssets);
        let pending = std::mem::take(&mut self.pending_dirty);
        let mut paths: Vec<String> = pending
            .iter()
            .filter_map(DirtyTarget::asset_path)
            .filter(|path| !self.scenes.contains_key(*path))
            .map(str::to_string)
            .collect();
        paths.sort_unstable();
        paths.dedup();
        for path in paths {
            self.snapshot_asset(&path);
        }
    }

    fn refresh(&mut self) {
        self.calls.push(BackendCall::Refresh);
    }
}

impl SceneManager for InMemoryProject {
    fn active_scene_path(&self) -> Option<String> {
        self.active_scene.clone()
    }

    fn open_scene(&mut self, path: &str) -> Result<&mut Scene, AssetError> {
        self.calls.push(BackendCall::OpenScene(path.to_string()));
        if self.broken_scenes.contains(path) {
            return Err(AssetError::SceneOpenFailed {
                path: path.to_string(),
                message: "scene file is corrupted".to_string(),
            });
        }
        if !self.scenes.contains_key(path) {
            return Err(AssetError::SceneOpenFailed {
                path: path.to_string(),
                message: "no such scene".to_string(),
            });
        }
        self.active_scene = Some(path.to_string());
        self.scenes
            .get_mut(path)
            .ok_or_else(|| AssetError::NotFound {
                path: path.to_string(),
            })
    }

    fn save_scene(&mut self, path: &str) -> Result<(), AssetError> {
        self.calls.push(BackendCall::SaveScene(path.to_string()));
        let scene = self.scenes.get(path).ok_or_else(|| AssetError::NotFound {
            path: path.to_string(),
        })?;
        let json = serde_json::to_string_pretty(scene).map_err(|e| AssetError::SaveFailed {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        self.snapshots.insert(path.to_string(), json);
        Ok(())
    }
}

impl PrefabFactory for InMemoryProject {
    fn instantiate_prefab(&mut self, path: &str) -> Result<Node, AssetError> {
        self.calls
            .push(BackendCall::InstantiatePrefab(path.to_string()));
        match self.assets.get(path) {
            Some(MainAsset::Hierarchy(prefab)) => {
                let mut instance = prefab.root.clone();
                instance.prefab = Some(PrefabInstance {
                    outermost_root: true,
                    source: Some(path.to_string()),
                    property_modifications: Vec::new(),
                });
                Ok(instance)
            }
            Some(other) => Err(AssetError::InstantiateFailed {
                path: path.to_string(),
                message: format!("{} is not a prefab", other.kind_name()),
            }),
            None => Err(AssetError::NotFound {
                path: path.to_string(),
            }),
        }
    }

    fn save_as_prefab_variant(
        &mut self,
        instance: &Node,
        base_path: &str,
        to: &str,
    ) -> Result<(), AssetError> {
        self.calls.push(BackendCall::SaveAsPrefabVariant {
            base: base_path.to_string(),
            to: to.to_string(),
        });
        match self.assets.get(base_path) {
            Some(MainAsset::Hierarchy(_)) => {}
            Some(other) => {
                return Err(AssetError::Unrecognized {
                    path: base_path.to_string(),
                    found: other.kind_name().to_string(),
                })
            }
            None => {
                return Err(AssetError::NotFound {
                    path: base_path.to_string(),
                })
            }
        }

        let mut root = instance.clone();
        root.prefab = None;
        self.assets.insert(
            to.to_string(),
            MainAsset::Hierarchy(HierarchyAsset::variant(root)),
        );
        self.snapshot_asset(to);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Object, TypeKey, Value};

    #[test]
    fn test_save_writes_only_dirty_assets() {
        let mut project = InMemoryProject::new()
            .with_asset("Assets/A.asset", MainAsset::Data(Object::new(TypeKey::DATA_OBJECT).into()))
            .with_asset("Assets/B.asset", MainAsset::Data(Value::Null));

        project.set_dirty(DirtyTarget::Asset {
            path: "Assets/A.asset".into(),
        });
        project.save_assets();

        assert_eq!(project.saved_paths(), vec!["Assets/A.asset"]);
        assert!(project.snapshot("Assets/A.asset").unwrap().contains("Data"));

        // Dirty marks are consumed by the save.
        project.save_assets();
        assert_eq!(project.saved_paths().len(), 1);
    }

    #[test]
    fn test_edit_bracketing_is_tracked() {
        let mut project = InMemoryProject::new();
        assert!(!project.is_editing());
        project.start_asset_editing();
        assert!(project.is_editing());
        project.stop_asset_editing();
        assert!(!project.is_editing());
        assert_eq!(
            project.calls(),
            &[BackendCall::StartAssetEditing, BackendCall::StopAssetEditing]
        );
    }

    #[test]
    fn test_open_scene_switches_active_scene() {
        let mut project = InMemoryProject::new()
            .with_scene(Scene::new("Assets/Main.unity"))
            .with_broken_scene("Assets/Broken.unity");

        assert!(project.open_scene("Assets/Main.unity").is_ok());
        assert_eq!(project.active_scene_path().as_deref(), Some("Assets/Main.unity"));
        assert!(matches!(
            project.open_scene("Assets/Broken.unity"),
            Err(AssetError::SceneOpenFailed { .. })
        ));
        assert_eq!(project.active_scene_path().as_deref(), Some("Assets/Main.unity"));
    }

    #[test]
    fn test_instantiate_marks_outermost_root() {
        let mut project = InMemoryProject::new()
            .with_asset("Assets/Hero.prefab", MainAsset::Hierarchy(HierarchyAsset::regular(Node::new("Hero"))));
        let instance = project.instantiate_prefab("Assets/Hero.prefab").unwrap();
        assert!(instance.is_outermost_prefab_instance_root());
        assert_eq!(
            instance.prefab.unwrap().source.as_deref(),
            Some("Assets/Hero.prefab")
        );
        assert!(project.instantiate_prefab("Assets/None.prefab").is_err());
    }
}
