//! Public entry points.

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use sweep_core::config::ScanConfig;
use sweep_core::errors::{AssetError, BatchError};
use sweep_core::events::{EventDispatcher, SweepEventHandler};

use crate::backend::{AssetDatabase, EditorBackend, PrefabFactory};
use crate::files::FilesMap;
use crate::model::{Node, TypeRegistry};
use crate::policy::TraversalConfig;
use crate::processor::{AssetsUpdateProcessor, BatchReport};
use crate::traversal::{Action, TargetType};

/// Which files a run covers.
///
/// An explicit `file_paths` list wins. Otherwise `directory` (default
/// `Assets/`) is walked with [`FilesMap`], skipping `excluded_file_masks`
/// (the built-in masks when empty).
#[derive(Clone, Default)]
pub struct UpdateParams {
    pub file_paths: Option<Vec<String>>,
    pub directory: Option<String>,
    pub excluded_file_masks: Vec<String>,
    pub handlers: Vec<Arc<dyn SweepEventHandler>>,
}

impl std::fmt::Debug for UpdateParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateParams")
            .field("file_paths", &self.file_paths)
            .field("directory", &self.directory)
            .field("excluded_file_masks", &self.excluded_file_masks)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl UpdateParams {
    pub fn files(paths: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            file_paths: Some(paths.into_iter().map(Into::into).collect()),
            ..Self::default()
        }
    }

    pub fn directory(dir: impl Into<String>) -> Self {
        Self {
            directory: Some(dir.into()),
            ..Self::default()
        }
    }

    /// File selection from the `[scan]` config section.
    pub fn from_config(scan: &ScanConfig) -> Self {
        let file_paths = if scan.file_paths.is_empty() {
            None
        } else {
            Some(scan.file_paths.clone())
        };
        Self {
            file_paths,
            directory: Some(scan.effective_root().to_string()),
            excluded_file_masks: scan.effective_excluded_file_masks(),
            handlers: Vec::new(),
        }
    }

    pub fn with_handler(mut self, handler: Arc<dyn SweepEventHandler>) -> Self {
        self.handlers.push(handler);
        self
    }

    fn resolve_files(&self) -> Result<Vec<String>, AssetError> {
        if let Some(paths) = &self.file_paths {
            return Ok(paths.clone());
        }
        let mut files = if self.excluded_file_masks.is_empty() {
            FilesMap::default()
        } else {
            FilesMap::new(self.excluded_file_masks.clone())
        };
        files.prepare_files(self.directory.as_deref())?;
        Ok(files.all_files().to_vec())
    }

    fn dispatcher(&self) -> EventDispatcher {
        let mut events = EventDispatcher::new();
        for handler in &self.handlers {
            events.register(Arc::clone(handler));
        }
        events
    }
}

/// Visit every occurrence of `target` across full subtrees.
///
/// Data objects are field-walked; every component assignable to `target` on
/// any node of a hierarchy asset is handed to `action`. Scenes are skipped.
/// Values nested deeper than `config.max_nesting` are not found.
pub fn update_components_in_all_prefabs<B>(
    backend: &mut B,
    registry: &TypeRegistry,
    config: &TraversalConfig,
    target: TargetType,
    action: Action<'_>,
    params: &UpdateParams,
) -> BatchReport
where
    B: EditorBackend + ?Sized,
{
    let files = match params.resolve_files() {
        Ok(files) => files,
        Err(e) => return discovery_failed("update_components_in_all_prefabs", e),
    };
    AssetsUpdateProcessor::with_events(registry, config, target, action, params.dispatcher())
        .update_components_in_all_prefabs(backend, &files)
}

/// Visit occurrences not shadowed by overridden variant data, across regular
/// prefabs, variants and data objects, then across scenes.
///
/// Values nested deeper than `config.max_nesting` are not found.
pub fn update_not_nested_components_in_all_regular_prefabs<B>(
    backend: &mut B,
    registry: &TypeRegistry,
    config: &TraversalConfig,
    target: TargetType,
    action: Action<'_>,
    params: &UpdateParams,
) -> BatchReport
where
    B: EditorBackend + ?Sized,
{
    let files = match params.resolve_files() {
        Ok(files) => files,
        Err(e) => {
            return discovery_failed("update_not_nested_components_in_all_regular_prefabs", e)
        }
    };
    AssetsUpdateProcessor::with_events(registry, config, target, action, params.dispatcher())
        .update_not_nested_components_in_all_regular_prefabs(backend, &files)
}

fn discovery_failed(operation: &'static str, error: AssetError) -> BatchReport {
    tracing::error!(operation, error = %error, "file discovery failed");
    let mut report = BatchReport::new(operation);
    report.add_error(error.into());
    report
}

/// Instantiate the prefab at `from`, let `action_on_instance` edit the
/// instance, and save it as a variant at `to`.
///
/// A panicking action is logged and the instance is saved as it stands.
/// With `save_assets`, the backend saves and refreshes afterwards.
pub fn create_prefab_variant<B, F>(
    backend: &mut B,
    from: &str,
    to: &str,
    save_assets: bool,
    action_on_instance: Option<F>,
) -> Result<Node, BatchError>
where
    B: AssetDatabase + PrefabFactory + ?Sized,
    F: FnOnce(&mut Node),
{
    let mut instance = backend.instantiate_prefab(from)?;

    if let Some(action) = action_on_instance {
        if let Err(payload) = catch_unwind(AssertUnwindSafe(|| action(&mut instance))) {
            let err = BatchError::from_panic(&*payload);
            tracing::error!(from, error = %err, "prefab instance action failed");
        }
    }

    backend.save_as_prefab_variant(&instance, from, to)?;
    tracing::info!(from, to, "saved prefab variant");

    if save_assets {
        backend.save_assets();
        backend.refresh();
    }

    Ok(instance)
}
