//! Batch coordinator: iterates files, classifies them, dispatches to the
//! walkers, defers scenes and flushes dirty marks to the backend.

pub mod classify;
pub mod report;

use std::panic::{catch_unwind, resume_unwind, AssertUnwindSafe};
use std::time::Instant;

use sweep_core::errors::{AssetError, BatchError, SweepErrorCode};
use sweep_core::events::types::{
    BatchCompleteEvent, BatchStartedEvent, ErrorEvent, FileSkippedEvent, SceneOpenedEvent,
};
use sweep_core::events::EventDispatcher;

use crate::backend::EditorBackend;
use crate::model::{AssetHandle, AssetKind, MainAsset, TypeRegistry, Value};
use crate::policy::{PathFilter, TraversalConfig};
use crate::session::SafeEditingSession;
use crate::traversal::{Action, TargetType, Traversal};

pub use classify::{classify, FileClass, SkipReason};
pub use report::BatchReport;

const FULL_SUBTREE_OPERATION: &str = "update_components_in_all_prefabs";
const NOT_NESTED_OPERATION: &str = "update_not_nested_components_in_all_regular_prefabs";

/// Runs one batch operation over a list of files.
pub struct AssetsUpdateProcessor<'a> {
    traversal: Traversal<'a>,
    filter: PathFilter,
    scene_files: Vec<String>,
    report: BatchReport,
}

impl<'a> AssetsUpdateProcessor<'a> {
    pub fn new(
        registry: &'a TypeRegistry,
        config: &'a TraversalConfig,
        target: TargetType,
        action: Action<'a>,
    ) -> Self {
        Self::with_events(registry, config, target, action, EventDispatcher::new())
    }

    pub fn with_events(
        registry: &'a TypeRegistry,
        config: &'a TraversalConfig,
        target: TargetType,
        action: Action<'a>,
        events: EventDispatcher,
    ) -> Self {
        Self {
            traversal: Traversal::with_events(registry, config, target, action, events),
            filter: PathFilter::from_config(config),
            scene_files: Vec::new(),
            report: BatchReport::default(),
        }
    }

    /// Visit every target occurrence in data objects and in every component of
    /// every hierarchy asset. Scenes are not visited.
    pub fn update_components_in_all_prefabs<B>(mut self, backend: &mut B, files: &[String]) -> BatchReport
    where
        B: EditorBackend + ?Sized,
    {
        let started = Instant::now();
        self.begin(FULL_SUBTREE_OPERATION, files.len());

        let outcome = SafeEditingSession::new(&mut *backend).execute(|backend| {
            for path in files {
                self.contain_file(backend, |this, backend| {
                    this.process_full_subtree(backend, path)
                });
            }
            Ok(())
        });
        self.absorb(outcome);

        self.finish(started)
    }

    /// Variant-aware walk over regular prefabs and variants, data objects,
    /// then scenes in a second edit session. The active scene is restored
    /// afterwards when scene processing switched it.
    pub fn update_not_nested_components_in_all_regular_prefabs<B>(
        mut self,
        backend: &mut B,
        files: &[String],
    ) -> BatchReport
    where
        B: EditorBackend + ?Sized,
    {
        let started = Instant::now();
        self.begin(NOT_NESTED_OPERATION, files.len());

        let outcome = SafeEditingSession::new(&mut *backend).execute(|backend| {
            for path in files {
                self.contain_file(backend, |this, backend| {
                    this.process_not_nested(backend, path)
                });
            }
            Ok(())
        });
        self.absorb(outcome);

        if !self.scene_files.is_empty() {
            let start_scene = backend.active_scene_path();
            let scenes = std::mem::take(&mut self.scene_files);

            let outcome = SafeEditingSession::new(&mut *backend).execute(|backend| {
                for path in &scenes {
                    self.contain_file(backend, |this, backend| {
                        this.process_scene(backend, path)
                    })?;
                }
                Ok(())
            });
            self.absorb(outcome);

            self.restore_scene(backend, start_scene);
        }

        self.finish(started)
    }

    fn process_full_subtree<B: EditorBackend + ?Sized>(&mut self, backend: &mut B, path: &str) {
        if self.filter.is_ignored(path) {
            self.skip(path, SkipReason::Ignored);
            return;
        }

        self.traversal.begin_file(path);
        let asset = match backend.load_main_asset(path) {
            Ok(asset) => asset,
            Err(e) => {
                self.load_failed(e);
                return;
            }
        };

        match classify(path, asset) {
            FileClass::DataObject => {
                if let MainAsset::Data(value) = asset {
                    self.walk_data_object(path, value);
                }
            }
            FileClass::HierarchyAsset(_) => {
                if let MainAsset::Hierarchy(hierarchy) = asset {
                    self.traversal.set_asset(handle(path, AssetKind::Hierarchy));
                    self.traversal
                        .apply_to_components_in_children(&mut hierarchy.root);
                }
            }
            FileClass::SceneAsset => {
                self.skip(path, SkipReason::SceneNotVisited);
                return;
            }
            FileClass::Skipped(reason) => {
                self.skip(path, reason);
                return;
            }
        }

        self.report.files_processed += 1;
    }

    fn process_not_nested<B: EditorBackend + ?Sized>(&mut self, backend: &mut B, path: &str) {
        if self.filter.is_ignored(path) {
            self.skip(path, SkipReason::Ignored);
            return;
        }

        self.traversal.begin_file(path);
        let asset = match backend.load_main_asset(path) {
            Ok(asset) => asset,
            Err(e) => {
                self.load_failed(e);
                return;
            }
        };

        match classify(path, asset) {
            FileClass::SceneAsset => {
                tracing::debug!(path, "deferring scene");
                self.scene_files.push(path.to_string());
                return;
            }
            FileClass::DataObject => {
                if let MainAsset::Data(value) = asset {
                    self.walk_data_object(path, value);
                }
            }
            FileClass::HierarchyAsset(kind) if kind.is_editable() => {
                if let MainAsset::Hierarchy(hierarchy) = asset {
                    self.traversal.set_asset(handle(path, AssetKind::Hierarchy));
                    if self
                        .traversal
                        .apply_to_node_and_descendants(&mut hierarchy.root)
                    {
                        self.traversal.mark_asset_dirty(path);
                    }
                }
            }
            FileClass::HierarchyAsset(kind) => {
                self.skip(path, SkipReason::NotEditablePrefab(kind));
                return;
            }
            FileClass::Skipped(reason) => {
                self.skip(path, reason);
                return;
            }
        }

        self.report.files_processed += 1;
    }

    fn walk_data_object(&mut self, path: &str, value: &mut Value) {
        self.traversal.set_asset(handle(path, AssetKind::Data));
        let max_nesting = self.traversal.config().max_nesting;
        if self.traversal.apply_to_fields(value, max_nesting) {
            self.traversal.mark_asset_dirty(path);
        }
    }

    /// Walk every root of the scene at `path`; save it when anything applied.
    /// A scene that fails to open aborts the remaining scenes.
    fn process_scene<B: EditorBackend + ?Sized>(
        &mut self,
        backend: &mut B,
        path: &str,
    ) -> Result<(), BatchError> {
        self.traversal.begin_file(path);
        self.traversal.set_asset(handle(path, AssetKind::Scene));

        let scene = backend.open_scene(path)?;
        self.traversal.events().emit_scene_opened(&SceneOpenedEvent {
            path: path.to_string(),
        });
        tracing::debug!(path, roots = scene.roots.len(), "processing scene");

        let mut changed = false;
        for root in scene.roots.iter_mut() {
            changed |= self.traversal.apply_to_node_and_descendants(root);
        }
        self.report.scenes_processed += 1;

        self.flush_dirty(backend);
        if changed {
            backend.save_scene(path)?;
        }
        Ok(())
    }

    fn restore_scene<B: EditorBackend + ?Sized>(&mut self, backend: &mut B, start_scene: Option<String>) {
        let Some(start_scene) = start_scene else {
            return;
        };
        if backend.active_scene_path().as_deref() == Some(start_scene.as_str()) {
            return;
        }
        tracing::debug!(path = %start_scene, "restoring active scene");
        if let Err(e) = backend.open_scene(&start_scene) {
            tracing::error!(path = %start_scene, error = %e, "failed to restore active scene");
            self.record_error(e.into());
        }
    }

    /// Run one file's work, then forward its dirty marks to the backend.
    /// Marks raised before a panic are forwarded too; the panic then resumes
    /// so the session records it and still saves.
    fn contain_file<B, R>(
        &mut self,
        backend: &mut B,
        work: impl FnOnce(&mut Self, &mut B) -> R,
    ) -> R
    where
        B: EditorBackend + ?Sized,
    {
        let outcome = catch_unwind(AssertUnwindSafe(|| work(&mut *self, &mut *backend)));
        self.flush_dirty(backend);
        match outcome {
            Ok(result) => result,
            Err(payload) => resume_unwind(payload),
        }
    }

    fn flush_dirty<B: EditorBackend + ?Sized>(&mut self, backend: &mut B) {
        for target in self.traversal.take_dirty() {
            backend.set_dirty(target.clone());
            self.report.dirty.push(target);
        }
    }

    fn skip(&mut self, path: &str, reason: SkipReason) {
        if let SkipReason::Unrecognized { found } = &reason {
            tracing::error!(path, found = %found, "asset is not loaded as anything walkable");
            self.record_error(
                AssetError::Unrecognized {
                    path: path.to_string(),
                    found: found.clone(),
                }
                .into(),
            );
        } else {
            tracing::trace!(path, reason = %reason, "skipping file");
        }

        self.report.files_skipped += 1;
        self.traversal.events().emit_file_skipped(&FileSkippedEvent {
            path: path.to_string(),
            reason: reason.to_string(),
        });
    }

    fn load_failed(&mut self, error: AssetError) {
        tracing::error!(path = error.path(), error = %error, "failed to load asset");
        self.report.files_skipped += 1;
        self.record_error(error.into());
    }

    fn absorb(&mut self, outcome: Result<(), BatchError>) {
        if let Err(e) = outcome {
            self.record_error(e);
        }
    }

    fn record_error(&mut self, error: BatchError) {
        self.traversal.events().emit_error(&ErrorEvent {
            message: error.to_string(),
            error_code: error.error_code().to_string(),
        });
        self.report.add_error(error);
    }

    fn begin(&mut self, operation: &'static str, file_count: usize) {
        tracing::info!(operation, files = file_count, "batch started");
        self.report.operation = operation;
        self.traversal.events().emit_batch_started(&BatchStartedEvent {
            operation,
            file_count,
        });
    }

    fn finish(mut self, started: Instant) -> BatchReport {
        let stats = self.traversal.stats();
        self.report.values_processed = stats.values_processed;
        self.report.duration_ms = started.elapsed().as_millis() as u64;

        let report = &self.report;
        tracing::info!(
            operation = report.operation,
            processed = report.files_processed,
            skipped = report.files_skipped,
            scenes = report.scenes_processed,
            values = report.values_processed,
            dirty = report.dirty_marks(),
            errors = report.error_count(),
            duration_ms = report.duration_ms,
            "batch complete"
        );
        self.traversal.events().emit_batch_complete(&BatchCompleteEvent {
            files_processed: report.files_processed,
            files_skipped: report.files_skipped,
            values_processed: report.values_processed,
            dirty_marks: report.dirty_marks(),
            errors: report.error_count(),
            duration_ms: report.duration_ms,
        });

        self.report
    }
}

fn handle(path: &str, kind: AssetKind) -> AssetHandle {
    AssetHandle {
        path: path.to_string(),
        kind,
    }
}
