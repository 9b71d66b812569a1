//! Traversal engine: one instance per call, parameterized by the target type
//! and the caller's action.
//!
//! - [`walker`]: recursive field walk over object graphs, bounded by a
//!   nesting budget
//! - [`hierarchy`]: per-node walk choosing between the variant-aware and the
//!   unrestricted component loop
//! - [`context`]: cursor correlating visited values with file, owner, field
//! - [`action`]: the callback contract
//!
//! Dirty marks raised while walking are queued and drained by the caller with
//! [`Traversal::take_dirty`], so the walker never needs the backend.

pub mod action;
pub mod context;
pub mod hierarchy;
pub mod walker;

use sweep_core::errors::ModelError;
use sweep_core::events::types::AssetDirtiedEvent;
use sweep_core::events::EventDispatcher;
use sweep_core::types::FxHashSet;

use crate::model::{AssetHandle, DirtyTarget, TypeKey, TypeRegistry};
use crate::policy::TraversalConfig;
use crate::reflect::FieldReflector;

pub use action::{Action, Visit};
pub use context::{FieldCursor, OwnerNode, TraversalContext};

/// The type a run searches for.
///
/// Declared field types must equal it exactly. Attached components match when
/// their runtime type is the target or derives from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetType(TypeKey);

impl TargetType {
    pub fn new(key: TypeKey) -> Self {
        Self(key)
    }

    pub fn by_name(registry: &TypeRegistry, name: &str) -> Result<Self, ModelError> {
        registry.resolve(name).map(Self)
    }

    pub fn key(self) -> TypeKey {
        self.0
    }

    pub fn matches_field(self, field_type: TypeKey) -> bool {
        field_type == self.0
    }

    pub fn matches_component(self, registry: &TypeRegistry, runtime_type: TypeKey) -> bool {
        registry.is_assignable(runtime_type, self.0)
    }
}

/// Counters accumulated over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraversalStats {
    pub values_processed: usize,
    pub dirty_marks: usize,
}

/// Traversal engine for one run.
pub struct Traversal<'a> {
    registry: &'a TypeRegistry,
    config: &'a TraversalConfig,
    target: TargetType,
    action: Action<'a>,
    context: TraversalContext,
    reflector: FieldReflector,
    events: EventDispatcher,
    pending_dirty: Vec<DirtyTarget>,
    seen_dirty: FxHashSet<DirtyTarget>,
    stats: TraversalStats,
}

impl<'a> Traversal<'a> {
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
            registry,
            config,
            target,
            action,
            context: TraversalContext::new(),
            reflector: FieldReflector::new(config.ignored_base_types.clone()),
            events,
            pending_dirty: Vec::new(),
            seen_dirty: FxHashSet::default(),
            stats: TraversalStats::default(),
        }
    }

    pub fn registry(&self) -> &'a TypeRegistry {
        self.registry
    }

    pub fn config(&self) -> &'a TraversalConfig {
        self.config
    }

    pub fn target(&self) -> TargetType {
        self.target
    }

    pub fn context(&self) -> &TraversalContext {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut TraversalContext {
        &mut self.context
    }

    pub fn events(&self) -> &EventDispatcher {
        &self.events
    }

    pub fn stats(&self) -> TraversalStats {
        self.stats
    }

    /// Point the cursor at a new file.
    pub fn begin_file(&mut self, path: &str) {
        self.context.reset(path);
    }

    pub fn set_asset(&mut self, asset: AssetHandle) {
        self.context.set_asset(asset);
    }

    /// Queue a whole-asset dirty mark, honoring the run's mark-dirty flag.
    pub fn mark_asset_dirty(&mut self, path: &str) {
        self.mark_dirty(DirtyTarget::Asset {
            path: path.to_string(),
        });
    }

    /// Queue `target` once per run. No-op when dirty marking is disabled.
    pub(crate) fn mark_dirty(&mut self, target: DirtyTarget) {
        if !self.config.mark_dirty {
            return;
        }
        if !self.seen_dirty.insert(target.clone()) {
            return;
        }
        tracing::debug!(dirty = %target, "marked dirty");
        self.events.emit_asset_dirtied(&AssetDirtiedEvent {
            target: target.to_string(),
        });
        self.stats.dirty_marks += 1;
        self.pending_dirty.push(target);
    }

    /// Drain dirty marks queued since the last call.
    pub fn take_dirty(&mut self) -> Vec<DirtyTarget> {
        std::mem::take(&mut self.pending_dirty)
    }
}

impl std::fmt::Debug for Traversal<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Traversal")
            .field("target", &self.target)
            .field("action", &self.action)
            .field("context", &self.context)
            .field("stats", &self.stats)
            .finish()
    }
}
