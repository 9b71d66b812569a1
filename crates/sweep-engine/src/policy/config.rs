//! Per-run traversal configuration, resolved against a type registry.

use sweep_core::config::SweepConfig;
use sweep_core::constants;
use sweep_core::errors::ConfigError;
use sweep_core::types::FxHashSet;

use crate::model::{TypeKey, TypeRegistry};

/// Immutable configuration threaded through one traversal run.
#[derive(Debug, Clone)]
pub struct TraversalConfig {
    pub allowed_extensions: Vec<String>,
    pub ignored_path_substrings: Vec<String>,
    /// Field types never reflected into (exact match).
    pub ignored_field_types: FxHashSet<TypeKey>,
    /// Ancestors whose fields the reflector never collects.
    pub ignored_base_types: FxHashSet<TypeKey>,
    /// Opaque platform-object base; it and its subtypes are never reflected into.
    pub object_base_type: TypeKey,
    /// Nesting budget. Nested objects deeper than this are opaque.
    pub max_nesting: usize,
    pub mark_dirty: bool,
}

impl TraversalConfig {
    /// Compiled defaults, resolved against the builtin types of `registry`.
    pub fn defaults(registry: &TypeRegistry) -> Self {
        let keys = |names: &[&str]| -> FxHashSet<TypeKey> {
            names.iter().filter_map(|n| registry.lookup(n)).collect()
        };
        Self {
            allowed_extensions: to_strings(&constants::DEFAULT_ALLOWED_EXTENSIONS),
            ignored_path_substrings: to_strings(&constants::DEFAULT_IGNORED_PATH_SUBSTRINGS),
            ignored_field_types: keys(&constants::DEFAULT_IGNORED_FIELD_TYPES),
            ignored_base_types: keys(&constants::DEFAULT_IGNORED_BASE_TYPES),
            object_base_type: TypeKey::ENGINE_OBJECT,
            max_nesting: constants::DEFAULT_MAX_NESTING as usize,
            mark_dirty: constants::DEFAULT_MARK_DIRTY,
        }
    }

    /// Resolve a loaded [`SweepConfig`]. Type names must exist in `registry`.
    pub fn resolve(config: &SweepConfig, registry: &TypeRegistry) -> Result<Self, ConfigError> {
        let traversal = &config.traversal;
        let object_base_name = traversal.effective_object_base_type();

        Ok(Self {
            allowed_extensions: config.scan.effective_allowed_extensions(),
            ignored_path_substrings: config.scan.effective_ignored_path_substrings(),
            ignored_field_types: resolve_names(
                registry,
                "traversal.ignored_field_types",
                &traversal.effective_ignored_field_types(),
            )?,
            ignored_base_types: resolve_names(
                registry,
                "traversal.ignored_base_types",
                &traversal.effective_ignored_base_types(),
            )?,
            object_base_type: resolve_name(
                registry,
                "traversal.object_base_type",
                object_base_name,
            )?,
            max_nesting: traversal.effective_max_nesting() as usize,
            mark_dirty: traversal.effective_mark_dirty(),
        })
    }

    pub fn with_max_nesting(mut self, max_nesting: usize) -> Self {
        self.max_nesting = max_nesting;
        self
    }

    pub fn with_mark_dirty(mut self, mark_dirty: bool) -> Self {
        self.mark_dirty = mark_dirty;
        self
    }

    pub fn with_ignored_field_type(mut self, ty: TypeKey) -> Self {
        self.ignored_field_types.insert(ty);
        self
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn resolve_name(registry: &TypeRegistry, field: &str, name: &str) -> Result<TypeKey, ConfigError> {
    registry
        .lookup(name)
        .ok_or_else(|| ConfigError::InvalidValue {
            field: field.to_string(),
            message: format!("unknown type `{name}`"),
        })
}

fn resolve_names(
    registry: &TypeRegistry,
    field: &str,
    names: &[String],
) -> Result<FxHashSet<TypeKey>, ConfigError> {
    names
        .iter()
        .map(|name| resolve_name(registry, field, name))
        .collect()
}
