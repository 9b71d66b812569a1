//! Object graph traversal settings, expressed with type names.
//!
//! The engine resolves these names against its type registry when a run is
//! configured; unknown names are reported as `ConfigError::InvalidValue`.

use serde::{Deserialize, Serialize};

use super::scan_config::or_defaults;
use crate::constants;

/// Settings for the field walker.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TraversalSettings {
    /// Nesting budget for the object graph walker. Default: 10.
    pub max_nesting: Option<u32>,
    /// Mark mutated assets and components dirty. Default: true.
    pub mark_dirty: Option<bool>,
    /// Field types never reflected into.
    pub ignored_field_types: Vec<String>,
    /// Ancestor types whose own fields are never collected.
    pub ignored_base_types: Vec<String>,
    /// Opaque platform-object base type. Default: `EngineObject`.
    pub object_base_type: Option<String>,
}

impl TraversalSettings {
    /// Returns the effective nesting budget, defaulting to 10.
    pub fn effective_max_nesting(&self) -> u32 {
        self.max_nesting.unwrap_or(constants::DEFAULT_MAX_NESTING)
    }

    /// Returns whether mutated assets are marked dirty, defaulting to true.
    pub fn effective_mark_dirty(&self) -> bool {
        self.mark_dirty.unwrap_or(constants::DEFAULT_MARK_DIRTY)
    }

    pub fn effective_ignored_field_types(&self) -> Vec<String> {
        or_defaults(&self.ignored_field_types, &constants::DEFAULT_IGNORED_FIELD_TYPES)
    }

    pub fn effective_ignored_base_types(&self) -> Vec<String> {
        or_defaults(&self.ignored_base_types, &constants::DEFAULT_IGNORED_BASE_TYPES)
    }

    pub fn effective_object_base_type(&self) -> &str {
        self.object_base_type
            .as_deref()
            .unwrap_or(constants::OBJECT_BASE_TYPE)
    }
}
