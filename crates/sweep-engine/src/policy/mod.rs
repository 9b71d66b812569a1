//! Skip decisions for files, field types and heterogeneous lists.
//!
//! The predicates are pure. [`PathFilter`] is the precompiled form of
//! [`should_ignore_file`] used when many paths are checked against the same
//! configuration.

pub mod config;

use aho_corasick::AhoCorasick;
use sweep_core::types::FxHashSet;

use crate::model::{TypeKey, TypeRegistry, Value};

pub use config::TraversalConfig;

/// True when `path` must not be processed.
///
/// A path is kept only if it ends with one of `allowed_extensions` and contains
/// none of `ignored_substrings`.
pub fn should_ignore_file<S: AsRef<str>>(
    path: &str,
    allowed_extensions: &[S],
    ignored_substrings: &[S],
) -> bool {
    let allowed = allowed_extensions
        .iter()
        .any(|ext| path.ends_with(ext.as_ref()));
    if !allowed {
        return true;
    }
    ignored_substrings
        .iter()
        .any(|fragment| path.contains(fragment.as_ref()))
}

/// True when fields of `field_type` are never reflected into.
///
/// Platform objects (the opaque base type and everything deriving from it) are
/// handles, not data. Types in `ignored_types` match exactly.
pub fn should_ignore_field_type(
    registry: &TypeRegistry,
    field_type: TypeKey,
    object_base_type: TypeKey,
    ignored_types: &FxHashSet<TypeKey>,
) -> bool {
    registry.is_assignable(field_type, object_base_type) || ignored_types.contains(&field_type)
}

/// True when a heterogeneous list is not worth recursing into.
///
/// Only the first non-null element is sampled. Empty and all-null lists are
/// ignored. A mixed list is judged by its first populated entry alone.
pub fn should_ignore_list(items: &[Value], ignored_types: &FxHashSet<TypeKey>) -> bool {
    match items.iter().find_map(Value::runtime_type) {
        Some(first) => ignored_types.contains(&first),
        None => true,
    }
}

/// Compiled file filter. Agrees with [`should_ignore_file`] for every path.
#[derive(Debug, Clone)]
pub struct PathFilter {
    allowed_extensions: Vec<String>,
    ignored: Option<AhoCorasick>,
}

impl PathFilter {
    pub fn new(allowed_extensions: &[String], ignored_substrings: &[String]) -> Self {
        let patterns: Vec<&str> = ignored_substrings
            .iter()
            .map(String::as_str)
            .filter(|s| !s.is_empty())
            .collect();
        let ignored = if patterns.is_empty() {
            None
        } else {
            match AhoCorasick::new(&patterns) {
                Ok(matcher) => Some(matcher),
                Err(e) => {
                    tracing::warn!(error = %e, "failed to compile path filter; ignoring substrings");
                    None
                }
            }
        };
        // An empty substring matches every path.
        let ignore_all = ignored_substrings.iter().any(String::is_empty);
        Self {
            allowed_extensions: if ignore_all {
                Vec::new()
            } else {
                allowed_extensions.to_vec()
            },
            ignored,
        }
    }

    pub fn from_config(config: &TraversalConfig) -> Self {
        Self::new(&config.allowed_extensions, &config.ignored_path_substrings)
    }

    pub fn is_ignored(&self, path: &str) -> bool {
        if !self
            .allowed_extensions
            .iter()
            .any(|ext| path.ends_with(ext.as_str()))
        {
            return true;
        }
        self.ignored
            .as_ref()
            .is_some_and(|matcher| matcher.is_match(path))
    }
}
