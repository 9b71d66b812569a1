//! Type registry errors.

use super::error_code::{self, SweepErrorCode};

/// Errors raised while building or querying the type registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ModelError {
    #[error("Type `{name}` is already registered")]
    DuplicateType { name: String },

    #[error("Unknown type `{name}`")]
    UnknownType { name: String },

    #[error("Field `{field}` declared twice on `{type_name}`")]
    DuplicateField { type_name: String, field: String },
}

impl SweepErrorCode for ModelError {
    fn error_code(&self) -> &'static str {
        error_code::MODEL_ERROR
    }
}
