//! Asset backend errors.

use super::error_code::{self, SweepErrorCode};

/// Errors reported by the asset database, scene manager and prefab factory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AssetError {
    #[error("No asset at path: {path}")]
    NotFound { path: String },

    #[error("Asset at {path} is not a hierarchy asset (found {found})")]
    Unrecognized { path: String, found: String },

    #[error("Failed to open scene {path}: {message}")]
    SceneOpenFailed { path: String, message: String },

    #[error("Failed to save {path}: {message}")]
    SaveFailed { path: String, message: String },

    #[error("Failed to instantiate prefab {path}: {message}")]
    InstantiateFailed { path: String, message: String },
}

impl AssetError {
    /// Path of the asset the error refers to.
    pub fn path(&self) -> &str {
        match self {
            Self::NotFound { path }
            | Self::Unrecognized { path, .. }
            | Self::SceneOpenFailed { path, .. }
            | Self::SaveFailed { path, .. }
            | Self::InstantiateFailed { path, .. } => path,
        }
    }
}

impl SweepErrorCode for AssetError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::ASSET_NOT_FOUND,
            Self::SceneOpenFailed { .. } => error_code::SCENE_ERROR,
            _ => error_code::ASSET_ERROR,
        }
    }
}
