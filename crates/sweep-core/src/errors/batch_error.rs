//! Batch run errors.

use super::error_code::{self, SweepErrorCode};
use super::{AssetError, ConfigError, ModelError};

/// Errors that can occur during a batch run.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("Asset error: {0}")]
    Asset(#[from] AssetError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    #[error("Action panicked: {message}")]
    Panicked { message: String },
}

impl BatchError {
    /// Build a `Panicked` error from a `catch_unwind` payload.
    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        Self::Panicked { message }
    }
}

impl SweepErrorCode for BatchError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Asset(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Model(e) => e.error_code(),
            Self::Panicked { .. } => error_code::ACTION_PANICKED,
        }
    }
}
