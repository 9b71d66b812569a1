//! SweepErrorCode trait: stable codes for reports and host tooling.

/// Every error enum implements this to expose a structured code string.
pub trait SweepErrorCode {
    /// Returns the error code string (e.g., "ASSET_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const ASSET_ERROR: &str = "ASSET_ERROR";
pub const ASSET_NOT_FOUND: &str = "ASSET_NOT_FOUND";
pub const SCENE_ERROR: &str = "SCENE_ERROR";
pub const MODEL_ERROR: &str = "MODEL_ERROR";
pub const ACTION_PANICKED: &str = "ACTION_PANICKED";
