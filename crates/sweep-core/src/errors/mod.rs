//! Error handling for the sweep engine.
//! One error enum per subsystem, `thiserror` only.

pub mod asset_error;
pub mod batch_error;
pub mod config_error;
pub mod error_code;
pub mod model_error;

pub use asset_error::AssetError;
pub use batch_error::BatchError;
pub use config_error::ConfigError;
pub use error_code::SweepErrorCode;
pub use model_error::ModelError;
