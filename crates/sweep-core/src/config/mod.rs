//! Configuration system for the sweep engine.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod scan_config;
pub mod sweep_config;
pub mod traversal_settings;

pub use scan_config::ScanConfig;
pub use sweep_config::{CliOverrides, SweepConfig};
pub use traversal_settings::TraversalSettings;
