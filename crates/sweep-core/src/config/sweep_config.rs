//! Top-level sweep configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{ScanConfig, TraversalSettings};
use crate::errors::ConfigError;

/// Project config file name, looked up in the project root.
pub const PROJECT_CONFIG_FILE: &str = "sweep.toml";

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`SWEEP_*`)
/// 3. Project config (`sweep.toml` in project root)
/// 4. User config (`~/.sweep/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SweepConfig {
    pub scan: ScanConfig,
    pub traversal: TraversalSettings,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub root: Option<String>,
    pub file_paths: Vec<String>,
    pub max_nesting: Option<u32>,
    pub mark_dirty: Option<bool>,
}

impl SweepConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(err @ ConfigError::ParseError { .. }) => return Err(err),
                    Err(err) => {
                        tracing::warn!(error = %err, "ignoring unreadable user config");
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &SweepConfig) -> Result<(), ConfigError> {
        if config.traversal.max_nesting == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "traversal.max_nesting".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if let Some(bad) = config
            .scan
            .allowed_extensions
            .iter()
            .find(|ext| !ext.starts_with('.'))
        {
            return Err(ConfigError::ValidationFailed {
                field: "scan.allowed_extensions".to_string(),
                message: format!("extension `{bad}` must start with '.'"),
            });
        }
        if config.scan.ignored_path_substrings.iter().any(String::is_empty) {
            return Err(ConfigError::ValidationFailed {
                field: "scan.ignored_path_substrings".to_string(),
                message: "empty substring would ignore every file".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the user config path: `~/.sweep/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".sweep").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored.
    fn merge_toml_file(config: &mut SweepConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: SweepConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it sets a value.
    fn merge(base: &mut SweepConfig, other: &SweepConfig) {
        // Scan
        if other.scan.root.is_some() {
            base.scan.root = other.scan.root.clone();
        }
        if !other.scan.file_paths.is_empty() {
            base.scan.file_paths = other.scan.file_paths.clone();
        }
        if !other.scan.allowed_extensions.is_empty() {
            base.scan.allowed_extensions = other.scan.allowed_extensions.clone();
        }
        if !other.scan.ignored_path_substrings.is_empty() {
            base.scan.ignored_path_substrings = other.scan.ignored_path_substrings.clone();
        }
        if !other.scan.excluded_file_masks.is_empty() {
            base.scan.excluded_file_masks = other.scan.excluded_file_masks.clone();
        }

        // Traversal
        if other.traversal.max_nesting.is_some() {
            base.traversal.max_nesting = other.traversal.max_nesting;
        }
        if other.traversal.mark_dirty.is_some() {
            base.traversal.mark_dirty = other.traversal.mark_dirty;
        }
        if !other.traversal.ignored_field_types.is_empty() {
            base.traversal.ignored_field_types = other.traversal.ignored_field_types.clone();
        }
        if !other.traversal.ignored_base_types.is_empty() {
            base.traversal.ignored_base_types = other.traversal.ignored_base_types.clone();
        }
        if other.traversal.object_base_type.is_some() {
            base.traversal.object_base_type = other.traversal.object_base_type.clone();
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `SWEEP_SCAN_ROOT`, `SWEEP_TRAVERSAL_MAX_NESTING`, `SWEEP_TRAVERSAL_MARK_DIRTY`.
    fn apply_env_overrides(config: &mut SweepConfig) {
        if let Ok(val) = std::env::var("SWEEP_SCAN_ROOT") {
            config.scan.root = Some(val);
        }
        if let Ok(val) = std::env::var("SWEEP_TRAVERSAL_MAX_NESTING") {
            if let Ok(v) = val.parse::<u32>() {
                config.traversal.max_nesting = Some(v);
            }
        }
        if let Ok(val) = std::env::var("SWEEP_TRAVERSAL_MARK_DIRTY") {
            if let Ok(v) = val.parse::<bool>() {
                config.traversal.mark_dirty = Some(v);
            }
        }
    }

    /// Apply CLI overrides (highest priority).
    fn apply_cli_overrides(config: &mut SweepConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.root {
            config.scan.root = Some(v.clone());
        }
        if !cli.file_paths.is_empty() {
            config.scan.file_paths = cli.file_paths.clone();
        }
        if let Some(v) = cli.max_nesting {
            config.traversal.max_nesting = Some(v);
        }
        if let Some(v) = cli.mark_dirty {
            config.traversal.mark_dirty = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
