//! Loaded assets as handed out by the asset database.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::hierarchy::HierarchyAsset;
use super::value::Value;

/// Main asset stored at a path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MainAsset {
    /// Standalone data object; the value is an `Object`.
    Data(Value),
    /// Prefab-like node tree.
    Hierarchy(HierarchyAsset),
    /// Scene marker. Scene contents are only reachable by opening the scene.
    Scene,
    /// Anything else (textures, fonts, audio, ...).
    Other { type_name: String },
}

impl MainAsset {
    pub fn kind_name(&self) -> &str {
        match self {
            MainAsset::Data(_) => "data object",
            MainAsset::Hierarchy(_) => "hierarchy asset",
            MainAsset::Scene => "scene",
            MainAsset::Other { type_name } => type_name,
        }
    }
}

/// Category of the asset currently being traversed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssetKind {
    Data,
    Hierarchy,
    Scene,
}

/// Opaque handle to the asset owning the current traversal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssetHandle {
    pub path: String,
    pub kind: AssetKind,
}

/// Something the persistence layer must rewrite.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DirtyTarget {
    /// A whole main asset.
    Asset { path: String },
    /// A component on a node inside an asset or scene.
    Component {
        asset_path: Option<String>,
        hierarchy: String,
        component_type: String,
    },
}

impl DirtyTarget {
    /// Asset the target lives in, when known.
    pub fn asset_path(&self) -> Option<&str> {
        match self {
            DirtyTarget::Asset { path } => Some(path),
            DirtyTarget::Component { asset_path, .. } => asset_path.as_deref(),
        }
    }
}

impl fmt::Display for DirtyTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirtyTarget::Asset { path } => f.write_str(path),
            DirtyTarget::Component {
                asset_path,
                hierarchy,
                component_type,
            } => {
                if let Some(path) = asset_path {
                    write!(f, "{path}: ")?;
                }
                write!(f, "{hierarchy} [{component_type}]")
            }
        }
    }
}
