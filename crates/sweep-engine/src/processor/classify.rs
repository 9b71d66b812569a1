//! What a loaded file is, as far as a batch run cares.

use std::fmt;

use sweep_core::constants::ASSET_EXTENSION;

use crate::model::{MainAsset, PrefabAssetType};

/// Why a file was not traversed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Filtered out by extension or path substring.
    Ignored,
    /// `.asset` file whose main asset is not a data object.
    NonDataAsset,
    /// Hierarchy asset that is not a regular prefab or a variant.
    NotEditablePrefab(PrefabAssetType),
    /// The operation does not visit scenes.
    SceneNotVisited,
    /// Loaded, but not anything the engine knows how to walk.
    Unrecognized { found: String },
}

impl SkipReason {
    /// Only unrecognized assets are reported as errors.
    pub fn is_error(&self) -> bool {
        matches!(self, SkipReason::Unrecognized { .. })
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::Ignored => f.write_str("ignored by path filter"),
            SkipReason::NonDataAsset => f.write_str("asset file without a data object"),
            SkipReason::NotEditablePrefab(kind) => write!(f, "prefab type {kind:?} is not editable"),
            SkipReason::SceneNotVisited => f.write_str("scenes are not visited by this operation"),
            SkipReason::Unrecognized { found } => write!(f, "unrecognized asset ({found})"),
        }
    }
}

/// Classification of one loaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileClass {
    DataObject,
    HierarchyAsset(PrefabAssetType),
    SceneAsset,
    Skipped(SkipReason),
}

/// Classify the main asset loaded from `path`.
///
/// Scenes and data objects win over the extension check; any other asset in
/// an `.asset` file is skipped without complaint.
pub fn classify(path: &str, asset: &MainAsset) -> FileClass {
    match asset {
        MainAsset::Scene => FileClass::SceneAsset,
        MainAsset::Data(_) => FileClass::DataObject,
        _ if path.ends_with(ASSET_EXTENSION) => FileClass::Skipped(SkipReason::NonDataAsset),
        MainAsset::Hierarchy(hierarchy) => FileClass::HierarchyAsset(hierarchy.asset_type),
        MainAsset::Other { type_name } => FileClass::Skipped(SkipReason::Unrecognized {
            found: type_name.clone(),
        }),
    }
}
