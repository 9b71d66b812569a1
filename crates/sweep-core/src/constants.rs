//! Shared constants for the asset sweep engine.

// ---- File extensions ----

/// Hierarchy asset (prefab) files.
pub const PREFAB_EXTENSION: &str = ".prefab";

/// Serialized data object files. Non-data assets with this extension are skipped.
pub const ASSET_EXTENSION: &str = ".asset";

/// Scene files.
pub const SCENE_EXTENSION: &str = ".unity";

/// Timeline/playable files.
pub const PLAYABLE_EXTENSION: &str = ".playable";

/// Sidecar metadata files, never scanned.
pub const META_EXTENSION: &str = ".meta";

/// Extensions scanned when the config does not say otherwise.
pub const DEFAULT_ALLOWED_EXTENSIONS: [&str; 4] = [
    PREFAB_EXTENSION,
    ASSET_EXTENSION,
    SCENE_EXTENSION,
    PLAYABLE_EXTENSION,
];

/// Path fragments that exclude a file even when its extension is allowed.
pub const DEFAULT_IGNORED_PATH_SUBSTRINGS: [&str; 3] = ["Lighting", "Fonts", "AddressableAssetsData"];

// ---- File discovery ----

/// Project folder walked when no explicit file list or directory is given.
pub const DEFAULT_ASSETS_ROOT: &str = "Assets/";

/// Path fragments excluded during discovery (scripts and shaders carry no assets).
pub const DEFAULT_EXCLUDED_FILE_MASKS: [&str; 2] = [".cs", ".shader"];

// ---- Traversal ----

/// Default nesting budget for the object graph walker.
pub const DEFAULT_MAX_NESTING: u32 = 10;

/// Mutated assets are marked dirty unless the run opts out.
pub const DEFAULT_MARK_DIRTY: bool = true;

/// Name of the opaque platform-object base type. Fields of this type (or any
/// subtype) are never reflected into.
pub const OBJECT_BASE_TYPE: &str = "EngineObject";

/// Field types never reflected into by default.
pub const DEFAULT_IGNORED_FIELD_TYPES: [&str; 4] = ["bool", "int", "float", "string"];

/// Ancestor types whose own fields are never collected.
pub const DEFAULT_IGNORED_BASE_TYPES: [&str; 6] = [
    "object",
    "EngineObject",
    "Node",
    "Component",
    "Behaviour",
    "DataObject",
];

// ---- Logging ----

/// Separator between node names in a hierarchy path.
pub const HIERARCHY_SEPARATOR: &str = " ► ";
