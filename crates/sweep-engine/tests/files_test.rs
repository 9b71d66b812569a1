//! File discovery over a real directory tree.

use std::fs;
use std::path::Path;

use sweep_core::config::ScanConfig;
use sweep_core::errors::AssetError;
use sweep_engine::FilesMap;
use tempfile::TempDir;

fn touch(root: &Path, rel: &str) {
    let path = root.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, b"").unwrap();
}

fn project() -> TempDir {
    let dir = TempDir::new().unwrap();
    for rel in [
        "Assets/Prefabs/Hero.prefab",
        "Assets/Prefabs/Hero.prefab.meta",
        "Assets/Scenes/Main.unity",
        "Assets/Scripts/Hero.cs",
        "Assets/Shaders/Water.shader",
        "Assets/Data/Items.asset",
        "Assets/Data/Deep/Nested/Loot.asset",
    ] {
        touch(dir.path(), rel);
    }
    dir
}

fn relative(root: &Path, files: &[String]) -> Vec<String> {
    let prefix = format!("{}/", root.to_string_lossy().replace('\\', "/"));
    files
        .iter()
        .map(|f| f.strip_prefix(&prefix).unwrap_or(f).to_string())
        .collect()
}

#[test]
fn test_prepare_files_skips_meta_and_masks() {
    let dir = project();
    let root = dir.path().join("Assets");
    let root_str = root.to_string_lossy().to_string();

    let mut map = FilesMap::default();
    let files = map.prepare_files(Some(&root_str)).unwrap().to_vec();

    assert_eq!(
        relative(dir.path(), &files),
        vec![
            "Assets/Data/Deep/Nested/Loot.asset",
            "Assets/Data/Items.asset",
            "Assets/Prefabs/Hero.prefab",
            "Assets/Scenes/Main.unity",
        ]
    );
    assert_eq!(map.len(), 4);
    assert!(!map.is_empty());
}

#[test]
fn test_masks_come_from_scan_config() {
    let dir = project();
    let root = dir.path().join("Assets");
    let scan = ScanConfig {
        excluded_file_masks: vec!["Deep".to_string()],
        ..ScanConfig::default()
    };

    let mut map = FilesMap::from_config(&scan);
    let root_str = root.to_string_lossy().to_string();
    let files = map.prepare_files(Some(&root_str)).unwrap().to_vec();
    let files = relative(dir.path(), &files);

    assert!(files.contains(&"Assets/Scripts/Hero.cs".to_string()));
    assert!(!files.iter().any(|f| f.contains("Deep")));
    assert!(!files.iter().any(|f| f.ends_with(".meta")));
}

#[test]
fn test_missing_root_is_an_error() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("NoAssets");
    let mut map = FilesMap::default();

    let missing_str = missing.to_string_lossy().to_string();
    let err = map.prepare_files(Some(&missing_str)).unwrap_err();
    assert!(matches!(err, AssetError::NotFound { .. }));
    assert!(map.is_empty());
}
