//! Tests for the sweep error types.

use sweep_core::errors::*;

#[test]
fn test_all_errors_have_error_code() {
    let config = ConfigError::FileNotFound {
        path: "/tmp".into(),
    };
    assert_eq!(config.error_code(), "CONFIG_ERROR");

    let asset = AssetError::NotFound {
        path: "Assets/A.prefab".into(),
    };
    assert_eq!(asset.error_code(), "ASSET_NOT_FOUND");

    let scene = AssetError::SceneOpenFailed {
        path: "Assets/Main.unity".into(),
        message: "locked".into(),
    };
    assert_eq!(scene.error_code(), "SCENE_ERROR");

    let model = ModelError::UnknownType {
        name: "Widget".into(),
    };
    assert_eq!(model.error_code(), "MODEL_ERROR");
}

#[test]
fn test_from_conversions_keep_codes() {
    let batch: BatchError = AssetError::Unrecognized {
        path: "Assets/Tex.asset".into(),
        found: "Texture".into(),
    }
    .into();
    assert!(matches!(batch, BatchError::Asset(_)));
    assert_eq!(batch.error_code(), "ASSET_ERROR");

    let batch: BatchError = ConfigError::InvalidValue {
        field: "traversal.ignored_field_types".into(),
        message: "unknown".into(),
    }
    .into();
    assert_eq!(batch.error_code(), "CONFIG_ERROR");
}

#[test]
fn test_panic_payloads_become_messages() {
    let payload: Box<dyn std::any::Any + Send> = Box::new("boom");
    let err = BatchError::from_panic(payload.as_ref());
    assert_eq!(err.coded_string(), "[ACTION_PANICKED] Action panicked: boom");

    let payload: Box<dyn std::any::Any + Send> = Box::new(String::from("owned boom"));
    let err = BatchError::from_panic(payload.as_ref());
    assert!(matches!(err, BatchError::Panicked { ref message } if message == "owned boom"));

    let payload: Box<dyn std::any::Any + Send> = Box::new(42_u32);
    let err = BatchError::from_panic(payload.as_ref());
    assert!(matches!(err, BatchError::Panicked { .. }));
}

#[test]
fn test_asset_error_path_accessor() {
    let err = AssetError::SaveFailed {
        path: "Assets/B.prefab".into(),
        message: "read-only".into(),
    };
    assert_eq!(err.path(), "Assets/B.prefab");
}
