//! Integration tests for reading and writing config files

use detcanvas_settings::{Config, ConfigError, SettingsError};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_toml_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    let mut config = Config::new();
    config.viewport.zoom_step_percent = 20.0;
    config.layout.container_width = 1280.0;
    config.logging.json = true;
    config.save_to_file(&path).unwrap();

    let loaded = Config::load_from_file(&path).unwrap();
    assert_eq!(loaded, config);
}

#[test]
fn test_json_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    let mut config = Config::new();
    config.editor.handle_size_px = 16.0;
    config.save_to_file(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.contains("\"handle_size_px\": 16.0"));
    assert_eq!(Config::load_from_file(&path).unwrap(), config);
}

#[test]
fn test_load_rejects_invalid_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[editor]\nmin_box_percent = 0.0\n").unwrap();

    match Config::load_from_file(&path) {
        Err(SettingsError::Config(ConfigError::ValueOutOfRange { key, .. })) => {
            assert_eq!(key, "editor.min_box_percent");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_load_rejects_zoom_floor_below_fitted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[viewport]\nmin_zoom_percent = 50.0\n").unwrap();

    match Config::load_from_file(&path) {
        Err(SettingsError::Config(ConfigError::ValueOutOfRange { key, .. })) => {
            assert_eq!(key, "viewport.min_zoom_percent");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_load_missing_file() {
    let dir = TempDir::new().unwrap();
    let err = Config::load_from_file(&dir.path().join("absent.toml")).unwrap_err();
    assert!(matches!(err, SettingsError::LoadError { .. }));
}

#[test]
fn test_load_malformed_toml() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[viewport\nzoom = ").unwrap();
    assert!(matches!(
        Config::load_from_file(&path),
        Err(SettingsError::TomlError(_))
    ));
}

#[test]
fn test_unsupported_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.yaml");
    assert!(matches!(
        Config::new().save_to_file(&path),
        Err(SettingsError::Config(ConfigError::UnsupportedFormat(_)))
    ));
}

#[test]
fn test_load_or_default_with_explicit_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{"logging": {"level": "debug"}}"#).unwrap();

    let config = Config::load_or_default(Some(&path)).unwrap();
    assert_eq!(config.logging.level, "debug");
    assert!(!config.logging.json);
}
