// src/settings/tests.rs
//!
//! Tests for settings persistence
//!

use serde_json::json;
use tempfile::TempDir;

use super::*;

fn store_in(dir: &TempDir) -> SettingsStore {
    SettingsStore::new(Box::new(JsonFileBackend::new(dir.path().join("data.json"))))
}

fn persisted(dir: &TempDir) -> serde_json::Value {
    let raw = std::fs::read_to_string(dir.path().join("data.json")).unwrap();
    serde_json::from_str(&raw).unwrap()
}

#[test]
fn test_load_without_data_returns_defaults() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);

    assert_eq!(store.load().unwrap(), Settings { folder: "/".to_string() });
    assert!(!dir.path().join("data.json").exists());
}

#[test]
fn test_set_folder_survives_reload() {
    let dir = TempDir::new().unwrap();

    let store = store_in(&dir);
    store.load().unwrap();
    store.set_folder("notes/inbox").unwrap();
    assert_eq!(store.get().unwrap().folder, "notes/inbox");

    let fresh = store_in(&dir);
    assert_eq!(fresh.load().unwrap().folder, "notes/inbox");
}

#[test]
fn test_persisted_layout() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.set_folder("attachments").unwrap();

    assert_eq!(persisted(&dir), json!({ "folder": "attachments" }));
}

#[test]
fn test_missing_keys_fall_back_to_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("data.json"), "{}").unwrap();

    assert_eq!(store_in(&dir).load().unwrap().folder, DEFAULT_FOLDER);
}

#[test]
fn test_unknown_keys_are_ignored() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("data.json"),
        r#"{ "folder": "inbox", "legacyOption": true }"#,
    )
    .unwrap();

    assert_eq!(store_in(&dir).load().unwrap().folder, "inbox");
}

#[test]
fn test_null_record_means_defaults() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("data.json"), "null").unwrap();

    assert_eq!(store_in(&dir).load().unwrap(), Settings::default());
}

#[test]
fn test_malformed_record() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("data.json"), "{ not json").unwrap();
    let store = store_in(&dir);

    assert!(matches!(store.load(), Err(SettingsError::Malformed { .. })));
    assert_eq!(store.load_or_default(), Settings::default());
}

#[test]
fn test_wrong_shapes_are_malformed() {
    let dir = TempDir::new().unwrap();

    std::fs::write(dir.path().join("data.json"), "[1, 2]").unwrap();
    assert!(matches!(store_in(&dir).load(), Err(SettingsError::Malformed { .. })));

    std::fs::write(dir.path().join("data.json"), r#"{ "folder": 42 }"#).unwrap();
    assert!(matches!(store_in(&dir).load(), Err(SettingsError::Malformed { .. })));
}

#[test]
fn test_save_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let store = store_in(&dir);
    store.set_folder("inbox").unwrap();

    let first = std::fs::read(dir.path().join("data.json")).unwrap();
    store.save().unwrap();
    store.save().unwrap();
    let second = std::fs::read(dir.path().join("data.json")).unwrap();

    assert_eq!(first, second);
    // No staging files left next to the record
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn test_replace_overwrites_previous_record() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("data.json"),
        r#"{ "folder": "old", "stale": 1 }"#,
    )
    .unwrap();

    let store = store_in(&dir);
    store.load().unwrap();
    store
        .replace(Settings {
            folder: "new".to_string(),
        })
        .unwrap();

    assert_eq!(persisted(&dir), json!({ "folder": "new" }));
}

#[test]
fn test_settings_serialization() {
    let settings = Settings::default();
    assert_eq!(serde_json::to_value(&settings).unwrap(), json!({ "folder": "/" }));

    let parsed: Settings = serde_json::from_value(json!({})).unwrap();
    assert_eq!(parsed, settings);
}
