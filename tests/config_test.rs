//! Configuration loading tests
//!
//! Tests that screen reader configuration loads from disk and provides
//! expected default values

use game_screen_reader::config::DEFAULT_ANDROID_PACKAGE;
use game_screen_reader::Config;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_missing_file_created_with_defaults() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("reader.cfg");

    let config = Config::load_from(&path).expect("Failed to load config");

    assert!(path.exists());
    assert_eq!(config.path(), Some(path.as_path()));
    assert!(config.enabled());
    assert_eq!(config.android_package(), DEFAULT_ANDROID_PACKAGE);

    let written = fs::read_to_string(&path).unwrap();
    assert!(written.contains("[screen_reader]"));
    assert!(written.contains("enabled=true"));
}

#[test]
fn test_existing_file_values() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("reader.cfg");
    fs::write(
        &path,
        "[screen_reader]\nenabled=false\n\n[speech]\nrate=70\nvolume=40\nvoice_idx=2\ninterrupt=true\n\n[android]\npackage=com.example.rpg\n",
    )
    .unwrap();

    let config = Config::load_from(&path).expect("Failed to load config");

    assert!(!config.enabled());
    assert_eq!(config.rate(), Some(70));
    assert_eq!(config.volume(), Some(40));
    assert_eq!(config.voice_idx(), Some(2));
    assert!(config.interrupt());
    assert_eq!(config.android_package(), "com/example/rpg");
}

#[test]
fn test_save_and_reload() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("reader.cfg");

    let mut config = Config::load_from(&path).expect("Failed to load config");
    config.set("speech", "rate", "30");
    config.save().expect("Failed to save config");

    let reloaded = Config::load_from(&path).expect("Failed to reload config");
    assert_eq!(reloaded.rate(), Some(30));
}

#[test]
fn test_malformed_file_is_error() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("reader.cfg");
    fs::write(&path, "[speech\nrate=10\n").unwrap();

    assert!(Config::load_from(&path).is_err());
}
