//! Configuration loading tests
//!
//! Each test uses its own environment prefix so parallel tests never see
//! each other's variables.

use cadence_cli::config::CliConfig;
use cadence_cli::CliError;
use cadence_playback::RepeatMode;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

// ===== Test Helpers =====

fn toml_file(contents: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// ===== Tests =====

#[test]
fn file_values_are_loaded() {
    let file = toml_file(
        r#"
catalog_path = "songs.json"
log_filter = "cadence=debug"

[playback]
shuffle = true
repeat = "one"
tick_interval_ms = 250
shuffle_seed = 42
"#,
    );

    let config = CliConfig::load_from(Some(file.path()), "CADENCE_TEST_FILE").unwrap();

    assert_eq!(config.catalog_path, PathBuf::from("songs.json"));
    assert_eq!(config.log_filter, "cadence=debug");
    assert!(config.playback.shuffle);
    assert_eq!(config.playback.repeat, RepeatMode::One);
    assert_eq!(config.playback.tick_interval_ms, 250);
    assert_eq!(config.playback.shuffle_seed, Some(42));
    // Unset keys keep their defaults
    assert_eq!(config.playback.restart_threshold_secs, 1.0);
    config.validate().unwrap();
}

#[test]
fn partial_file_falls_back_to_defaults() {
    let file = toml_file("[playback]\nrepeat = \"all\"\n");

    let config = CliConfig::load_from(Some(file.path()), "CADENCE_TEST_PARTIAL").unwrap();

    assert_eq!(config.catalog_path, PathBuf::from("catalog.json"));
    assert_eq!(config.playback.repeat, RepeatMode::All);
    assert!(!config.playback.shuffle);
    assert!(config.audio_root.is_none());
}

#[test]
fn environment_overrides_file() {
    let file = toml_file("catalog_path = \"from-file.json\"\n");
    std::env::set_var("CADENCE_TEST_ENV_CATALOG_PATH", "from-env.json");
    std::env::set_var("CADENCE_TEST_ENV_PLAYBACK__TICK_INTERVAL_MS", "500");

    let config = CliConfig::load_from(Some(file.path()), "CADENCE_TEST_ENV").unwrap();

    std::env::remove_var("CADENCE_TEST_ENV_CATALOG_PATH");
    std::env::remove_var("CADENCE_TEST_ENV_PLAYBACK__TICK_INTERVAL_MS");

    assert_eq!(config.catalog_path, PathBuf::from("from-env.json"));
    assert_eq!(config.playback.tick_interval_ms, 500);
}

#[test]
fn malformed_file_is_config_error() {
    let file = toml_file("[playback\nshuffle = ");

    let result = CliConfig::load_from(Some(file.path()), "CADENCE_TEST_BAD");

    assert!(matches!(result, Err(CliError::Config(_))));
}

#[test]
fn wrong_type_is_config_error() {
    let file = toml_file("[playback]\nrepeat = \"sometimes\"\n");

    let result = CliConfig::load_from(Some(file.path()), "CADENCE_TEST_TYPE");

    assert!(matches!(result, Err(CliError::Config(_))));
}

#[test]
fn missing_audio_root_fails_validation() {
    let file = toml_file("audio_root = \"/nonexistent/cadence/audio\"\n");

    let config = CliConfig::load_from(Some(file.path()), "CADENCE_TEST_ROOT").unwrap();

    assert!(matches!(config.validate(), Err(CliError::Config(msg)) if msg.contains("audio_root")));
}
