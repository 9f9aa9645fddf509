//! Unit tests for configuration resolution and graceful degradation
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate CREMA_CONFIG are marked with #[serial].

use crema_common::config::{
    load, load_toml_config, resolve_config_path, TomlConfig, CONFIG_ENV_VAR, MAX_TOAST_DURATION_MS,
};
use crema_common::{Error, Language};
use serial_test::serial;
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

fn write_config(dir: &TempDir, body: &str) -> PathBuf {
    let path = dir.path().join("config.toml");
    std::fs::write(&path, body).unwrap();
    path
}

#[test]
fn test_defaults() {
    let config = TomlConfig::default();
    assert_eq!(config.language, Language::SC);
    assert_eq!(config.toast_duration_ms, 3000);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.radar.size, 200.0);
    assert_eq!(config.radar.radius_ratio, 0.65);
    assert_eq!(config.radar.label_offset, 20.0);
    assert!(config.validate().is_ok());
}

#[test]
fn test_missing_file_uses_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config = load_toml_config(&temp_dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, TomlConfig::default());
}

#[test]
fn test_partial_file_keeps_other_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(
        &temp_dir,
        r#"
language = "EN"

[radar]
size = 320.0
"#,
    );

    let config = load_toml_config(&path).unwrap();
    assert_eq!(config.language, Language::EN);
    assert_eq!(config.radar.size, 320.0);
    assert_eq!(config.radar.radius_ratio, 0.65);
    assert_eq!(config.toast_duration_ms, 3000);
    assert_eq!(config.logging.level, "info");
}

#[test]
fn test_malformed_file_is_config_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "language = [not toml");
    assert!(matches!(load_toml_config(&path), Err(Error::Config(_))));
}

#[test]
fn test_invalid_radius_ratio_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "[radar]\nradius_ratio = 1.5\n");
    assert!(matches!(load_toml_config(&path), Err(Error::Config(_))));
}

#[test]
fn test_oversized_toast_duration_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "toast_duration_ms = 10000000000000000\n");
    assert!(matches!(load_toml_config(&path), Err(Error::Config(_))));

    let at_limit = TomlConfig {
        toast_duration_ms: MAX_TOAST_DURATION_MS,
        ..TomlConfig::default()
    };
    assert!(at_limit.validate().is_ok());

    let over_limit = TomlConfig {
        toast_duration_ms: MAX_TOAST_DURATION_MS + 1,
        ..TomlConfig::default()
    };
    assert!(matches!(over_limit.validate(), Err(Error::Config(_))));
}

#[test]
fn test_toast_duration() {
    let config = TomlConfig {
        toast_duration_ms: 1500,
        ..TomlConfig::default()
    };
    assert_eq!(config.toast_duration(), chrono::Duration::milliseconds(1500));
}

#[test]
#[serial]
fn test_cli_argument_beats_environment() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/crema-from-env.toml");
    let cli = PathBuf::from("/tmp/crema-from-cli.toml");
    assert_eq!(resolve_config_path(Some(&cli)), Some(cli.clone()));
    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_environment_variable_used_without_cli() {
    env::set_var(CONFIG_ENV_VAR, "/tmp/crema-from-env.toml");
    assert_eq!(
        resolve_config_path(None),
        Some(PathBuf::from("/tmp/crema-from-env.toml"))
    );
    env::remove_var(CONFIG_ENV_VAR);
}

#[test]
#[serial]
fn test_load_through_environment() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_config(&temp_dir, "toast_duration_ms = 500\n");
    env::set_var(CONFIG_ENV_VAR, &path);

    let config = load(None).unwrap();
    assert_eq!(config.toast_duration_ms, 500);

    env::remove_var(CONFIG_ENV_VAR);
}
