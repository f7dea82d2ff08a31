//! Integration tests for ConfigManager and settings file handling
//!
//! These tests verify:
//! - Settings loading with and without a settings file
//! - Saving and reloading, including persisted parameter values
//! - Environment overrides
//! - Building a store from loaded settings

use camino::Utf8PathBuf;
use rebuildlab::config::SETTINGS_FILE;
use rebuildlab::models::{BUTTONS_PARAM, COLUMNS_PARAM};
use rebuildlab::{ConfigError, ConfigManager, LabSettings, ReactiveConfigStore};
use std::fs;
use tempfile::TempDir;

fn create_test_config_dir() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, config_path)
}

fn no_env() -> Option<config::Map<String, String>> {
    Some(config::Map::new())
}

#[test]
fn test_create_config_manager() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let nested = config_path.join("RebuildLab Data");
    let manager = ConfigManager::new(&nested).unwrap();

    assert!(nested.exists());
    assert_eq!(manager.config_dir(), &nested);
    assert_eq!(manager.settings_path(), nested.join(SETTINGS_FILE).as_path());
}

#[test]
fn test_load_default_settings() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let settings = manager.load_settings_with_env(no_env()).unwrap();

    assert_eq!(settings.log_dir, "logs");
    assert!(settings.persist_values);
    assert_eq!(settings.parameters[0].name, COLUMNS_PARAM);
    assert_eq!(settings.parameters[1].name, BUTTONS_PARAM);
}

#[test]
fn test_load_hand_written_settings() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let yaml = r#"
debug_mode: true
parameters:
  - name: Columns
    default: 4
    min: 1
  - name: Buttons
    default: 12
  - name: Initial
    default: 5
"#;
    fs::write(manager.settings_path(), yaml).unwrap();

    let settings = manager.load_settings_with_env(no_env()).unwrap();
    assert!(settings.debug_mode);
    assert_eq!(settings.parameters.len(), 3);
    assert_eq!(settings.parameters[0].min, Some(1));
    assert_eq!(settings.parameters[1].max, None);

    let store = ReactiveConfigStore::from_specs(settings.parameters).unwrap();
    assert_eq!(store.get_param("Initial"), Ok(5));
    assert_eq!(store.get_param(BUTTONS_PARAM), Ok(12));
}

#[test]
fn test_duplicate_parameters_in_file_fail_store_creation() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let yaml = "parameters:\n  - name: Columns\n    default: 1\n  - name: Columns\n    default: 2\n";
    fs::write(manager.settings_path(), yaml).unwrap();

    let settings = manager.load_settings_with_env(no_env()).unwrap();
    let err = ReactiveConfigStore::from_specs(settings.parameters).unwrap_err();
    assert_eq!(err, ConfigError::DuplicateParameter { name: "Columns".to_string() });
}

#[test]
fn test_committed_values_persist() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();

    let settings = manager.load_settings_with_env(no_env()).unwrap();
    let store = ReactiveConfigStore::from_specs(settings.parameters.clone()).unwrap();
    store.commit([(COLUMNS_PARAM, "5"), (BUTTONS_PARAM, "20")]).unwrap();

    manager
        .save_settings(&settings.with_current_values(&store.snapshot()))
        .unwrap();

    let reloaded = manager.load_settings_with_env(no_env()).unwrap();
    let store = ReactiveConfigStore::from_specs(reloaded.parameters).unwrap();
    assert_eq!(store.get_param(COLUMNS_PARAM), Ok(5));
    assert_eq!(store.get_param(BUTTONS_PARAM), Ok(20));
}

#[test]
fn test_environment_override() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();
    manager.save_settings(&LabSettings::default()).unwrap();

    let mut env = config::Map::new();
    env.insert("REBUILDLAB_DEBUG_MODE".to_string(), "true".to_string());
    env.insert("REBUILDLAB_LOG_DIR".to_string(), "elsewhere".to_string());

    let settings = manager.load_settings_with_env(Some(env)).unwrap();
    assert!(settings.debug_mode);
    assert_eq!(settings.log_dir, "elsewhere");
    assert_eq!(settings.parameters, LabSettings::default().parameters);
}

#[test]
fn test_invalid_yaml_is_an_error() {
    let (_temp_dir, config_path) = create_test_config_dir();
    let manager = ConfigManager::new(&config_path).unwrap();
    fs::write(manager.settings_path(), "parameters: [unclosed").unwrap();

    assert!(manager.load_settings_with_env(no_env()).is_err());
}
