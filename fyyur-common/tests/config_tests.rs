//! Configuration loading and root folder resolution
//!
//! Tests touching FYYUR_ROOT_FOLDER are marked #[serial] so they never race
//! on the process environment.

use fyyur_common::config::{
    database_path, default_root_folder, load_toml_config, resolve_root_folder, TomlConfig,
    ROOT_FOLDER_ENV,
};
use fyyur_common::{AreaGrouping, Error};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn toml_with_root(root: &str) -> TomlConfig {
    TomlConfig {
        root_folder: Some(PathBuf::from(root)),
        ..Default::default()
    }
}

#[test]
#[serial]
fn test_cli_argument_wins() {
    env::set_var(ROOT_FOLDER_ENV, "/from/env");

    let root = resolve_root_folder(
        Some(Path::new("/from/cli")),
        ROOT_FOLDER_ENV,
        &toml_with_root("/from/toml"),
    );

    assert_eq!(root, PathBuf::from("/from/cli"));
    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_env_beats_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/from/env");

    let root = resolve_root_folder(None, ROOT_FOLDER_ENV, &toml_with_root("/from/toml"));

    assert_eq!(root, PathBuf::from("/from/env"));
    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_toml_beats_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let root = resolve_root_folder(None, ROOT_FOLDER_ENV, &toml_with_root("/from/toml"));

    assert_eq!(root, PathBuf::from("/from/toml"));
}

#[test]
#[serial]
fn test_falls_back_to_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let root = resolve_root_folder(None, ROOT_FOLDER_ENV, &TomlConfig::default());

    assert_eq!(root, default_root_folder());
    assert!(root.ends_with("fyyur") || root.ends_with("fyyur_data"));
}

#[test]
fn test_load_explicit_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "root_folder = \"/srv/fyyur\"\nport = 8081\nvenue_grouping = \"city_state\"\n",
    )
    .unwrap();

    let loaded = load_toml_config(Some(path.as_path())).unwrap();
    let config = loaded.config;

    assert_eq!(loaded.source.as_deref(), Some(path.as_path()));

    assert_eq!(config.port, Some(8081));
    assert_eq!(config.venue_grouping, Some(AreaGrouping::CityState));
    assert_eq!(
        database_path(config.root_folder.as_deref().unwrap()),
        PathBuf::from("/srv/fyyur/fyyur.db")
    );
}

#[test]
fn test_missing_explicit_config_is_error() {
    let dir = TempDir::new().unwrap();

    let result = load_toml_config(Some(dir.path().join("absent.toml").as_path()));

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
fn test_malformed_config_is_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = \"eighty\"").unwrap();

    let result = load_toml_config(Some(path.as_path()));

    assert!(matches!(result, Err(Error::Config(_))));
}
