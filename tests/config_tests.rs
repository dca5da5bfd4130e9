//! Integration tests for configuration loading.
//!
//! Tests the ConfigLoader tiers and how the loaded config drives the pipeline.

use controls_merge::config::{CONFIG_FILE_NAME, Config, ConfigLoader, ConfigPaths};
use controls_merge::format::OutputStyle;
use controls_merge::{ControlsError, ParseError, Role};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a ConfigLoader with specific temp directories.
fn create_loader_with_dirs(project_dir: Option<PathBuf>, user_dir: Option<PathBuf>) -> ConfigLoader {
    let paths = ConfigPaths::with_dirs(project_dir, user_dir);
    ConfigLoader::load_with_lookup(paths, |_| None).expect("Failed to create config loader")
}

fn write_config(dir: &std::path::Path, contents: &str) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(CONFIG_FILE_NAME), contents).unwrap();
}

#[test]
fn compact_project_config_changes_output() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("controls-merge");
    write_config(&project, "output:\n  style: compact\n");

    let config = create_loader_with_dirs(Some(project), None).into_config();
    let out = config
        .pipeline()
        .extract_controls(r#"{"controls": {"jump": "Space"}, "fov": 90}"#)
        .unwrap();

    assert_eq!(out, r#"{"controls":{"jump":"Space"}}"#);
}

#[test]
fn user_indent_layers_over_project_style() {
    let temp = TempDir::new().unwrap();
    let project = temp.path().join("controls-merge");
    let user = temp.path().join("user");
    write_config(&project, "output:\n  style: pretty\n  indent: 2\n");
    write_config(&user, "output:\n  indent: 4\n");

    let config = create_loader_with_dirs(Some(project), Some(user)).into_config();
    assert_eq!(config.output.style, OutputStyle::Pretty);
    assert_eq!(config.output.indent, 4);

    let out = config.pipeline().extract_controls(r#"{"controls": 1}"#).unwrap();
    assert_eq!(out, "{\n    \"controls\": 1\n}");
}

#[test]
fn configured_depth_limit_rejects_deep_input() {
    let temp = TempDir::new().unwrap();
    let user = temp.path().join("user");
    write_config(&user, "limits:\n  max_depth: 2\n");

    let config = create_loader_with_dirs(None, Some(user)).into_config();
    let err = config
        .pipeline()
        .merge_controls(r#"{"controls": {"a": 1}}"#, r#"{"x": {"y": {"z": 1}}}"#)
        .unwrap_err();

    assert_eq!(
        err,
        ControlsError::parse(Role::Target, ParseError::TooDeep { limit: 2 })
    );
}

#[test]
fn explicit_config_file_is_used_alone() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("custom.yaml");
    fs::write(&path, "limits:\n  max_bytes: 1024\n").unwrap();

    let loader = ConfigLoader::load_explicit(&path).unwrap();

    assert_eq!(loader.sources(), [path]);
    assert_eq!(loader.config().limits.max_bytes, 1024);
    assert_eq!(loader.config().output, Config::default().output);
}

#[test]
fn explicit_config_with_bad_yaml_is_an_error() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("broken.yaml");
    fs::write(&path, "limits: {max_bytes: [").unwrap();

    let err = ConfigLoader::load_explicit(&path).unwrap_err();
    assert!(err.to_string().contains("broken.yaml"));
}
