// tests/config_test.rs
use std::fs;
use std::path::{Path, PathBuf};

use release_tools::config::{load_config, Config, VersionFileFormat};
use release_tools::ReleaseError;
use tempfile::TempDir;

#[test]
fn test_missing_default_file_gives_defaults() {
    let dir = TempDir::new().unwrap();
    let config = load_config(None, dir.path()).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
fn test_load_version_in_from_work_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("version.in"),
        r#"
version_file = "Generated/version.h"
app_name = "disIntel"
default_qualifier = "beta"
"#,
    )
    .unwrap();

    let config = load_config(None, dir.path()).unwrap();
    assert_eq!(config.version_file, PathBuf::from("Generated/version.h"));
    assert_eq!(config.app_name.as_deref(), Some("disIntel"));
    assert_eq!(config.default_qualifier, "beta");
    assert_eq!(config.release_branches, vec!["main", "master"]);
    assert_eq!(config.effective_format(), VersionFileFormat::C);
}

#[test]
fn test_explicit_path_relative_to_work_dir() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("release.toml"),
        "version_file = \"Version.cs\"\nnamespace = \"MyApp\"\n",
    )
    .unwrap();

    let config = load_config(Some(Path::new("release.toml")), dir.path()).unwrap();
    assert_eq!(config.effective_format(), VersionFileFormat::CSharp);
    assert_eq!(config.namespace, "MyApp");
}

#[test]
fn test_explicit_missing_path_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = load_config(Some(Path::new("nope.toml")), dir.path()).unwrap_err();
    assert!(matches!(err, ReleaseError::ConfigUnreadable { .. }));
}

#[test]
fn test_malformed_config_is_an_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("version.in"), "version_file = [1, 2\n").unwrap();

    let err = load_config(None, dir.path()).unwrap_err();
    assert!(err.to_string().starts_with("Configuration error"));
}
