use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ReleaseError, Result};

/// Default name of the release configuration file
pub const DEFAULT_CONFIG_FILE: &str = "version.in";

/// Layout of the generated version file
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum VersionFileFormat {
    /// `#define` lines for C/C++ and resource scripts
    C,
    /// A partial C# class of string constants
    CSharp,
    /// `key = "value"` lines
    Text,
}

impl VersionFileFormat {
    /// Pick a format from the file extension
    pub fn infer(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("h" | "hpp" | "in" | "inc") => VersionFileFormat::C,
            Some("cs") => VersionFileFormat::CSharp,
            _ => VersionFileFormat::Text,
        }
    }
}

/// Release configuration, read from `version.in`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Generated file, relative to the working directory
    #[serde(default = "default_version_file")]
    pub version_file: PathBuf,

    /// Explicit output format; inferred from `version_file` when absent
    #[serde(default)]
    pub format: Option<VersionFileFormat>,

    /// Project name used for tags; defaults to the working directory name
    #[serde(default)]
    pub app_name: Option<String>,

    #[serde(default = "default_release_branches")]
    pub release_branches: Vec<String>,

    #[serde(default = "default_qualifier")]
    pub default_qualifier: String,

    /// Namespace of the generated C# class
    #[serde(default = "default_namespace")]
    pub namespace: String,
}

fn default_version_file() -> PathBuf {
    PathBuf::from("version.h")
}

fn default_release_branches() -> Vec<String> {
    vec!["main".to_string(), "master".to_string()]
}

fn default_qualifier() -> String {
    "dev".to_string()
}

fn default_namespace() -> String {
    "GitVersionInfo".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            version_file: default_version_file(),
            format: None,
            app_name: None,
            release_branches: default_release_branches(),
            default_qualifier: default_qualifier(),
            namespace: default_namespace(),
        }
    }
}

impl Config {
    /// The configured format, or the one implied by the file extension
    pub fn effective_format(&self) -> VersionFileFormat {
        self.format
            .unwrap_or_else(|| VersionFileFormat::infer(&self.version_file))
    }
}

/// Loads configuration from file or returns defaults.
///
/// 1. `config_path` when given (must exist)
/// 2. `version.in` in `work_dir`
/// 3. Built-in defaults
pub fn load_config(config_path: Option<&Path>, work_dir: &Path) -> Result<Config> {
    let path = match config_path {
        Some(path) => work_dir.join(path),
        None => {
            let path = work_dir.join(DEFAULT_CONFIG_FILE);
            if !path.exists() {
                tracing::debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                return Ok(Config::default());
            }
            path
        }
    };

    let text = fs::read_to_string(&path).map_err(|source| ReleaseError::ConfigUnreadable {
        path: path.clone(),
        source,
    })?;
    parse_config(&text)
        .map_err(|e| ReleaseError::config(format!("{}: {}", path.display(), e)))
}

/// Parse configuration text
pub fn parse_config(text: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(text)
}
