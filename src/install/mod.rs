//! Install rule engine
//!
//! Copies one built file to every destination whose rule in `install.cfg`
//! names the file's parent directory. See [rules] for the file format and
//! [template] for destination expansion.

pub mod copy;
pub mod rules;
pub mod template;

use std::fs;
use std::path::{Path, PathBuf};

use crate::boundary::BoundaryWarning;
use crate::error::{ReleaseError, Result};
use crate::ui;
pub use template::Stamp;

/// Default configuration file name inside the install root
pub const DEFAULT_CONFIG_FILE: &str = "install.cfg";

/// What to install and where the rules live
#[derive(Debug, Clone, PartialEq)]
pub struct InstallRequest {
    pub source: PathBuf,
    pub root: PathBuf,
    /// Overrides `<root>/install.cfg`
    pub config: Option<PathBuf>,
}

impl InstallRequest {
    pub fn config_path(&self) -> PathBuf {
        match &self.config {
            Some(path) if !path.as_os_str().is_empty() => path.clone(),
            _ => self.root.join(DEFAULT_CONFIG_FILE),
        }
    }
}

/// One successful copy
#[derive(Debug, Clone, PartialEq)]
pub struct Installed {
    pub file: String,
    pub destination: PathBuf,
}

/// One rule that could not be carried out
#[derive(Debug, Clone, PartialEq)]
pub struct FailedInstall {
    pub file: String,
    pub destination: PathBuf,
    pub reason: String,
}

/// Result of a complete run over the configuration
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InstallReport {
    pub installed: Vec<Installed>,
    pub failed: Vec<FailedInstall>,
    pub warnings: Vec<BoundaryWarning>,
}

impl InstallReport {
    pub fn success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Split a source path into `(file, parent)` where `parent` is the name of
/// the containing directory, or `None` when the path has no directory part.
pub fn split_source(source: &Path) -> (String, Option<String>) {
    let file = source
        .file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_default();
    let parent = source
        .parent()
        .and_then(|p| p.file_name())
        .map(|p| p.to_string_lossy().into_owned());
    (file, parent)
}

/// Run every matching rule.
///
/// An unreadable configuration or source file is fatal; a rule whose copy
/// fails is recorded in the report and the remaining rules still run.
pub fn install(request: &InstallRequest, stamp: &Stamp) -> Result<InstallReport> {
    let mut report = InstallReport::default();

    let (file, parent) = split_source(&request.source);
    let parent = parent.unwrap_or_else(|| {
        let warning = BoundaryWarning::MissingParentDirectory {
            source: request.source.display().to_string(),
        };
        ui::display_boundary_warning(&warning);
        report.warnings.push(warning);
        ".".to_string()
    });

    let config_path = request.config_path();
    let config = fs::read_to_string(&config_path).map_err(|source| {
        ReleaseError::ConfigUnreadable {
            path: config_path.clone(),
            source,
        }
    })?;

    fs::File::open(&request.source)
        .and_then(|f| f.metadata())
        .map_err(|source| ReleaseError::SourceUnreadable {
            path: request.source.clone(),
            source,
        })?;

    tracing::debug!(file = %file, parent = %parent, config = %config_path.display(), "installing");

    for rule in rules::matching_rules(&config, &parent, &file) {
        let destination =
            template::destination(&request.root, rule.target, &file, rule.suffix, stamp);

        match copy::copy_preserving_times(&request.source, &destination) {
            Ok(()) => {
                ui::display_installed(&file, &destination);
                report.installed.push(Installed {
                    file: file.clone(),
                    destination,
                });
            }
            Err(e) => {
                let warning = BoundaryWarning::InstallFailed {
                    file: file.clone(),
                    destination: destination.display().to_string(),
                    reason: e.to_string(),
                };
                ui::display_boundary_warning(&warning);
                report.failed.push(FailedInstall {
                    file: file.clone(),
                    destination,
                    reason: e.to_string(),
                });
                report.warnings.push(warning);
            }
        }
    }

    if report.installed.is_empty() && report.failed.is_empty() {
        tracing::info!(file = %file, parent = %parent, "no install rule matched");
    }
    Ok(report)
}
