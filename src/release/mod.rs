//! Release workflow orchestration
//!
//! Resolves the next revision, regenerates the version file, commits it and
//! tags the commit. Any failure before the commit completes puts the
//! previous version file back.

pub mod version_file;

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::boundary::BoundaryWarning;
use crate::config::Config;
use crate::error::{ReleaseError, Result};
use crate::git::{CommitMode, Repository};
use crate::resolver::{Resolution, VersionResolver};
use version_file::{VersionBackup, VersionInfo};

/// Arguments for the release workflow
///
/// Mirrors the CLI options without depending on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseArgs {
    /// Directory the release is made from; its name is the default project name
    pub work_dir: PathBuf,

    /// Requested revision, empty for automatic
    pub revision: String,

    /// Commit message; empty opens the editor
    pub message: String,
}

/// Result of a successful release
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseOutcome {
    pub project: String,
    pub resolution: Resolution,
    pub version_file: PathBuf,
    /// The previous commit was amended rather than a new one made
    pub amended: bool,
    /// Non-fatal problems to show the user
    pub warnings: Vec<BoundaryWarning>,
}

impl ReleaseOutcome {
    pub fn version(&self) -> String {
        self.resolution.version.to_string()
    }

    pub fn tag_name(&self) -> &str {
        &self.resolution.tag_name
    }
}

/// Project name: configured `app_name`, else the leaf of the working directory
pub fn project_name(config: &Config, work_dir: &Path) -> Result<String> {
    if let Some(name) = config.app_name.as_ref().filter(|n| !n.is_empty()) {
        return Ok(name.clone());
    }
    work_dir
        .file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| {
            ReleaseError::config(format!(
                "cannot determine project name from {}",
                work_dir.display()
            ))
        })
}

/// Commit message for the version commit
pub fn commit_message(project: &str, version: &str, message: &str) -> String {
    format!("{} - {}: {}", project, version, message)
}

/// Annotation of the release tag
pub fn tag_message(project: &str, version: &str) -> String {
    format!("Release {} - {}", project, version)
}

/// Run the whole release against `repo`, with "now" captured once by the caller
pub fn run_release<R: Repository + ?Sized>(
    repo: &R,
    args: &ReleaseArgs,
    config: &Config,
    now: DateTime<Utc>,
) -> Result<ReleaseOutcome> {
    let project = project_name(config, &args.work_dir)?;
    tracing::debug!(project = %project, "starting release");

    let resolver = VersionResolver::new(&project, now)
        .with_release_branches(config.release_branches.clone())
        .with_default_qualifier(config.default_qualifier.clone());
    let resolution = resolver.resolve(repo, &args.revision)?;
    let version = resolution.version.to_string();
    tracing::info!(version = %version, tag = %resolution.tag_name, "resolved");

    let version_path = args.work_dir.join(&config.version_file);
    let backup = VersionBackup::stash(&version_path)?;

    let info = VersionInfo {
        app_name: &project,
        version: &resolution.version,
        captured: now,
        namespace: &config.namespace,
    };
    version_file::write(&version_path, &info, config.effective_format())?;

    repo.stage(&config.version_file)?;

    let mode = if !repo.has_changes()? {
        CommitMode::Amend
    } else {
        let msg = commit_message(&project, &version, &args.message);
        if args.message.is_empty() {
            CommitMode::Edit(msg)
        } else {
            CommitMode::Message(msg)
        }
    };
    repo.commit(&mode, now.timestamp())?;

    let mut warnings = Vec::new();
    if let Err(e) = repo.create_tag(&resolution.tag_name, &tag_message(&project, &version)) {
        tracing::warn!(error = %e, "tag creation failed");
        warnings.push(BoundaryWarning::TagNotCreated {
            tag: resolution.tag_name.clone(),
            reason: e.to_string(),
        });
    }

    backup.commit();

    Ok(ReleaseOutcome {
        project,
        resolution,
        version_file: version_path,
        amended: mode == CommitMode::Amend,
        warnings,
    })
}
