//! Generated version-info file and its backup.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::config::VersionFileFormat;
use crate::domain::ReleaseVersion;
use crate::error::Result;

/// Everything the generated file records about a release
#[derive(Debug, Clone)]
pub struct VersionInfo<'a> {
    pub app_name: &'a str,
    pub version: &'a ReleaseVersion,
    pub captured: DateTime<Utc>,
    pub namespace: &'a str,
}

impl VersionInfo<'_> {
    /// Capture time as `YYYY-MM-DD HH:MM:SS` (UTC)
    pub fn ctime(&self) -> String {
        self.captured.format("%Y-%m-%d %H:%M:%S").to_string()
    }
}

/// Render the file contents in the requested format
pub fn render(info: &VersionInfo<'_>, format: VersionFileFormat) -> String {
    let version = info.version.to_string();
    let numeric = info.version.numeric();
    let year = info.version.year();
    let ctime = info.ctime();

    match format {
        VersionFileFormat::C => format!(
            "// generated by make-release, do not edit\n\
             #define GIT_APPNAME \"{app}\"\n\
             #define GIT_VERSION \"{version}\"\n\
             #define GIT_VERSION_RC {rc}\n\
             #define GIT_YEAR \"{year}\"\n\
             #define GIT_CTIME \"{ctime}\"\n",
            app = info.app_name,
            rc = numeric.replace('.', ","),
        ),
        VersionFileFormat::CSharp => format!(
            "// generated by make-release, do not edit\n\
             namespace {ns}\n\
             {{\n\
             \x20   public partial class VersionInfo\n\
             \x20   {{\n\
             \x20       public const string GIT_APPNAME = \"{app}\";\n\
             \x20       public const string GIT_VERSION = \"{version}\";\n\
             \x20       public const string GIT_VERSION_RC = \"{numeric}\";\n\
             \x20       public const string GIT_YEAR = \"{year}\";\n\
             \x20       public const string GIT_CTIME = \"{ctime}\";\n\
             \x20   }}\n\
             }}\n",
            ns = info.namespace,
            app = info.app_name,
        ),
        VersionFileFormat::Text => format!(
            "app_name = \"{app}\"\n\
             version = \"{version}\"\n\
             version_rc = \"{numeric}\"\n\
             year = \"{year}\"\n\
             ctime = \"{ctime}\"\n",
            app = info.app_name,
        ),
    }
}

/// Write the version file, creating its directory if needed
pub fn write(path: &Path, info: &VersionInfo<'_>, format: VersionFileFormat) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, render(info, format))?;
    Ok(())
}

/// Keeps the previous version file aside while a release is in progress.
///
/// Unless [`VersionBackup::commit`] is called, dropping the guard removes the
/// new file and puts the old one back.
#[derive(Debug)]
pub struct VersionBackup {
    path: PathBuf,
    backup: Option<PathBuf>,
    committed: bool,
}

impl VersionBackup {
    /// Move `path` to `<path>.bak` if it exists
    pub fn stash(path: &Path) -> Result<Self> {
        let backup = if path.exists() {
            let mut name = path.as_os_str().to_owned();
            name.push(".bak");
            let backup = PathBuf::from(name);
            fs::rename(path, &backup)?;
            tracing::debug!(backup = %backup.display(), "saved previous version file");
            Some(backup)
        } else {
            None
        };

        Ok(VersionBackup {
            path: path.to_path_buf(),
            backup,
            committed: false,
        })
    }

    pub fn backup_path(&self) -> Option<&Path> {
        self.backup.as_deref()
    }

    /// Keep the new file and delete the backup
    pub fn commit(mut self) {
        self.committed = true;
        if let Some(backup) = &self.backup {
            if let Err(e) = fs::remove_file(backup) {
                tracing::warn!(backup = %backup.display(), error = %e, "cannot remove backup");
            }
        }
    }

    fn restore(&self) {
        let _ = fs::remove_file(&self.path);
        if let Some(backup) = &self.backup {
            match fs::rename(backup, &self.path) {
                Ok(()) => tracing::debug!(path = %self.path.display(), "restored version file"),
                Err(e) => tracing::warn!(
                    backup = %backup.display(),
                    error = %e,
                    "cannot restore previous version file"
                ),
            }
        }
    }
}

impl Drop for VersionBackup {
    fn drop(&mut self) {
        if !self.committed {
            self.restore();
        }
    }
}
