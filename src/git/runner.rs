use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{ReleaseError, Result};

/// How a command's output is handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    /// Collect stdout followed by stderr as text
    Combined,
    /// Leave the terminal attached (for editors launched by the command)
    Inherit,
}

/// Result of a command that was started successfully
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutput {
    /// Exit code; `None` when terminated by a signal
    pub code: Option<i32>,
    /// Captured text, empty with [`Capture::Inherit`]
    pub text: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Convert a non-zero exit into [`ReleaseError::CommandFailed`]
    pub fn check(self, command: &str) -> Result<Self> {
        if self.success() {
            Ok(self)
        } else {
            Err(ReleaseError::CommandFailed {
                command: command.to_string(),
                code: self.code.unwrap_or(-1),
                output: self.text.trim().to_string(),
            })
        }
    }
}

/// Runs one external program in a fixed working directory.
///
/// Every call builds a fresh argument vector, so nothing is shared between
/// invocations. Spawn failures surface as [`ReleaseError::GitUnavailable`];
/// a non-zero exit is reported through [`CommandOutput`].
#[derive(Debug, Clone)]
pub struct CommandRunner {
    program: String,
    work_dir: PathBuf,
}

impl CommandRunner {
    pub fn new(program: impl Into<String>, work_dir: impl AsRef<Path>) -> Self {
        CommandRunner {
            program: program.into(),
            work_dir: work_dir.as_ref().to_path_buf(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Printable form of a command line, for logs and error messages
    pub fn describe(&self, args: &[&str]) -> String {
        let mut line = self.program.clone();
        for arg in args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }

    pub fn run(&self, args: &[&str], capture: Capture) -> Result<CommandOutput> {
        tracing::debug!(command = %self.describe(args), "running");

        let mut cmd = Command::new(&self.program);
        cmd.args(args).current_dir(&self.work_dir);

        let launch_error = |source| ReleaseError::GitUnavailable {
            program: self.program.clone(),
            source,
        };

        match capture {
            Capture::Combined => {
                let output = cmd.stdin(Stdio::null()).output().map_err(launch_error)?;
                let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
                text.push_str(&String::from_utf8_lossy(&output.stderr));
                Ok(CommandOutput {
                    code: output.status.code(),
                    text,
                })
            }
            Capture::Inherit => {
                let status = cmd.status().map_err(launch_error)?;
                Ok(CommandOutput {
                    code: status.code(),
                    text: String::new(),
                })
            }
        }
    }
}
