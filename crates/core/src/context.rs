//! Per-run process context.
//!
//! The working directory and executable search path are carried explicitly
//! instead of mutating the process. Child processes receive both.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Working directory and `PATH` for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    /// Directory relative paths resolve against.
    pub working_dir: PathBuf,
    /// Value of `PATH` handed to child processes.
    pub path_var: OsString,
}

impl RunContext {
    /// Create a context.
    #[must_use]
    pub fn new(working_dir: impl Into<PathBuf>, path_var: impl Into<OsString>) -> Self {
        Self {
            working_dir: working_dir.into(),
            path_var: path_var.into(),
        }
    }

    /// Snapshot the current process directory and `PATH`.
    pub fn from_process() -> Result<Self> {
        let working_dir = std::env::current_dir()?;
        let path_var = std::env::var_os("PATH").unwrap_or_default();
        Ok(Self::new(working_dir, path_var))
    }

    /// Change the working directory; relative paths resolve against the current one.
    pub fn change_dir(&mut self, dir: impl AsRef<Path>) {
        self.working_dir = self.working_dir.join(dir);
    }

    /// Whether `PATH` already begins with `dir`.
    #[must_use]
    pub fn path_starts_with(&self, dir: &Path) -> bool {
        self.path_var
            .to_string_lossy()
            .starts_with(dir.to_string_lossy().as_ref())
    }

    /// Put `dir` in front of `PATH`.
    pub fn prepend_path(&mut self, dir: &Path) -> Result<()> {
        let entries = std::iter::once(dir.to_path_buf())
            .chain(std::env::split_paths(&self.path_var).filter(|p| !p.as_os_str().is_empty()));
        self.path_var = std::env::join_paths(entries)
            .map_err(|e| Error::configuration(format!("Cannot add {} to PATH: {e}", dir.display())))?;
        Ok(())
    }
}
