//! Git operations used after schema generation.

use async_trait::async_trait;
use helm_schema_core::{Error, Result, RunContext};
use std::ffi::OsString;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use tokio::process::Command;
use tracing::{debug, trace};

use crate::status::{ChangeStatus, FileStatus};

/// Git client the orchestrator drives.
#[async_trait]
pub trait GitClient: Send + Sync {
    /// Changed files, relative to the working directory.
    async fn status(&self) -> Result<ChangeStatus>;

    /// Unified diff of `path` against the index.
    async fn diff(&self, path: &Path) -> Result<String>;

    /// Set a repository-local config value.
    async fn add_config(&self, key: &str, value: &str) -> Result<()>;

    /// Stage exactly `paths`.
    async fn add(&self, paths: &[String]) -> Result<()>;

    /// Commit staged changes.
    async fn commit(&self, message: &str) -> Result<()>;

    /// Push the current branch to its upstream.
    async fn push(&self) -> Result<()>;
}

#[async_trait]
impl<T: GitClient + ?Sized> GitClient for Arc<T> {
    async fn status(&self) -> Result<ChangeStatus> {
        (**self).status().await
    }

    async fn diff(&self, path: &Path) -> Result<String> {
        (**self).diff(path).await
    }

    async fn add_config(&self, key: &str, value: &str) -> Result<()> {
        (**self).add_config(key, value).await
    }

    async fn add(&self, paths: &[String]) -> Result<()> {
        (**self).add(paths).await
    }

    async fn commit(&self, message: &str) -> Result<()> {
        (**self).commit(message).await
    }

    async fn push(&self) -> Result<()> {
        (**self).push().await
    }
}

/// [`GitClient`] that runs the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
    working_dir: PathBuf,
    path_var: OsString,
}

impl GitCli {
    /// Client running `git` in `working_dir` with `PATH=path_var`.
    pub fn new(working_dir: impl Into<PathBuf>, path_var: impl Into<OsString>) -> Self {
        Self {
            working_dir: working_dir.into(),
            path_var: path_var.into(),
        }
    }

    /// Client bound to the run's working directory and search path.
    #[must_use]
    pub fn from_context(ctx: &RunContext) -> Self {
        Self::new(ctx.working_dir.clone(), ctx.path_var.clone())
    }

    async fn run(&self, args: &[&str]) -> Result<String> {
        let command = args.first().copied().unwrap_or_default();
        trace!(?args, dir = ?self.working_dir, "Running git");

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.working_dir)
            .env("PATH", &self.path_var)
            .output()
            .await
            .map_err(|e| Error::git(command, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(Error::git(command, message));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl GitClient for GitCli {
    async fn status(&self) -> Result<ChangeStatus> {
        let prefix = self.run(&["rev-parse", "--show-prefix"]).await?;
        let raw = self
            .run(&["status", "--porcelain=v1", "-z", "--untracked-files=all"])
            .await?;

        let prefix = Path::new(prefix.trim());
        let files = parse_porcelain_z(&raw)
            .into_iter()
            .map(|f| FileStatus {
                path: relative_to(&f.path, prefix),
                ..f
            })
            .collect::<Vec<_>>();

        debug!(changed = files.len(), "Read git status");
        Ok(ChangeStatus { files })
    }

    async fn diff(&self, path: &Path) -> Result<String> {
        let path = path.to_string_lossy();
        self.run(&["diff", "--", &*path]).await
    }

    async fn add_config(&self, key: &str, value: &str) -> Result<()> {
        self.run(&["config", "--local", key, value]).await?;
        Ok(())
    }

    async fn add(&self, paths: &[String]) -> Result<()> {
        let mut args = vec!["add", "--"];
        args.extend(paths.iter().map(String::as_str));
        self.run(&args).await?;
        Ok(())
    }

    async fn commit(&self, message: &str) -> Result<()> {
        self.run(&["commit", "-m", message]).await?;
        Ok(())
    }

    async fn push(&self) -> Result<()> {
        self.run(&["push"]).await?;
        Ok(())
    }
}

/// Parse `git status --porcelain=v1 -z` output.
///
/// Rename and copy entries are followed by their original path, which is
/// skipped. Paths are relative to the repository root.
#[must_use]
pub fn parse_porcelain_z(raw: &str) -> Vec<FileStatus> {
    let mut files = Vec::new();
    let mut entries = raw.split('\0').filter(|e| !e.is_empty());

    while let Some(entry) = entries.next() {
        let mut chars = entry.chars();
        let (Some(index), Some(working_dir)) = (chars.next(), chars.next()) else {
            continue;
        };
        let Some(path) = entry.get(3..).filter(|p| !p.is_empty()) else {
            continue;
        };

        if matches!(index, 'R' | 'C') {
            entries.next();
        }

        files.push(FileStatus {
            path: PathBuf::from(path),
            index,
            working_dir,
        });
    }

    files
}

/// Rebase a repository-root-relative path onto the directory `prefix`.
fn relative_to(path: &Path, prefix: &Path) -> PathBuf {
    let path: Vec<Component<'_>> = path.components().collect();
    let prefix: Vec<Component<'_>> = prefix.components().collect();

    let common = path
        .iter()
        .zip(&prefix)
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..prefix.len() {
        relative.push("..");
    }
    for component in &path[common..] {
        relative.push(component);
    }
    relative
}
