//! The GitHub Actions runtime.
//!
//! Inputs come from `INPUT_*` environment variables. Outputs and search-path
//! additions go to the files named by `GITHUB_OUTPUT` and `GITHUB_PATH`, or to
//! workflow commands on stdout when the runner does not provide those files.

use helm_schema_core::Result;
use std::collections::HashMap;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{trace, warn};
use uuid::Uuid;

use crate::commands::{input_env_name, issue};

/// Operations the action performs against the workflow runner.
pub trait ActionsRuntime: Send + Sync {
    /// Value of action input `name`, trimmed. `None` when unset or empty.
    fn input(&self, name: &str) -> Option<String>;

    /// Write an informational line to the job log.
    fn info(&self, message: &str);

    /// Write a debug line, shown only when step debugging is enabled.
    fn debug(&self, message: &str);

    /// Begin a collapsible log group.
    fn start_group(&self, name: &str);

    /// End the current log group.
    fn end_group(&self);

    /// Set step output `name`.
    fn set_output(&self, name: &str, value: &str) -> Result<()>;

    /// Prepend `dir` to PATH for subsequent steps.
    fn add_path(&self, dir: &Path) -> Result<()>;

    /// Record a failure annotation and mark the step failed.
    fn set_failed(&self, message: &str);
}

/// [`ActionsRuntime`] speaking the runner's file and stdout protocol.
pub struct GitHubActions {
    env: HashMap<String, String>,
    out: Mutex<Box<dyn Write + Send>>,
    failed: AtomicBool,
}

impl GitHubActions {
    /// Runtime over the current process environment, writing to stdout.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(std::env::vars().collect(), Box::new(std::io::stdout()))
    }

    /// Runtime over an explicit environment and log sink.
    #[must_use]
    pub fn new(env: HashMap<String, String>, out: Box<dyn Write + Send>) -> Self {
        Self {
            env,
            out: Mutex::new(out),
            failed: AtomicBool::new(false),
        }
    }

    /// Whether [`ActionsRuntime::set_failed`] was called.
    #[must_use]
    pub fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }

    fn env_file(&self, name: &str) -> Option<&str> {
        self.env
            .get(name)
            .map(String::as_str)
            .filter(|path| !path.is_empty())
    }

    fn emit(&self, line: &str) {
        let Ok(mut out) = self.out.lock() else {
            warn!("Job log writer is poisoned");
            return;
        };
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            warn!(error = %e, "Failed to write to job log");
        }
    }
}

fn append(path: &str, contents: &str) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(contents.as_bytes())?;
    Ok(())
}

impl ActionsRuntime for GitHubActions {
    fn input(&self, name: &str) -> Option<String> {
        self.env
            .get(&input_env_name(name))
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    fn info(&self, message: &str) {
        self.emit(message);
    }

    fn debug(&self, message: &str) {
        self.emit(&issue("debug", &[], message));
    }

    fn start_group(&self, name: &str) {
        self.emit(&issue("group", &[], name));
    }

    fn end_group(&self) {
        self.emit(&issue("endgroup", &[], ""));
    }

    fn set_output(&self, name: &str, value: &str) -> Result<()> {
        if let Some(path) = self.env_file("GITHUB_OUTPUT") {
            let delimiter = format!("ghadelimiter_{}", Uuid::new_v4());
            trace!(name, path, "Writing step output");
            return append(path, &format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"));
        }
        self.emit("");
        self.emit(&issue("set-output", &[("name", name)], value));
        Ok(())
    }

    fn add_path(&self, dir: &Path) -> Result<()> {
        let dir = dir.to_string_lossy();
        if let Some(path) = self.env_file("GITHUB_PATH") {
            trace!(%dir, path, "Adding to job PATH");
            return append(path, &format!("{dir}\n"));
        }
        self.emit(&issue("add-path", &[], &dir));
        Ok(())
    }

    fn set_failed(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        self.emit(&issue("error", &[], message));
    }
}
