//! Running the helper binary.

use async_trait::async_trait;
use helm_schema_core::{Error, Result, RunContext};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Runs external programs on behalf of the orchestrator.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run `program` with `args` in the context's directory and `PATH`.
    ///
    /// A non-zero exit is an error.
    async fn exec(&self, program: &Path, args: &[String], ctx: &RunContext) -> Result<()>;
}

/// [`CommandExecutor`] spawning real processes.
///
/// Output is inherited so the helper writes straight into the job log.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor;

#[async_trait]
impl CommandExecutor for ProcessExecutor {
    #[instrument(skip(self, ctx), fields(dir = ?ctx.working_dir))]
    async fn exec(&self, program: &Path, args: &[String], ctx: &RunContext) -> Result<()> {
        let status = Command::new(program)
            .args(args)
            .current_dir(&ctx.working_dir)
            .env("PATH", &ctx.path_var)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|e| {
                Error::subprocess(
                    program,
                    format!("Unable to run '{}': {e}", program.display()),
                )
            })?;

        debug!(%status, "Process exited");
        if status.success() {
            return Ok(());
        }

        let message = match status.code() {
            Some(code) => format!(
                "The process '{}' failed with exit code {code}",
                program.display()
            ),
            None => format!(
                "The process '{}' was terminated by a signal",
                program.display()
            ),
        };
        Err(Error::subprocess(program, message))
    }
}
