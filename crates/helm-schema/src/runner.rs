//! One action run, from inputs to the post-generation policy.

use helm_schema_core::config::{CONFIG_FILE, SchemaConfig};
use helm_schema_core::options::EffectiveOptions;
use helm_schema_core::{Error, Result, RunContext};
use helm_schema_github::ActionsRuntime;
use helm_schema_tools_github::Installer;
use helm_schema_vcs::GitClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::PLUGIN_VERSION;
use crate::discovery::find_charts;
use crate::exec::CommandExecutor;
use crate::policy::{Decision, Outputs, decide};

/// Creates a git client bound to the run's context.
pub type GitFactory = Box<dyn Fn(&RunContext) -> Arc<dyn GitClient> + Send + Sync>;

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The run completed without marking the step failed.
    Succeeded,
    /// The step was marked failed with this message.
    Failed(String),
}

impl RunOutcome {
    /// Process exit code for this outcome.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Succeeded => 0,
            Self::Failed(_) => 1,
        }
    }
}

/// The action's orchestrator.
pub struct Runner {
    runtime: Arc<dyn ActionsRuntime>,
    installer: Arc<dyn Installer>,
    executor: Arc<dyn CommandExecutor>,
    git: GitFactory,
    version: String,
}

impl Runner {
    /// Create a runner installing [`PLUGIN_VERSION`].
    pub fn new(
        runtime: Arc<dyn ActionsRuntime>,
        installer: Arc<dyn Installer>,
        executor: Arc<dyn CommandExecutor>,
        git: GitFactory,
    ) -> Self {
        Self {
            runtime,
            installer,
            executor,
            git,
            version: PLUGIN_VERSION.to_string(),
        }
    }

    /// Install a different helper version.
    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Run the action.
    ///
    /// Never returns an error: every failure is reported once through
    /// [`ActionsRuntime::set_failed`] and reflected in the outcome.
    pub async fn run(&self, ctx: &mut RunContext) -> RunOutcome {
        let failure = match self.try_run(ctx).await {
            Ok(None) => return RunOutcome::Succeeded,
            Ok(Some(message)) => message,
            Err(e) => {
                warn!(error = %e, "Run failed");
                e.to_string()
            }
        };
        self.runtime.set_failed(&failure);
        RunOutcome::Failed(failure)
    }

    /// Returns the policy failure message, if the policy fails the run.
    #[instrument(skip_all, fields(version = %self.version))]
    async fn try_run(&self, ctx: &mut RunContext) -> Result<Option<String>> {
        if let Some(dir) = self.runtime.input("working-directory") {
            ctx.change_dir(&dir);
            debug!(dir = ?ctx.working_dir, "Changed working directory");
        }

        let config = self.load_config(&ctx.working_dir);
        let options = EffectiveOptions::resolve(|name| self.runtime.input(name), &config);

        self.runtime
            .start_group(&format!("Downloading JSON schema {}", self.version));
        let installed = self.installer.install(&self.version).await;
        self.runtime.end_group();
        let executable = installed?;

        let bin_dir = executable
            .parent()
            .ok_or_else(|| Error::executable_not_found(&executable))?;
        if !ctx.path_starts_with(bin_dir) {
            ctx.prepend_path(bin_dir)?;
            self.runtime.add_path(bin_dir)?;
        }

        let executable_str = executable.to_string_lossy();
        self.runtime.info(&format!(
            "JSON schema binary '{}' has been cached at {executable_str}",
            self.version
        ));
        self.runtime.set_output("plugin-path", &executable_str)?;

        let targets = self.targets(&options, &ctx.working_dir)?;
        for target in &targets {
            let args = target.to_args();
            self.runtime
                .info(&format!("[command]{executable_str} {}", args.join(" ")));
            self.executor.exec(&executable, &args, ctx).await?;
        }

        let git = (self.git)(ctx);
        let status = git.status().await?;
        let changed: Vec<String> = targets
            .iter()
            .filter(|t| status.contains(Path::new(&t.output)))
            .map(|t| t.output.clone())
            .collect();
        info!(changed = changed.len(), targets = targets.len(), "Inspected git status");

        let outputs = if options.recursive {
            if !changed.is_empty() {
                self.runtime.info(&format!(
                    "Detected changes in the following files: {}",
                    changed.join(", ")
                ));
            }
            Outputs::Many(&changed)
        } else {
            Outputs::Single(&options.output)
        };

        match decide(!changed.is_empty(), options.fail_on_diff, options.git.push) {
            Decision::Fail => {
                for output in &changed {
                    self.log_diff(git.as_ref(), output).await;
                }
                return Ok(Some(outputs.changed()));
            }
            Decision::Push => {
                git.add_config("user.name", &options.git.user_name).await?;
                git.add_config("user.email", &options.git.user_email)
                    .await?;
                git.add(&changed).await?;
                git.commit(&options.git.commit_message).await?;
                git.push().await?;
                self.runtime.info(&outputs.pushed());
            }
            Decision::Report => self.runtime.info(&outputs.no_action()),
            Decision::UpToDate => self.runtime.info(&outputs.up_to_date()),
        }

        Ok(None)
    }

    /// Read `.schema.yaml`; any failure falls back to an empty config.
    fn load_config(&self, working_dir: &Path) -> SchemaConfig {
        let path = working_dir.join(CONFIG_FILE);
        match SchemaConfig::from_file(&path) {
            Ok(config) => {
                self.runtime
                    .debug(&format!("Loaded configuration from {}", path.display()));
                config
            }
            Err(e) => {
                self.runtime.info(&format!(
                    "No usable {CONFIG_FILE} found ({e}), continuing with action inputs only."
                ));
                SchemaConfig::default()
            }
        }
    }

    /// Options for each helper invocation.
    fn targets(
        &self,
        options: &EffectiveOptions,
        working_dir: &Path,
    ) -> Result<Vec<EffectiveOptions>> {
        if !options.recursive {
            return Ok(vec![options.clone()]);
        }

        let charts: Vec<PathBuf> = find_charts(working_dir)?;
        let listed: Vec<String> = charts
            .iter()
            .map(|c| c.to_string_lossy().into_owned())
            .collect();
        self.runtime
            .info(&format!("Found charts: {}", listed.join(", ")));

        Ok(charts.iter().map(|c| options.for_chart(c)).collect())
    }

    async fn log_diff(&self, git: &dyn GitClient, output: &str) {
        match git.diff(Path::new(output)).await {
            Ok(diff) if !diff.trim().is_empty() => self.runtime.info(&diff),
            Ok(_) => self
                .runtime
                .info(&format!("Diff for '{output}' is unavailable.")),
            Err(e) => {
                debug!(error = %e, output, "Diff failed");
                self.runtime
                    .info(&format!("Diff for '{output}' is unavailable."));
            }
        }
    }
}
