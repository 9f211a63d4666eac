//! helm-schema action entry point.
//!
//! Workflow output goes to stdout as runner commands; diagnostics go to
//! stderr through tracing.

// Startup errors are printed before the runtime protocol is available
#![allow(clippy::print_stderr)]

use helm_schema::cli::{self, Cli};
use helm_schema::exec::ProcessExecutor;
use helm_schema::logging::{TracingConfig, init_tracing};
use helm_schema::{RunOutcome, Runner};
use helm_schema_core::RunContext;
use helm_schema_github::GitHubActions;
use helm_schema_tools_github::{DirToolCache, HttpReleaseFetcher, PluginInstaller};
use helm_schema_vcs::{GitCli, GitClient};
use std::sync::Arc;

fn main() {
    let cli = cli::parse();

    if let Err(e) = init_tracing(TracingConfig {
        format: cli.format,
        level: cli.level.into(),
        filter: None,
    }) {
        eprintln!("{e:?}");
    }

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("Fatal error: Failed to create tokio runtime: {e}");
            std::process::exit(1);
        }
    };

    let code = match rt.block_on(run(cli)) {
        Ok(outcome) => outcome.exit_code(),
        Err(report) => {
            eprintln!("{report:?}");
            1
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> miette::Result<RunOutcome> {
    let mut ctx = RunContext::from_process()?;

    let token = cli
        .token
        .clone()
        .or_else(|| std::env::var("GH_TOKEN").ok());
    let fetcher = HttpReleaseFetcher::new(cli.temp_dir())?.with_token(token);
    let installer = PluginInstaller::new(DirToolCache::from_root(cli.tool_cache), fetcher);

    let runner = Runner::new(
        Arc::new(GitHubActions::from_env()),
        Arc::new(installer),
        Arc::new(ProcessExecutor),
        Box::new(|ctx: &RunContext| -> Arc<dyn GitClient> {
            Arc::new(GitCli::from_context(ctx))
        }),
    );

    Ok(runner.run(&mut ctx).await)
}
