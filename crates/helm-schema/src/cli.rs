//! Command-line flags of the action binary.

use crate::logging::{LogLevel, TracingFormat};
use clap::Parser;
use std::path::PathBuf;

/// Action inputs are read from `INPUT_*` variables; these flags only tune
/// the process itself.
#[derive(Parser, Debug)]
#[command(name = "helm-schema")]
#[command(about = "Generate values.schema.json for Helm charts and keep it committed")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[arg(
        short = 'l',
        long,
        env = "HELM_SCHEMA_LOG_LEVEL",
        help = "Set diagnostic logging level",
        default_value = "warn",
        value_enum
    )]
    pub level: LogLevel,

    #[arg(
        long,
        help = "Diagnostic log format",
        default_value = "compact",
        value_enum
    )]
    pub format: TracingFormat,

    #[arg(
        long,
        env = "RUNNER_TOOL_CACHE",
        help = "Tool cache root for downloaded helper releases"
    )]
    pub tool_cache: Option<PathBuf>,

    #[arg(
        long,
        env = "RUNNER_TEMP",
        help = "Directory for downloads and extraction"
    )]
    pub temp_dir: Option<PathBuf>,

    #[arg(
        long,
        env = "GITHUB_TOKEN",
        hide_env_values = true,
        help = "Token for authenticated release downloads"
    )]
    pub token: Option<String>,
}

impl Cli {
    /// Temp directory, defaulting to the system one.
    #[must_use]
    pub fn temp_dir(&self) -> PathBuf {
        self.temp_dir.clone().unwrap_or_else(std::env::temp_dir)
    }
}

/// Parse process arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
