//! helm-schema: keeps Helm `values.schema.json` files in sync from CI.
//!
//! The action installs the helm-values-schema-json helper, runs it against
//! one chart (or every chart below the working directory), and then fails,
//! pushes or reports depending on whether the generated schema changed.

pub mod cli;
pub mod discovery;
pub mod exec;
pub mod logging;
pub mod policy;
pub mod runner;

pub use runner::{GitFactory, RunOutcome, Runner};

/// Helper release installed by every run.
pub const PLUGIN_VERSION: &str = "v2.2.0";
