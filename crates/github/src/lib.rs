//! GitHub Actions integration for the helm-schema action.
//!
//! This crate implements the runner protocol the action relies on:
//! - Reading action inputs from `INPUT_*` variables
//! - Writing step outputs and PATH additions
//! - Log groups, debug lines and the failure annotation

pub mod commands;
pub mod runtime;

pub use runtime::{ActionsRuntime, GitHubActions};
