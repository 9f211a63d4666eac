//! Core types for the helm-schema action.
//!
//! This crate holds everything the other crates agree on:
//! - [`Error`] and [`Result`], the shared error taxonomy
//! - [`platform`], mapping the host to a helper release download
//! - [`config`], the optional `.schema.yaml` document
//! - [`options`], the merged per-run options and the helper command line
//! - [`context`], the explicit replacement for process-global cwd and `PATH`

pub mod config;
pub mod context;
pub mod error;
pub mod options;
pub mod platform;

pub use context::RunContext;
pub use error::{Error, Result};
