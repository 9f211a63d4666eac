//! Git integration for the helm-schema action.
//!
//! After the helper regenerates a schema, the action asks git which files
//! changed and, when requested, commits and pushes the regenerated output.

pub mod git;
pub mod status;

pub use git::{GitCli, GitClient, parse_porcelain_z};
pub use status::{ChangeStatus, FileStatus};
