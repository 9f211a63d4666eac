//! GitHub Releases installer for the helm-values-schema-json helper.
//!
//! Installs the helper the way the Actions tool cache does:
//! - look up `("schema", version)` in a [`ToolCache`]
//! - on a miss, download the platform's `.tgz`, extract it and store it
//! - locate the executable at the top level of the cached directory

pub mod cache;
pub mod fetch;
pub mod installer;
pub mod locate;

pub use cache::{DirToolCache, ToolCache};
pub use fetch::{HttpReleaseFetcher, ReleaseFetcher};
pub use installer::{Installer, PluginInstaller};
pub use locate::find_executable;
