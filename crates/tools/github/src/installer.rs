//! Installing the helper binary from GitHub Releases.

use async_trait::async_trait;
use helm_schema_core::Result;
use helm_schema_core::platform::{PLUGIN_NAME, Platform, release_url};
use std::path::PathBuf;
use tracing::{debug, info};

use crate::cache::ToolCache;
use crate::fetch::ReleaseFetcher;
use crate::locate::{find_executable, make_world_executable};

/// Provides a local, executable copy of the helper binary.
#[async_trait]
pub trait Installer: Send + Sync {
    /// Ensure `version` is installed and return the executable's absolute path.
    async fn install(&self, version: &str) -> Result<PathBuf>;
}

/// [`Installer`] that downloads release archives into a [`ToolCache`].
///
/// A cache hit for `("schema", version)` skips download, extraction and
/// storage entirely.
pub struct PluginInstaller<C, F> {
    cache: C,
    fetcher: F,
    platform: Platform,
}

impl<C: ToolCache, F: ReleaseFetcher> PluginInstaller<C, F> {
    /// Create an installer for the host platform.
    #[must_use]
    pub fn new(cache: C, fetcher: F) -> Self {
        Self {
            cache,
            fetcher,
            platform: Platform::current(),
        }
    }

    /// Install for a different platform.
    #[must_use]
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }
}

#[async_trait]
impl<C: ToolCache, F: ReleaseFetcher> Installer for PluginInstaller<C, F> {
    async fn install(&self, version: &str) -> Result<PathBuf> {
        let cached = if let Some(path) = self.cache.find(PLUGIN_NAME, version) {
            debug!(version, ?path, "Plugin already cached");
            path
        } else {
            let url = release_url(version, &self.platform);
            info!(%url, platform = %self.platform, "Downloading plugin");

            let archive = self.fetcher.download(&url).await?;
            make_world_executable(&archive)?;
            let extracted = self.fetcher.extract(&archive).await?;
            self.cache.cache_dir(&extracted, PLUGIN_NAME, version)?
        };

        let executable = find_executable(&cached, &self.platform)?;
        make_world_executable(&executable)?;

        let executable = std::path::absolute(&executable)?;
        info!(version, ?executable, "Plugin installed");
        Ok(executable)
    }
}
