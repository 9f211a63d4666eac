//! Versioned tool cache.
//!
//! Extracted releases are stored per tool and version, in the layout the
//! GitHub Actions runner uses for its hosted tool cache:
//!
//! ```text
//! $RUNNER_TOOL_CACHE/
//! └── schema/
//!     └── v2.2.0/
//!         ├── amd64/          # extracted release
//!         └── amd64.complete  # written last, marks the entry usable
//! ```
//!
//! Entries are only ever created, never removed.

use helm_schema_core::platform::Arch;
use helm_schema_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, trace};
use walkdir::WalkDir;

/// Lookup and storage of extracted tools by `(name, version)`.
pub trait ToolCache: Send + Sync {
    /// Path of a complete cached entry, if one exists.
    fn find(&self, tool: &str, version: &str) -> Option<PathBuf>;

    /// Copy `source` into the cache and return the stable cached path.
    fn cache_dir(&self, source: &Path, tool: &str, version: &str) -> Result<PathBuf>;
}

/// Tool cache rooted at a directory on disk.
#[derive(Debug, Clone)]
pub struct DirToolCache {
    root: PathBuf,
    arch: Arch,
}

impl DirToolCache {
    /// Create a cache at the specified root directory.
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self {
            root,
            arch: Arch::current(),
        }
    }

    /// Cache under `root`, or the user cache directory when `None`.
    #[must_use]
    pub fn from_root(root: Option<PathBuf>) -> Self {
        Self::new(root.unwrap_or_else(default_cache_root))
    }

    /// Get the cache root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn entry_dir(&self, tool: &str, version: &str) -> PathBuf {
        self.root.join(tool).join(version).join(self.arch.to_string())
    }

    fn marker(&self, tool: &str, version: &str) -> PathBuf {
        self.root
            .join(tool)
            .join(version)
            .join(format!("{}.complete", self.arch))
    }
}

impl ToolCache for DirToolCache {
    fn find(&self, tool: &str, version: &str) -> Option<PathBuf> {
        let dir = self.entry_dir(tool, version);
        if dir.is_dir() && self.marker(tool, version).is_file() {
            trace!(tool, version, ?dir, "Cache hit");
            Some(dir)
        } else {
            trace!(tool, version, "Cache miss");
            None
        }
    }

    fn cache_dir(&self, source: &Path, tool: &str, version: &str) -> Result<PathBuf> {
        let dest = self.entry_dir(tool, version);
        let marker = self.marker(tool, version);

        // A leftover entry without a marker is an interrupted copy
        if dest.exists() {
            std::fs::remove_dir_all(&dest)?;
        }
        std::fs::create_dir_all(&dest)?;

        for entry in WalkDir::new(source).min_depth(1) {
            let entry = entry.map_err(std::io::Error::from)?;
            let relative = entry.path().strip_prefix(source).map_err(|e| {
                Error::configuration(format!("Unexpected path in {}: {e}", source.display()))
            })?;
            let target = dest.join(relative);

            if entry.file_type().is_dir() {
                std::fs::create_dir_all(&target)?;
            } else {
                std::fs::copy(entry.path(), &target)?;
            }
        }

        std::fs::write(&marker, "")?;
        debug!(tool, version, ?dest, "Stored tool in cache");
        Ok(dest)
    }
}

/// `~/.cache/helm-schema/tools`, or `.cache/helm-schema/tools` without a home.
fn default_cache_root() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from(".cache"))
        .join("helm-schema")
        .join("tools")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_find_empty_cache() {
        let temp = TempDir::new().unwrap();
        let cache = DirToolCache::new(temp.path().to_path_buf());
        assert!(cache.find("schema", "v1.0.0").is_none());
    }

    #[test]
    fn test_store_and_find() {
        let temp = TempDir::new().unwrap();
        let source = temp.path().join("extracted");
        std::fs::create_dir_all(source.join("docs")).unwrap();
        std::fs::write(source.join("schema"), b"binary").unwrap();
        std::fs::write(source.join("docs").join("README.md"), b"readme").unwrap();

        let cache = DirToolCache::new(temp.path().join("cache"));
        let cached = cache.cache_dir(&source, "schema", "v1.0.0").unwrap();

        assert_eq!(cache.find("schema", "v1.0.0"), Some(cached.clone()));
        assert_eq!(std::fs::read(cached.join("schema")).unwrap(), b"binary");
        assert_eq!(
            std::fs::read(cached.join("docs").join("README.md")).unwrap(),
            b"readme"
        );
        assert!(cache.find("schema", "v2.0.0").is_none());
    }

    #[test]
    fn test_entry_without_marker_is_a_miss() {
        let temp = TempDir::new().unwrap();
        let cache = DirToolCache::new(temp.path().to_path_buf());
        std::fs::create_dir_all(cache.entry_dir("schema", "v1.0.0")).unwrap();

        assert!(cache.find("schema", "v1.0.0").is_none());
    }

    #[test]
    fn test_layout() {
        let cache = DirToolCache::new(PathBuf::from("/tool-cache"));
        let dir = cache.entry_dir("schema", "v1.0.0");
        assert!(dir.starts_with("/tool-cache/schema/v1.0.0"));
        assert!(
            cache
                .marker("schema", "v1.0.0")
                .to_string_lossy()
                .ends_with(".complete")
        );
    }

    #[test]
    fn test_default_root() {
        let cache = DirToolCache::from_root(None);
        assert!(cache.root().ends_with("helm-schema/tools"));
    }
}
