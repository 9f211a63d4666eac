//! Locating the helper executable inside an extracted release.
//!
//! Only the top level of the directory is scanned; subdirectories are never
//! matched or descended into.

use helm_schema_core::platform::Platform;
use helm_schema_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::trace;

/// Find the helper executable directly inside `root`.
///
/// `root` itself is made world-accessible first. Fails with
/// [`Error::ExecutableNotFound`] when no regular file named
/// [`Platform::executable_name`] exists at the top level.
pub fn find_executable(root: &Path, platform: &Platform) -> Result<PathBuf> {
    make_world_executable(root)?;
    let target = platform.executable_name();

    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let path = entry.path();

        if std::fs::metadata(&path)?.is_dir() {
            trace!(?path, "Skipping directory");
            continue;
        }

        trace!(file = ?entry.file_name(), "Inspecting file");
        if entry.file_name() == target.as_str() {
            return Ok(path);
        }
    }

    Err(Error::executable_not_found(root))
}

/// Set permission bits 0777 on `path`. No-op on non-Unix hosts.
pub fn make_world_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o777))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
