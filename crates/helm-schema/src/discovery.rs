//! Finding Helm charts for recursive runs.

use helm_schema_core::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// Marker file of a chart directory.
pub const CHART_FILE: &str = "Chart.yaml";

/// Chart directories below `root`, relative to it, in file-name order.
///
/// `root` itself is never a result and a chart's own subdirectories are not
/// searched, so nested subcharts belong to their parent.
pub fn find_charts(root: &Path) -> Result<Vec<PathBuf>> {
    let mut charts = Vec::new();
    let mut walker = WalkDir::new(root)
        .min_depth(1)
        .sort_by_file_name()
        .into_iter();

    while let Some(entry) = walker.next() {
        let entry = entry.map_err(std::io::Error::from)?;
        if !entry.file_type().is_dir() {
            continue;
        }
        if entry.file_name() == ".git" {
            walker.skip_current_dir();
            continue;
        }
        if entry.path().join(CHART_FILE).is_file() {
            let relative = entry.path().strip_prefix(root).map_err(|e| {
                Error::configuration(format!("Unexpected path under {}: {e}", root.display()))
            })?;
            trace!(chart = ?relative, "Found chart");
            charts.push(relative.to_path_buf());
            walker.skip_current_dir();
        }
    }

    Ok(charts)
}
