//! Working-tree change status.

use std::path::{Component, Path, PathBuf};

/// One entry of `git status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    /// Path relative to the working directory.
    pub path: PathBuf,
    /// Index (staged) status code.
    pub index: char,
    /// Working-tree status code.
    pub working_dir: char,
}

impl FileStatus {
    /// Whether the file was added, modified, renamed or is untracked.
    #[must_use]
    pub fn is_changed(&self) -> bool {
        self.index != ' ' || self.working_dir != ' '
    }
}

/// Files reported as changed since the last commit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeStatus {
    pub files: Vec<FileStatus>,
}

impl ChangeStatus {
    /// Status listing `paths` as modified in the working tree.
    pub fn from_paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            files: paths
                .into_iter()
                .map(|p| FileStatus {
                    path: p.into(),
                    index: ' ',
                    working_dir: 'M',
                })
                .collect(),
        }
    }

    /// Whether `path` is listed as changed.
    ///
    /// `./` components are ignored on both sides, so `./values.schema.json`
    /// matches `values.schema.json`.
    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        let wanted = normalize(path);
        self.files
            .iter()
            .any(|f| f.is_changed() && normalize(&f.path) == wanted)
    }

    /// Whether the working tree is clean.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}
