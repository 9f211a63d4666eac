//! Error types shared across the helm-schema crates.

use miette::Diagnostic;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Main error type for helm-schema operations.
#[derive(Error, Debug, Diagnostic)]
pub enum Error {
    /// Invalid or unusable configuration.
    #[error("Configuration error: {0}")]
    #[diagnostic(code(helm_schema::config))]
    Configuration(String),

    /// The release archive could not be fetched.
    #[error("Failed to download plugin from: {url} ({message})")]
    #[diagnostic(
        code(helm_schema::download),
        help("check network access to github.com and that the release exists")
    )]
    Download {
        /// The attempted download URL.
        url: String,
        /// Underlying failure.
        message: String,
    },

    /// The downloaded archive could not be unpacked.
    #[error("Failed to extract {}: {message}", archive.display())]
    #[diagnostic(code(helm_schema::extract))]
    Extraction {
        /// The archive being extracted.
        archive: PathBuf,
        /// Underlying failure.
        message: String,
    },

    /// No helper executable exists at the searched level.
    #[error("JSON schema executable not found in path: {}", root.display())]
    #[diagnostic(code(helm_schema::locate))]
    ExecutableNotFound {
        /// The directory that was scanned.
        root: PathBuf,
    },

    /// The helper binary failed to launch or exited non-zero.
    #[error("{message}")]
    #[diagnostic(code(helm_schema::subprocess))]
    Subprocess {
        /// The program that was executed.
        program: PathBuf,
        /// Human readable failure, surfaced verbatim.
        message: String,
    },

    /// A git command failed.
    #[error("git {command} failed: {message}")]
    #[diagnostic(code(helm_schema::git))]
    Git {
        /// The git subcommand and arguments.
        command: String,
        /// Captured stderr or launch error.
        message: String,
    },

    /// IO error.
    #[error("IO error: {0}")]
    #[diagnostic(code(helm_schema::io))]
    Io(#[from] std::io::Error),

    /// YAML parse error.
    #[error("YAML error: {0}")]
    #[diagnostic(code(helm_schema::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl Error {
    /// Create a configuration error.
    #[must_use]
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Create a download error.
    #[must_use]
    pub fn download(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Download {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Create an extraction error.
    #[must_use]
    pub fn extraction(archive: &Path, message: impl Into<String>) -> Self {
        Self::Extraction {
            archive: archive.to_path_buf(),
            message: message.into(),
        }
    }

    /// Create an executable-not-found error.
    #[must_use]
    pub fn executable_not_found(root: &Path) -> Self {
        Self::ExecutableNotFound {
            root: root.to_path_buf(),
        }
    }

    /// Create a subprocess error.
    #[must_use]
    pub fn subprocess(program: &Path, message: impl Into<String>) -> Self {
        Self::Subprocess {
            program: program.to_path_buf(),
            message: message.into(),
        }
    }

    /// Create a git error.
    #[must_use]
    pub fn git(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Git {
            command: command.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for helm-schema operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executable_not_found_names_root() {
        let err = Error::executable_not_found(Path::new("/some/dir"));
        assert_eq!(
            err.to_string(),
            "JSON schema executable not found in path: /some/dir"
        );
    }

    #[test]
    fn test_subprocess_message_is_verbatim() {
        let err = Error::subprocess(
            Path::new("/bin/schema"),
            "The process '/bin/schema' failed with exit code 1",
        );
        assert_eq!(
            err.to_string(),
            "The process '/bin/schema' failed with exit code 1"
        );
    }

    #[test]
    fn test_download_error_carries_url() {
        let err = Error::download("https://example.com/a.tgz", "HTTP 404 Not Found");
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/a.tgz"));
        assert!(msg.contains("404"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: Error = io.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
