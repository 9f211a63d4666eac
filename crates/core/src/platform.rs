//! Platform detection and release URL resolution.
//!
//! The helper binary is published as one `.tgz` per platform on GitHub
//! Releases. Every host maps to exactly one archive: unknown operating
//! systems fall back to `linux`, unknown architectures to `amd64`.

use std::fmt;

/// Name of the helper executable (without platform suffix) and its tool-cache key.
pub const PLUGIN_NAME: &str = "schema";

/// GitHub organisation publishing the helper releases.
pub const RELEASE_ORG: &str = "losisin";

/// GitHub repository publishing the helper releases.
pub const RELEASE_REPO: &str = "helm-values-schema-json";

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Os {
    Linux,
    Darwin,
    Windows,
}

impl Os {
    /// Get the current OS.
    #[must_use]
    pub fn current() -> Self {
        Self::parse(std::env::consts::OS)
    }

    /// Parse from an OS identifier (`std::env::consts::OS` or `uname`-style).
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "windows" | "windows_nt" => Self::Windows,
            "macos" | "darwin" => Self::Darwin,
            _ => Self::Linux,
        }
    }

    /// Suffix appended to executable file names.
    #[must_use]
    pub fn executable_suffix(self) -> &'static str {
        match self {
            Self::Windows => ".exe",
            Self::Linux | Self::Darwin => "",
        }
    }
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Linux => write!(f, "linux"),
            Self::Darwin => write!(f, "darwin"),
            Self::Windows => write!(f, "windows"),
        }
    }
}

/// CPU architecture bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    Arm64,
    Amd64,
}

impl Arch {
    /// Get the current architecture.
    #[must_use]
    pub fn current() -> Self {
        Self::parse(std::env::consts::ARCH)
    }

    /// Parse from an architecture identifier.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "arm64" | "aarch64" => Self::Arm64,
            _ => Self::Amd64,
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Arm64 => write!(f, "arm64"),
            Self::Amd64 => write!(f, "amd64"),
        }
    }
}

/// Platform identifier combining OS and architecture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Platform {
    pub os: Os,
    pub arch: Arch,
}

impl Platform {
    /// Create a new platform.
    #[must_use]
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }

    /// Get the current platform.
    #[must_use]
    pub fn current() -> Self {
        Self::new(Os::current(), Arch::current())
    }

    /// File name of the helper executable on this platform.
    #[must_use]
    pub fn executable_name(&self) -> String {
        format!("{PLUGIN_NAME}{}", self.os.executable_suffix())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.os, self.arch)
    }
}

/// Build the release archive URL for `version` on `platform`.
///
/// The tag segment keeps the version as given; the asset name drops a
/// leading `v`.
#[must_use]
pub fn release_url(version: &str, platform: &Platform) -> String {
    let bare = version.strip_prefix('v').unwrap_or(version);
    format!(
        "https://github.com/{RELEASE_ORG}/{RELEASE_REPO}/releases/download/{version}/{RELEASE_REPO}_{bare}_{}_{}.tgz",
        platform.os, platform.arch
    )
}

/// Release archive URL for `version` on the host platform.
#[must_use]
pub fn resolve_download_url(version: &str) -> String {
    release_url(version, &Platform::current())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_url_matrix() {
        let cases = [
            (Os::Linux, Arch::Arm64, "linux", "arm64"),
            (Os::Linux, Arch::Amd64, "linux", "amd64"),
            (Os::Darwin, Arch::Arm64, "darwin", "arm64"),
            (Os::Darwin, Arch::Amd64, "darwin", "amd64"),
            (Os::Windows, Arch::Arm64, "windows", "arm64"),
            (Os::Windows, Arch::Amd64, "windows", "amd64"),
        ];

        for (os, arch, os_token, arch_token) in cases {
            let url = release_url("v1.0.0", &Platform::new(os, arch));
            assert_eq!(
                url,
                format!(
                    "https://github.com/losisin/helm-values-schema-json/releases/download/v1.0.0/helm-values-schema-json_1.0.0_{os_token}_{arch_token}.tgz"
                )
            );
        }
    }

    #[test]
    fn test_release_url_without_leading_v() {
        let url = release_url("2.1.0", &Platform::new(Os::Linux, Arch::Amd64));
        assert!(url.contains("/download/2.1.0/"));
        assert!(url.ends_with("helm-values-schema-json_2.1.0_linux_amd64.tgz"));
    }

    #[test]
    fn test_os_parse() {
        assert_eq!(Os::parse("Linux"), Os::Linux);
        assert_eq!(Os::parse("Darwin"), Os::Darwin);
        assert_eq!(Os::parse("macos"), Os::Darwin);
        assert_eq!(Os::parse("Windows_NT"), Os::Windows);
        assert_eq!(Os::parse("windows"), Os::Windows);
        // Unknown families land in the linux bucket
        assert_eq!(Os::parse("freebsd"), Os::Linux);
    }

    #[test]
    fn test_arch_parse_defaults_to_amd64() {
        assert_eq!(Arch::parse("arm64"), Arch::Arm64);
        assert_eq!(Arch::parse("aarch64"), Arch::Arm64);
        assert_eq!(Arch::parse("x86_64"), Arch::Amd64);
        assert_eq!(Arch::parse("x64"), Arch::Amd64);
        assert_eq!(Arch::parse("riscv64"), Arch::Amd64);
    }

    #[test]
    fn test_executable_name() {
        assert_eq!(
            Platform::new(Os::Linux, Arch::Amd64).executable_name(),
            "schema"
        );
        assert_eq!(
            Platform::new(Os::Windows, Arch::Amd64).executable_name(),
            "schema.exe"
        );
    }

    #[test]
    fn test_platform_display() {
        let p = Platform::new(Os::Darwin, Arch::Arm64);
        assert_eq!(format!("{p}"), "darwin_arm64");
    }

    #[test]
    fn test_resolve_download_url_uses_host() {
        let url = resolve_download_url("v1.2.3");
        assert_eq!(url, release_url("v1.2.3", &Platform::current()));
    }
}
