//! Downloading and unpacking release archives.

use async_trait::async_trait;
use flate2::read::GzDecoder;
use helm_schema_core::{Error, Result};
use reqwest::Client;
use std::path::{Path, PathBuf};
use tar::Archive;
use tracing::debug;

/// Fetches a release archive and unpacks it.
#[async_trait]
pub trait ReleaseFetcher: Send + Sync {
    /// Download `url` to a local file and return its path.
    async fn download(&self, url: &str) -> Result<PathBuf>;

    /// Unpack a `.tgz` archive into a fresh directory and return it.
    async fn extract(&self, archive: &Path) -> Result<PathBuf>;
}

/// [`ReleaseFetcher`] backed by HTTPS downloads from GitHub.
pub struct HttpReleaseFetcher {
    client: Client,
    temp_root: PathBuf,
    token: Option<String>,
}

impl HttpReleaseFetcher {
    /// Create a fetcher that stages files under `temp_root`.
    pub fn new(temp_root: PathBuf) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("helm-schema/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {e}")))?;
        Ok(Self {
            client,
            temp_root,
            token: None,
        })
    }

    /// Authenticate downloads with a GitHub token.
    #[must_use]
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }
}

#[async_trait]
impl ReleaseFetcher for HttpReleaseFetcher {
    async fn download(&self, url: &str) -> Result<PathBuf> {
        debug!(%url, "Downloading release archive");

        let mut request = self.client.get(url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::download(url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::download(url, format!("HTTP {}", response.status())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::download(url, e.to_string()))?;

        tokio::fs::create_dir_all(&self.temp_root).await?;
        let staged = tempfile::Builder::new()
            .prefix("helm-schema-")
            .suffix(".tgz")
            .tempfile_in(&self.temp_root)?;
        let (_, path) = staged.keep().map_err(|e| Error::Io(e.error))?;
        tokio::fs::write(&path, &bytes).await?;

        debug!(?path, size = bytes.len(), "Downloaded release archive");
        Ok(path)
    }

    async fn extract(&self, archive: &Path) -> Result<PathBuf> {
        let archive_path = archive.to_path_buf();
        let temp_root = self.temp_root.clone();

        tokio::task::spawn_blocking(move || extract_tgz(&archive_path, &temp_root))
            .await
            .map_err(|e| Error::extraction(archive, e.to_string()))?
    }
}

/// Unpack a gzip-compressed tarball into a new directory under `temp_root`.
pub fn extract_tgz(archive: &Path, temp_root: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(temp_root)?;
    let dest = tempfile::Builder::new()
        .prefix("helm-schema-")
        .tempdir_in(temp_root)?
        .keep();

    let file = std::fs::File::open(archive)?;
    let mut tarball = Archive::new(GzDecoder::new(file));
    tarball
        .unpack(&dest)
        .map_err(|e| Error::extraction(archive, e.to_string()))?;

    debug!(?archive, ?dest, "Extracted release archive");
    Ok(dest)
}
