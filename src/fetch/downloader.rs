//! HTTP downloader writing release files to disk

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tempfile::NamedTempFile;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::debug;

#[cfg(test)]
use mockall::automock;

use crate::config::USER_AGENT;
use crate::error::DownloadError;

/// Trait for transferring one file from a URL to a local path
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Downloader: Send + Sync {
    /// Downloads `url` into `destination`, returning the number of bytes written
    async fn download(&self, url: &str, destination: &Path) -> Result<u64, DownloadError>;
}

/// Streams response bodies into files with reqwest
///
/// The body goes to a hidden `.part` file next to the destination and is
/// renamed into place only once complete. A failed or dropped download
/// removes the partial file.
pub struct HttpDownloader {
    client: Client,
    idle_timeout: Duration,
}

impl HttpDownloader {
    /// `idle_timeout` bounds connecting and every read of the body; a
    /// transfer that keeps making progress is never cut off.
    pub fn new(idle_timeout: Duration) -> Result<Self, DownloadError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(idle_timeout)
            .read_timeout(idle_timeout)
            .build()?;
        Ok(Self::with_client(client, idle_timeout))
    }

    pub fn with_client(client: Client, idle_timeout: Duration) -> Self {
        Self {
            client,
            idle_timeout,
        }
    }

    fn map_network_error(&self, e: reqwest::Error) -> DownloadError {
        if e.is_timeout() {
            DownloadError::Timeout(self.idle_timeout.as_secs())
        } else {
            DownloadError::Network(e)
        }
    }

    async fn write_body(
        &self,
        mut response: reqwest::Response,
        partial: &NamedTempFile,
    ) -> Result<u64, DownloadError> {
        let mut file = File::from_std(partial.reopen()?);
        let mut written = 0u64;

        while let Some(chunk) = response
            .chunk()
            .await
            .map_err(|e| self.map_network_error(e))?
        {
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        Ok(written)
    }
}

#[async_trait]
impl Downloader for HttpDownloader {
    async fn download(&self, url: &str, destination: &Path) -> Result<u64, DownloadError> {
        debug!("Downloading {} to {:?}", url, destination);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| self.map_network_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Status(status.as_u16()));
        }

        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let partial = tempfile::Builder::new()
            .prefix(".pypi-get-")
            .suffix(".part")
            .tempfile_in(dir)?;

        let written = self.write_body(response, &partial).await?;
        partial.persist(destination).map_err(|e| e.error)?;

        Ok(written)
    }
}
