//! Downloads the selected releases of one package

use std::collections::HashSet;
use std::path::{Component, Path, PathBuf};
use std::time::Duration;

use futures::future::join_all;
use tokio::time::sleep;
use tracing::{error, info};

use crate::config::FETCH_STAGGER_DELAY_MS;
use crate::error::DownloadError;
use crate::fetch::downloader::Downloader;
use crate::release::Release;

/// Outcome of downloading one release
#[derive(Debug)]
pub struct FetchReport {
    pub file_name: String,
    pub url: String,
    /// Bytes written on success
    pub outcome: Result<u64, DownloadError>,
}

impl FetchReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}

/// Where to download
#[derive(Debug, Clone)]
pub struct FetchOptions {
    pub output_dir: PathBuf,
}

/// Download every release, one report per release in the same order.
///
/// Releases are independent: a failure is recorded in its report and the
/// others still run. Downloads start with a small stagger; stalled transfers
/// are ended by the downloader's idle timeout. When two releases share a file
/// name only the first is fetched.
pub async fn fetch_releases(
    downloader: &dyn Downloader,
    releases: &[Release],
    options: &FetchOptions,
) -> Vec<FetchReport> {
    let mut destinations = HashSet::new();

    let futures = releases.iter().enumerate().map(|(i, release)| {
        let duplicate = !destinations.insert(release.file_name.as_str());
        let delay = Duration::from_millis(FETCH_STAGGER_DELAY_MS * i as u64);
        async move {
            let outcome = if duplicate {
                Err(DownloadError::DuplicateDestination(release.file_name.clone()))
            } else {
                sleep(delay).await;
                fetch_one(downloader, release, &options.output_dir).await
            };

            match &outcome {
                Ok(bytes) => info!("Downloaded {} ({} bytes)", release.file_name, bytes),
                Err(e) => error!("Failed to download {}: {}", release.url, e),
            }

            FetchReport {
                file_name: release.file_name.clone(),
                url: release.url.clone(),
                outcome,
            }
        }
    });

    join_all(futures).await
}

async fn fetch_one(
    downloader: &dyn Downloader,
    release: &Release,
    output_dir: &Path,
) -> Result<u64, DownloadError> {
    let destination = destination(output_dir, &release.file_name)?;
    downloader.download(&release.url, &destination).await
}

/// `output_dir/file_name`, provided `file_name` is one plain component.
fn destination(output_dir: &Path, file_name: &str) -> Result<PathBuf, DownloadError> {
    let mut components = Path::new(file_name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(output_dir.join(file_name)),
        _ => Err(DownloadError::UnsafeDestination(file_name.to_string())),
    }
}
