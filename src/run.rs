//! Drives each package request through index → catalog → selection → download

use std::io::Write;

use tracing::{error, info, warn};

use crate::config::{Config, ReleaseRequest};
use crate::error::IndexError;
use crate::fetch::{Downloader, FetchOptions, FetchReport, fetch_releases};
use crate::index::IndexSource;
use crate::release::{Selection, build_catalog, select_releases};

/// What happened to one package request
#[derive(Debug)]
pub enum PackageOutcome {
    /// The index lists nothing for the package
    NoReleases,
    /// Releases exist but none matched the requested version/extension
    NoMatch { resolved_version: String },
    /// One report per matched release
    Fetched(Vec<FetchReport>),
    /// The index page could not be fetched or understood
    IndexFailed(IndexError),
}

#[derive(Debug)]
pub struct PackageReport {
    pub request: ReleaseRequest,
    pub outcome: PackageOutcome,
}

impl PackageReport {
    /// User-facing lines for this package, in order
    pub fn lines(&self) -> Vec<String> {
        match &self.outcome {
            PackageOutcome::NoReleases => {
                vec![format!("No releases found for {}", self.request.name)]
            }
            PackageOutcome::NoMatch { .. } => vec![no_match_message(&self.request)],
            PackageOutcome::Fetched(reports) => reports
                .iter()
                .map(|report| match &report.outcome {
                    Ok(bytes) => format!("{} downloaded ({} bytes)", report.file_name, bytes),
                    Err(e) => format!("{} failed: {}", report.file_name, e),
                })
                .collect(),
            PackageOutcome::IndexFailed(e) => {
                vec![format!(
                    "Failed to fetch index for {}: {}",
                    self.request.name, e
                )]
            }
        }
    }

    pub fn downloaded(&self) -> usize {
        match &self.outcome {
            PackageOutcome::Fetched(reports) => reports.iter().filter(|r| r.is_success()).count(),
            _ => 0,
        }
    }

    /// Failed downloads plus a failed index fetch; selection misses do not count
    pub fn failures(&self) -> usize {
        match &self.outcome {
            PackageOutcome::Fetched(reports) => reports.iter().filter(|r| !r.is_success()).count(),
            PackageOutcome::IndexFailed(_) => 1,
            PackageOutcome::NoReleases | PackageOutcome::NoMatch { .. } => 0,
        }
    }
}

/// Totals across all package requests of a run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub downloaded: usize,
    pub failures: usize,
}

impl RunSummary {
    pub fn is_success(&self) -> bool {
        self.failures == 0
    }
}

/// `No releases found for <name>[=<version>][ (<extension>)]`
fn no_match_message(request: &ReleaseRequest) -> String {
    let mut message = format!("No releases found for {}", request.name);
    if !request.version.is_empty() {
        message.push('=');
        message.push_str(&request.version);
    }
    if !request.extension.is_empty() {
        message.push_str(&format!(" ({})", request.extension));
    }
    message
}

/// Resolve and download one package request.
///
/// Never fails: every problem is captured in the returned report.
pub async fn process_request(
    index: &dyn IndexSource,
    downloader: &dyn Downloader,
    request: &ReleaseRequest,
    options: &FetchOptions,
) -> PackageReport {
    let outcome = resolve_and_fetch(index, downloader, request, options).await;
    PackageReport {
        request: request.clone(),
        outcome,
    }
}

async fn resolve_and_fetch(
    index: &dyn IndexSource,
    downloader: &dyn Downloader,
    request: &ReleaseRequest,
    options: &FetchOptions,
) -> PackageOutcome {
    let entries = match index.fetch_index(&request.base_url, &request.name).await {
        Ok(entries) => entries,
        Err(IndexError::NotFound(name)) => {
            info!("Index has no page for {}", name);
            return PackageOutcome::NoReleases;
        }
        Err(e) => {
            error!("Failed to fetch index for {}: {}", request.name, e);
            return PackageOutcome::IndexFailed(e);
        }
    };

    let releases = match build_catalog(request, entries) {
        Ok(releases) => releases,
        Err(e) => {
            error!("Failed to build catalog for {}: {}", request.name, e);
            return PackageOutcome::IndexFailed(e);
        }
    };

    match select_releases(&releases, &request.version, &request.extension) {
        Selection::NoReleases => PackageOutcome::NoReleases,
        Selection::NoMatch { resolved_version } => {
            warn!(
                "No release of {} matched version {:?} and extension {:?}",
                request.name, resolved_version, request.extension
            );
            PackageOutcome::NoMatch { resolved_version }
        }
        Selection::Matched {
            resolved_version,
            matches,
        } => {
            info!(
                "Fetching {} files of {} {}",
                matches.len(),
                request.name,
                resolved_version
            );
            PackageOutcome::Fetched(fetch_releases(downloader, &matches, options).await)
        }
    }
}

/// Process every request in order, writing each package's lines to `out`
/// as soon as it finishes.
pub async fn run_requests<W: Write>(
    index: &dyn IndexSource,
    downloader: &dyn Downloader,
    config: &Config,
    out: &mut W,
) -> std::io::Result<RunSummary> {
    let options = FetchOptions {
        output_dir: config.output_dir.clone(),
    };
    let mut summary = RunSummary::default();

    for request in &config.requests {
        let report = process_request(index, downloader, request, &options).await;

        for line in report.lines() {
            writeln!(out, "{line}")?;
        }
        out.flush()?;

        summary.downloaded += report.downloaded();
        summary.failures += report.failures();
    }

    Ok(summary)
}
