//! Picks the releases to download from a package's catalog

use tracing::debug;

use crate::release::catalog::Release;
use crate::version::sort_descending_by;

/// Result of matching a catalog against a requested version and extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// The catalog was empty
    NoReleases,
    /// Releases exist but none matched the version/extension filter
    NoMatch { resolved_version: String },
    /// Matching releases, newest first, in catalog order for equal versions
    Matched {
        resolved_version: String,
        matches: Vec<Release>,
    },
}

/// Select the releases matching `requested_version` and `extension`.
///
/// An empty `requested_version` resolves to the highest version present.
/// Versions must be string-identical: requesting `1.0` does not match a
/// release normalized to `1.0.3`. The extension is a literal file name
/// suffix, so `gz` and `tar.gz` both match `pkg-1.0.tar.gz`.
pub fn select_releases(releases: &[Release], requested_version: &str, extension: &str) -> Selection {
    if releases.is_empty() {
        return Selection::NoReleases;
    }

    let mut sorted = releases.to_vec();
    sort_descending_by(&mut sorted, |release| release.version.as_str());

    let resolved_version = if requested_version.is_empty() {
        sorted[0].version.clone()
    } else {
        requested_version.to_string()
    };

    let matches: Vec<Release> = sorted
        .into_iter()
        .filter(|release| release.version == resolved_version)
        .filter(|release| extension.is_empty() || release.file_name.ends_with(extension))
        .collect();

    debug!(
        "Resolved version {:?} with {} matching releases",
        resolved_version,
        matches.len()
    );

    if matches.is_empty() {
        Selection::NoMatch { resolved_version }
    } else {
        Selection::Matched {
            resolved_version,
            matches,
        }
    }
}
