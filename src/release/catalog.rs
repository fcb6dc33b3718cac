//! Builds the release catalog of one package from its index anchors

use std::path::{Component, Path};

use tracing::debug;
use url::Url;

use crate::config::ReleaseRequest;
use crate::error::IndexError;
use crate::index::RawEntry;
use crate::version::normalize;

/// One downloadable artifact listed on an index page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub name: String,
    /// Normalized version, empty if the label carried none
    pub version: String,
    /// Absolute download URL
    pub url: String,
    /// Last path segment of `url`, used as the destination file name
    pub file_name: String,
}

/// Turn index anchors into releases, keeping page order and duplicates.
///
/// Relative hrefs are resolved against `<base_url><package>/`.
pub fn build_catalog(
    request: &ReleaseRequest,
    entries: impl IntoIterator<Item = RawEntry>,
) -> Result<Vec<Release>, IndexError> {
    let releases = entries
        .into_iter()
        .map(|entry| {
            let url = resolve_href(request, &entry.href)?;
            let file_name =
                file_name(&url).ok_or_else(|| IndexError::UnsafeFileName(url.to_string()))?;
            Ok(Release {
                name: request.name.clone(),
                version: normalize(&request.name, &entry.label),
                file_name,
                url: url.into(),
            })
        })
        .collect::<Result<Vec<_>, IndexError>>()?;

    debug!(
        "Built catalog of {} releases for {}",
        releases.len(),
        request.name
    );

    Ok(releases)
}

fn resolve_href(request: &ReleaseRequest, href: &str) -> Result<Url, IndexError> {
    let absolute = if href.starts_with("http") {
        href.to_string()
    } else {
        format!("{}{}/{}", request.base_url, request.name, href)
    };

    Url::parse(&absolute).map_err(|source| IndexError::InvalidHref {
        href: href.to_string(),
        source,
    })
}

/// Final non-empty path segment, percent-decoded.
///
/// Encoded separators (`%2F`, `%5C`) are split again after decoding so the
/// result is always a single plain path component. Returns `None` when
/// nothing usable is left (`..`, `.`, empty, drive prefixes).
pub fn file_name(url: &Url) -> Option<String> {
    let segment = url
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())?;

    let decoded = urlencoding::decode(segment)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| segment.to_string());
    let name = decoded.rsplit(['/', '\\']).next().unwrap_or_default();

    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Some(name.to_string()),
        _ => None,
    }
}
