//! Package index access
//!
//! - [`IndexSource`]: trait for listing the anchors of one package's index page
//! - [`simple`]: HTTP client for PyPI-style "simple" HTML pages

pub mod simple;

pub use simple::SimpleIndexClient;

#[cfg(test)]
use mockall::automock;

use crate::error::IndexError;

/// One anchor from an index page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEntry {
    /// Anchor text as displayed on the page
    pub label: String,
    /// Anchor target, absolute or relative to `<base_url><package>/`
    pub href: String,
}

impl RawEntry {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }
}

/// Trait for fetching the anchors listed for a package
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait IndexSource: Send + Sync {
    /// Fetches every anchor on `<base_url><package_name>`
    ///
    /// # Returns
    /// * `Ok(Vec<RawEntry>)` - Anchors in page order
    /// * `Err(IndexError::NotFound)` - If the index has no page for the package
    /// * `Err(IndexError)` - If the page could not be fetched or parsed
    async fn fetch_index(
        &self,
        base_url: &str,
        package_name: &str,
    ) -> Result<Vec<RawEntry>, IndexError>;
}
