//! PyPI "simple" index client
//!
//! Fetches `<base_url><package>` and yields one [`RawEntry`] per `<a href>`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::USER_AGENT;
use crate::error::IndexError;
use crate::index::{IndexSource, RawEntry};

/// HTTP client for simple index pages
pub struct SimpleIndexClient {
    client: Client,
    idle_timeout: Duration,
}

impl SimpleIndexClient {
    /// `idle_timeout` bounds connecting and each read of the page.
    pub fn new(idle_timeout: Duration) -> Result<Self, IndexError> {
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

    fn map_network_error(&self, e: reqwest::Error) -> IndexError {
        if e.is_timeout() {
            IndexError::Timeout(self.idle_timeout.as_secs())
        } else {
            IndexError::Network(e)
        }
    }
}

#[async_trait]
impl IndexSource for SimpleIndexClient {
    async fn fetch_index(
        &self,
        base_url: &str,
        package_name: &str,
    ) -> Result<Vec<RawEntry>, IndexError> {
        let url = format!("{base_url}{package_name}");
        debug!("Fetching index page: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.map_network_error(e))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(IndexError::NotFound(package_name.to_string()));
        }

        if !response.status().is_success() {
            return Err(IndexError::InvalidResponse(format!(
                "index returned status {}",
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.map_network_error(e))?;
        let entries = parse_anchors(&body)?;

        debug!("Found {} anchors for package {}", entries.len(), package_name);

        Ok(entries)
    }
}

/// Extract `(text, href)` from every `<a>` tag that has a non-empty `href`.
pub fn parse_anchors(html: &str) -> Result<Vec<RawEntry>, IndexError> {
    let dom = tl::parse(html, tl::ParserOptions::default())
        .map_err(|e| IndexError::Parse(format!("{e:?}")))?;
    let parser = dom.parser();

    let entries = dom
        .nodes()
        .iter()
        .filter_map(|node| node.as_tag())
        .filter(|tag| tag.name().as_bytes().eq_ignore_ascii_case(b"a"))
        .filter_map(|tag| {
            let href = tag.attributes().get("href").flatten()?.as_utf8_str();
            let href = html_escape::decode_html_entities(href.trim());
            if href.is_empty() {
                debug!("Skipping anchor without href");
                return None;
            }

            let text = tag.inner_text(parser);
            let label = html_escape::decode_html_entities(text.trim());
            Some(RawEntry::new(label.into_owned(), href.into_owned()))
        })
        .collect();

    Ok(entries)
}
