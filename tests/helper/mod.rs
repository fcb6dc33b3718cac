//! Test utilities: in-memory index and download collaborators

#![allow(dead_code)]

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use async_trait::async_trait;

use pypi_get::error::{DownloadError, IndexError};
use pypi_get::fetch::Downloader;
use pypi_get::index::{IndexSource, RawEntry};

/// Mock index serving fixed anchors per package
#[derive(Default)]
pub struct MockIndex {
    pages: HashMap<String, Vec<RawEntry>>,
}

impl MockIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a package page; each entry is `(label, href)`
    pub fn with_page(mut self, package: &str, entries: Vec<(&str, &str)>) -> Self {
        self.pages.insert(
            package.to_string(),
            entries
                .into_iter()
                .map(|(label, href)| RawEntry::new(label, href))
                .collect(),
        );
        self
    }
}

#[async_trait]
impl IndexSource for MockIndex {
    async fn fetch_index(
        &self,
        _base_url: &str,
        package_name: &str,
    ) -> Result<Vec<RawEntry>, IndexError> {
        match self.pages.get(package_name) {
            Some(entries) => Ok(entries.clone()),
            None => Err(IndexError::NotFound(package_name.to_string())),
        }
    }
}

/// Downloader that records every call and pretends each body has a fixed size
pub struct RecordingDownloader {
    size: u64,
    failing_urls: Vec<String>,
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl RecordingDownloader {
    pub fn new(size: u64) -> Self {
        Self {
            size,
            failing_urls: Vec::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_on(mut self, url: &str) -> Self {
        self.failing_urls.push(url.to_string());
        self
    }

    pub fn calls(&self) -> Vec<(String, PathBuf)> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort();
        calls
    }
}

#[async_trait]
impl Downloader for RecordingDownloader {
    async fn download(&self, url: &str, destination: &Path) -> Result<u64, DownloadError> {
        self.calls
            .lock()
            .unwrap()
            .push((url.to_string(), destination.to_path_buf()));

        if self.failing_urls.iter().any(|failing| failing == url) {
            return Err(DownloadError::Status(500));
        }
        Ok(self.size)
    }
}
