//! Error types for configuration, index access and downloads

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("url must start with http: {0}")]
    InvalidBaseUrl(String),

    #[error("no packages requested")]
    MissingPackages,

    #[error("empty package name in request {0:?}")]
    EmptyPackageName(String),
}

#[derive(Debug, Error)]
pub enum IndexError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Package not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to parse index page: {0}")]
    Parse(String),

    #[error("could not parse download url from {href}: {source}")]
    InvalidHref {
        href: String,
        #[source]
        source: url::ParseError,
    },

    #[error("download url {0} does not name a file")]
    UnsafeFileName(String),

    #[error("No progress for {0} seconds")]
    Timeout(u64),
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("server returned status {0}")]
    Status(u16),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("No progress for {0} seconds")]
    Timeout(u64),

    #[error("refusing to write {0:?} outside the output directory")]
    UnsafeDestination(String),

    #[error("{0} is already being downloaded by another release")]
    DuplicateDestination(String),
}
