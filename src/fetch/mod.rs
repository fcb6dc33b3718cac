//! Release downloads
//!
//! - [`downloader`]: [`Downloader`] trait and the reqwest-backed [`HttpDownloader`]
//! - [`orchestrator`]: Runs the downloads for one package and reports per file

pub mod downloader;
pub mod orchestrator;

pub use downloader::{Downloader, HttpDownloader};
pub use orchestrator::{FetchOptions, FetchReport, fetch_releases};
