//! Download release artifacts of packages listed on a PyPI-style simple index
//!
//! # Modules
//!
//! - [`config`]: Constants, [`config::Config`] and request token parsing
//! - [`error`]: Error types for configuration, index and download failures
//! - [`index`]: Index page client yielding raw anchors
//! - [`version`]: Version extraction and comparison
//! - [`release`]: Release catalog and selection
//! - [`fetch`]: Download orchestration
//! - [`run`]: Per-package pipeline and run summary

pub mod config;
pub mod error;
pub mod fetch;
pub mod index;
pub mod release;
pub mod run;
pub mod version;
