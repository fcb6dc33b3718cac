//! Release catalog and selection
//!
//! - [`catalog`]: Builds [`Release`] records from index anchors
//! - [`selector`]: Resolves the target version and filters releases

pub mod catalog;
pub mod selector;

pub use catalog::{Release, build_catalog};
pub use selector::{Selection, select_releases};
