//! Version handling for index anchor labels
//!
//! Index pages only carry free-text labels such as `requests-2.31.0.tar.gz`.
//! This module turns those labels into comparable version strings.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐
//! │  Normalize  │────▶│   Compare   │
//! │ (label→ver) │     │  (ordering) │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`normalize`]: Extracts and canonicalizes the dotted version from a label
//! - [`compare`]: Numeric segment-wise ordering and precision matching

pub mod compare;
pub mod normalize;

pub use compare::{compare, equal_at_precision, sort_descending_by};
pub use normalize::normalize;
