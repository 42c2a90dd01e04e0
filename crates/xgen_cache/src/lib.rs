//! Optimization cache layout and hash manifest management.
//!
//! Compiled native images for a library are gathered under one root per
//! `(architecture, name, version)`. Next to them sits a single-value manifest
//! recording the package hash the images were produced from, so later runs
//! (possibly from other applications sharing the tree) can tell whether the
//! cached images still match their source package.

#![warn(missing_docs)]

pub mod error;
pub mod layout;
pub mod manifest;

pub use error::CacheError;
pub use layout::LibraryLayout;
pub use manifest::{ManifestOutcome, ManifestStatus, ManifestValidator};
