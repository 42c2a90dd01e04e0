//! Shared foundational types used across the xgen native-image toolchain.
//!
//! This crate provides the compilation target descriptor, the framework
//! moniker, the runtime library descriptor consumed from a resolved dependency
//! graph, and parsing of `{algorithm}-{value}` package hash strings.

#![warn(missing_docs)]

pub mod hash;
pub mod library;
pub mod target;

pub use hash::{HashAlgorithm, HashFormatError, LibraryHash};
pub use library::RuntimeLibrary;
pub use target::{Framework, TargetDescriptor};
