//! Resolved dependency-graph snapshots.
//!
//! The graph is produced by an external resolver and handed to xgen as a JSON
//! document listing runtime libraries with their versions, package hashes,
//! servicing flags, and runtime assets.

#![warn(missing_docs)]

pub mod error;
pub mod graph;
pub mod loader;

pub use error::GraphError;
pub use graph::{DependencyGraph, GraphTarget};
pub use loader::{load_graph, load_graph_from_str};
