//! Error types for dependency-graph loading.

use std::path::PathBuf;

/// Errors that can occur when loading a dependency-graph snapshot.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    /// The snapshot file could not be read.
    #[error("failed to read dependency graph {path}: {source}")]
    Io {
        /// The snapshot path.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The snapshot is not valid JSON or does not match the expected shape.
    #[error("failed to parse dependency graph: {0}")]
    Parse(String),

    /// The snapshot parsed but describes an inconsistent graph.
    #[error("invalid dependency graph: {0}")]
    Invalid(String),
}
