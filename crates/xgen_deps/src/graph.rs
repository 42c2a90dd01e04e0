//! In-memory dependency-graph model.

use serde::{Deserialize, Serialize};
use xgen_common::RuntimeLibrary;

/// Target information recorded by the resolver alongside the graph.
///
/// Informational only; the compilation target comes from project
/// configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphTarget {
    /// Framework moniker the graph was resolved for.
    pub framework: String,
    /// Runtime identifier the graph was resolved for, if any.
    #[serde(default)]
    pub rid: Option<String>,
}

/// A resolved dependency graph flattened to its runtime libraries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
    /// Target the resolver produced this graph for.
    #[serde(default)]
    pub target: Option<GraphTarget>,
    /// Runtime libraries in document order.
    #[serde(default)]
    pub libraries: Vec<RuntimeLibrary>,
}

impl DependencyGraph {
    /// Creates a graph from a list of libraries.
    pub fn new(libraries: Vec<RuntimeLibrary>) -> Self {
        Self {
            target: None,
            libraries,
        }
    }

    /// Returns the runtime libraries in document order.
    pub fn libraries(&self) -> &[RuntimeLibrary] {
        &self.libraries
    }

    /// Returns the runtime identifier the graph was resolved for, if it
    /// names one that differs from `rid`.
    pub fn rid_mismatch(&self, rid: &str) -> Option<&str> {
        self.target
            .as_ref()
            .and_then(|t| t.rid.as_deref())
            .filter(|resolved| *resolved != rid)
    }

    /// Returns the number of serviceable libraries.
    pub fn serviceable_count(&self) -> usize {
        self.libraries.iter().filter(|lib| lib.serviceable).count()
    }
}
