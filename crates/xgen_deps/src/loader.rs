//! Dependency-graph snapshot loading and validation.

use std::collections::HashSet;
use std::path::Path;

use crate::error::GraphError;
use crate::graph::DependencyGraph;

/// Loads and validates a dependency-graph snapshot from a JSON file.
pub fn load_graph(path: &Path) -> Result<DependencyGraph, GraphError> {
    let content = std::fs::read_to_string(path).map_err(|e| GraphError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_graph_from_str(&content)
}

/// Parses and validates a dependency-graph snapshot from a string.
pub fn load_graph_from_str(content: &str) -> Result<DependencyGraph, GraphError> {
    let graph: DependencyGraph =
        serde_json::from_str(content).map_err(|e| GraphError::Parse(e.to_string()))?;
    validate_graph(&graph)?;
    Ok(graph)
}

/// Checks library identities and that they map to paths inside the output
/// tree. Hash strings are left to the manifest validator.
fn validate_graph(graph: &DependencyGraph) -> Result<(), GraphError> {
    let mut seen = HashSet::new();
    for (index, lib) in graph.libraries.iter().enumerate() {
        if lib.name.is_empty() {
            return Err(GraphError::Invalid(format!(
                "library at index {index} has an empty name"
            )));
        }
        if lib.version.is_empty() {
            return Err(GraphError::Invalid(format!(
                "library {} has an empty version",
                lib.name
            )));
        }
        for (field, value) in [("name", &lib.name), ("version", &lib.version)] {
            if !is_path_segment(value) {
                return Err(GraphError::Invalid(format!(
                    "library {} has an invalid {field} '{value}'",
                    lib.id()
                )));
            }
        }
        if let Some(asset) = lib.assets.iter().find(|a| !is_relative_asset(a)) {
            return Err(GraphError::Invalid(format!(
                "library {} has an invalid asset path '{asset}'",
                lib.id()
            )));
        }
        if !seen.insert((lib.name.as_str(), lib.version.as_str())) {
            return Err(GraphError::Invalid(format!(
                "duplicate library {}",
                lib.id()
            )));
        }
    }
    Ok(())
}

/// Names and versions become single directory levels of the output tree.
fn is_path_segment(value: &str) -> bool {
    value != "." && value != ".." && !value.contains(['/', '\\'])
}

/// Assets must stay below the library root: relative, `/`-separated, no `..`.
fn is_relative_asset(asset: &str) -> bool {
    !asset.is_empty()
        && !asset.starts_with('/')
        && !asset.contains(['\\', ':'])
        && asset.split('/').all(|c| c != "..")
}
