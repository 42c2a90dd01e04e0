//! Runtime library descriptors taken from a resolved dependency graph.

use serde::{Deserialize, Serialize};

/// A runtime library (package) from a resolved dependency graph.
///
/// Descriptors are produced by an external resolver and consumed read-only.
/// Asset paths are relative to the package root and use `/` separators, as
/// they appear in dependency manifests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeLibrary {
    /// Package name (e.g. `System.Collections`).
    pub name: String,
    /// Package version (e.g. `4.0.11`).
    pub version: String,
    /// Package hash as `{algorithm}-{value}`.
    #[serde(default)]
    pub hash: String,
    /// Whether the package participates in independent servicing.
    #[serde(default)]
    pub serviceable: bool,
    /// Runtime asset paths relative to the package root.
    #[serde(default)]
    pub assets: Vec<String>,
}

impl RuntimeLibrary {
    /// Returns `name.version`, the identity used in messages and file names.
    pub fn id(&self) -> String {
        format!("{}.{}", self.name, self.version)
    }
}
