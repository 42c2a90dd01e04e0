//! Results of a compilation run.

use std::path::PathBuf;

use serde::Serialize;
use xgen_cache::ManifestOutcome;

/// What happened to one asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum AssetStatus {
    /// The image (and symbols, if requested) was produced.
    Compiled {
        /// The compiled image.
        output: PathBuf,
    },
    /// The image was produced but symbol emission failed.
    SymbolsFailed {
        /// The compiled image.
        output: PathBuf,
        /// Why symbol emission failed.
        message: String,
    },
    /// No input file was found for the asset.
    Missing,
    /// The compiler failed on the asset.
    Failed {
        /// Why compilation failed.
        message: String,
    },
}

/// Result for one asset of a library.
#[derive(Debug, Clone, Serialize)]
pub struct AssetReport {
    /// Package-relative asset path.
    pub asset: String,
    /// Outcome.
    #[serde(flatten)]
    pub status: AssetStatus,
}

/// Result for one library of the graph.
#[derive(Debug, Clone, Serialize)]
pub struct LibraryReport {
    /// Library name.
    pub name: String,
    /// Library version.
    pub version: String,
    /// Whether the strategy selected the library.
    pub processed: bool,
    /// Per-asset results, in asset order.
    pub assets: Vec<AssetReport>,
    /// Manifest outcome from the completion step, if the strategy keeps one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<ManifestOutcome>,
    /// Completion-step failure recorded under the continue policy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_error: Option<String>,
}

impl LibraryReport {
    pub(crate) fn skipped(name: &str, version: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            processed: false,
            assets: Vec::new(),
            manifest: None,
            cache_error: None,
        }
    }

    /// Returns `true` if any asset failed or the completion step failed.
    pub fn has_failures(&self) -> bool {
        self.cache_error.is_some()
            || self.assets.iter().any(|a| {
                matches!(
                    a.status,
                    AssetStatus::Failed { .. } | AssetStatus::SymbolsFailed { .. }
                )
            })
    }
}

/// Result of a whole run, one entry per library in graph order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    /// Per-library results.
    pub libraries: Vec<LibraryReport>,
}

impl RunReport {
    /// Number of libraries the strategy selected.
    pub fn processed_count(&self) -> usize {
        self.libraries.iter().filter(|l| l.processed).count()
    }

    /// Number of libraries the strategy skipped.
    pub fn skipped_count(&self) -> usize {
        self.libraries.len() - self.processed_count()
    }

    /// Number of assets that produced an image.
    pub fn compiled_count(&self) -> usize {
        self.count_assets(|s| {
            matches!(
                s,
                AssetStatus::Compiled { .. } | AssetStatus::SymbolsFailed { .. }
            )
        })
    }

    /// Number of assets the compiler failed on.
    pub fn failed_count(&self) -> usize {
        self.count_assets(|s| matches!(s, AssetStatus::Failed { .. }))
    }

    /// Number of assets with no input file.
    pub fn missing_count(&self) -> usize {
        self.count_assets(|s| matches!(s, AssetStatus::Missing))
    }

    /// Returns `true` if any library reported a failure.
    pub fn has_failures(&self) -> bool {
        self.libraries.iter().any(LibraryReport::has_failures)
    }

    fn count_assets(&self, pred: impl Fn(&AssetStatus) -> bool) -> usize {
        self.libraries
            .iter()
            .flat_map(|l| &l.assets)
            .filter(|a| pred(&a.status))
            .count()
    }
}
