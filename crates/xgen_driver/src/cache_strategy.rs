//! Shared optimization cache output strategy.

use std::path::{Path, PathBuf};

use xgen_cache::{CacheError, LibraryLayout, ManifestOutcome, ManifestValidator};
use xgen_common::{RuntimeLibrary, TargetDescriptor};

use crate::strategy::CrossGenStrategy;

/// Compiles serviceable libraries into a shared optimization cache.
///
/// Outputs land under `{output}/{arch}/{name}/{version}` and each completed
/// library's hash manifest is reconciled with its package hash.
#[derive(Debug, Clone)]
pub struct OptimizationCacheStrategy {
    validator: ManifestValidator,
}

impl OptimizationCacheStrategy {
    /// Creates a cache strategy writing below `output_root`.
    pub fn new(output_root: &Path, target: &TargetDescriptor, overwrite_on_conflict: bool) -> Self {
        Self {
            validator: ManifestValidator::new(
                LibraryLayout::new(output_root, target),
                overwrite_on_conflict,
            ),
        }
    }
}

impl CrossGenStrategy for OptimizationCacheStrategy {
    fn should_process(&self, lib: &RuntimeLibrary) -> bool {
        lib.serviceable
    }

    fn output_dir_for(&self, _source: &Path, lib: &RuntimeLibrary, asset: &str) -> PathBuf {
        self.validator.layout().output_dir_for(lib, asset)
    }

    fn on_complete(&self, lib: &RuntimeLibrary) -> Result<Option<ManifestOutcome>, CacheError> {
        self.validator.reconcile(lib).map(Some)
    }
}
