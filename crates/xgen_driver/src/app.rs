//! Application-local output strategy.

use std::path::{Path, PathBuf};

use xgen_common::RuntimeLibrary;

use crate::strategy::CrossGenStrategy;

/// Compiles every library that has runtime assets into one flat directory.
///
/// This is the plain behaviour of the traversal: no cache layout and no hash
/// manifests, so [`on_complete`](CrossGenStrategy::on_complete) keeps its
/// default no-op.
#[derive(Debug, Clone)]
pub struct AppLocalStrategy {
    output_dir: PathBuf,
}

impl AppLocalStrategy {
    /// Creates a strategy writing all images into `output_dir`.
    pub fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
        }
    }
}

impl CrossGenStrategy for AppLocalStrategy {
    fn should_process(&self, lib: &RuntimeLibrary) -> bool {
        !lib.assets.is_empty()
    }

    fn output_dir_for(&self, _source: &Path, _lib: &RuntimeLibrary, _asset: &str) -> PathBuf {
        self.output_dir.clone()
    }
}
