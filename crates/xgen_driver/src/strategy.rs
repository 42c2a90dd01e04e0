//! The extension seam between the traversal and its output strategies.

use std::path::{Path, PathBuf};

use xgen_cache::{CacheError, ManifestOutcome};
use xgen_common::RuntimeLibrary;

/// Decisions the [`Orchestrator`](crate::Orchestrator) delegates while
/// walking a dependency graph.
///
/// Implementations must be `Sync`: with parallel traversal, different
/// libraries are handled on different threads. Calls for one library are
/// never concurrent.
pub trait CrossGenStrategy: Sync {
    /// Returns `true` if the assets of `lib` should be compiled at all.
    ///
    /// A `false` library is skipped entirely: no directories are created and
    /// [`on_complete`](Self::on_complete) is not called.
    fn should_process(&self, lib: &RuntimeLibrary) -> bool;

    /// Returns the directory that receives the compiled image of one asset.
    ///
    /// `source` is the input file the traversal located for `asset`, which is
    /// the asset's package-relative path.
    fn output_dir_for(&self, source: &Path, lib: &RuntimeLibrary, asset: &str) -> PathBuf;

    /// Called exactly once per processed library, after all of its assets.
    fn on_complete(&self, _lib: &RuntimeLibrary) -> Result<Option<ManifestOutcome>, CacheError> {
        Ok(None)
    }
}
