//! Deterministic per-library output layout of the optimization cache.
//!
//! Every library gets one root at `{output}/{arch}/{name}/{version}`; assets
//! keep their containing directory below that root, and the hash manifest
//! sits directly in it as `{name}.{version}.nupkg.sha512`.

use std::path::{Path, PathBuf};

use xgen_common::{RuntimeLibrary, TargetDescriptor};

/// Extension of the per-library hash manifest.
const MANIFEST_EXT: &str = "nupkg.sha512";

/// Maps libraries and their assets to locations in the output tree.
#[derive(Debug, Clone)]
pub struct LibraryLayout {
    output_root: PathBuf,
    arch: String,
}

impl LibraryLayout {
    /// Creates a layout rooted at `output_root` for the given target.
    pub fn new(output_root: &Path, target: &TargetDescriptor) -> Self {
        Self {
            output_root: output_root.to_path_buf(),
            arch: target.arch_segment().to_string(),
        }
    }

    /// Returns `{output}/{arch}/{name}/{version}`.
    pub fn library_root(&self, lib: &RuntimeLibrary) -> PathBuf {
        self.output_root
            .join(&self.arch)
            .join(&lib.name)
            .join(&lib.version)
    }

    /// Returns the output directory for one asset of `lib`.
    ///
    /// This is the library root joined with the asset's containing directory;
    /// the file name is dropped.
    pub fn output_dir_for(&self, lib: &RuntimeLibrary, asset: &str) -> PathBuf {
        let mut dir = self.library_root(lib);
        let mut components: Vec<&str> = asset.split('/').filter(|c| !c.is_empty()).collect();
        components.pop();
        for component in components {
            dir.push(component);
        }
        dir
    }

    /// Returns the path of the library's hash manifest.
    pub fn manifest_path(&self, lib: &RuntimeLibrary) -> PathBuf {
        self.library_root(lib)
            .join(format!("{}.{}.{MANIFEST_EXT}", lib.name, lib.version))
    }
}
