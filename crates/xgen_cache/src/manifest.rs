//! Per-library hash manifests.
//!
//! A manifest is a plain-text file holding only the hash value (without the
//! algorithm prefix) of the package a library's cached images were built
//! from. The validator writes it only when needed: a matching record is left
//! untouched, a conflicting one is either overwritten with a warning or
//! reported as an error, depending on configuration.

use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use xgen_common::{HashAlgorithm, LibraryHash, RuntimeLibrary};

use crate::error::CacheError;
use crate::layout::LibraryLayout;

/// What [`ManifestValidator::reconcile`] did for a library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ManifestOutcome {
    /// No manifest existed; a new one was written.
    Created,
    /// The manifest already held the same value; nothing was written.
    Unchanged,
    /// The manifest held a different value and was overwritten.
    Overwritten,
}

/// Read-only comparison of a library's manifest against its package hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ManifestStatus {
    /// No manifest exists for the library.
    Missing,
    /// The manifest matches the package hash.
    Current,
    /// The manifest records a different hash.
    Drifted {
        /// The value currently on disk.
        recorded: String,
    },
}

/// Reconciles per-library hash manifests in an optimization cache.
#[derive(Debug, Clone)]
pub struct ManifestValidator {
    layout: LibraryLayout,
    overwrite_on_conflict: bool,
}

impl ManifestValidator {
    /// Creates a validator over `layout`.
    ///
    /// With `overwrite_on_conflict`, a conflicting manifest is replaced and a
    /// warning is logged; otherwise the conflict is an error.
    pub fn new(layout: LibraryLayout, overwrite_on_conflict: bool) -> Self {
        Self {
            layout,
            overwrite_on_conflict,
        }
    }

    /// Returns the layout this validator writes into.
    pub fn layout(&self) -> &LibraryLayout {
        &self.layout
    }

    /// Extracts the hash value to record for `lib`.
    ///
    /// Only `sha512-{value}` hashes are supported; anything else is an
    /// [`CacheError::UnsupportedHash`].
    pub fn hash_value(lib: &RuntimeLibrary) -> Result<String, CacheError> {
        let unsupported = || CacheError::UnsupportedHash {
            library: lib.id(),
            hash: lib.hash.clone(),
        };
        let hash = LibraryHash::parse(&lib.hash).map_err(|_| unsupported())?;
        if *hash.algorithm() != HashAlgorithm::Sha512 {
            return Err(unsupported());
        }
        Ok(hash.into_value())
    }

    /// Brings the manifest for `lib` in line with its package hash.
    ///
    /// Writes only when no manifest exists or when a conflicting one may be
    /// overwritten. Fails without writing on an unsupported hash or on a
    /// conflict with overwriting disabled.
    pub fn reconcile(&self, lib: &RuntimeLibrary) -> Result<ManifestOutcome, CacheError> {
        let new_value = Self::hash_value(lib)?;
        let path = self.layout.manifest_path(lib);

        let outcome = match read_manifest(&path)? {
            None => ManifestOutcome::Created,
            Some(old_value) if old_value == new_value.as_bytes() => {
                return Ok(ManifestOutcome::Unchanged)
            }
            Some(_) if self.overwrite_on_conflict => {
                tracing::warn!(
                    library = %lib.name,
                    version = %lib.version,
                    manifest = %path.display(),
                    "hash mismatch found for {}, overwriting existing hash file; \
                     other applications sharing this cache may see cache misses",
                    lib.id()
                );
                ManifestOutcome::Overwritten
            }
            Some(_) => {
                return Err(CacheError::HashMismatch {
                    name: lib.name.clone(),
                    version: lib.version.clone(),
                })
            }
        };

        write_manifest(&path, &new_value)?;
        tracing::debug!(library = %lib.id(), ?outcome, "manifest written");
        Ok(outcome)
    }

    /// Compares the manifest for `lib` with its package hash without writing.
    pub fn inspect(&self, lib: &RuntimeLibrary) -> Result<ManifestStatus, CacheError> {
        let value = Self::hash_value(lib)?;
        let path = self.layout.manifest_path(lib);
        Ok(match read_manifest(&path)? {
            None => ManifestStatus::Missing,
            Some(recorded) if recorded == value.as_bytes() => ManifestStatus::Current,
            Some(recorded) => ManifestStatus::Drifted {
                recorded: String::from_utf8_lossy(&recorded).into_owned(),
            },
        })
    }
}

/// Reads the raw manifest bytes, returning `None` if it does not exist.
///
/// Content is compared byte for byte, so a corrupt (non-UTF-8) manifest is
/// just another mismatch.
fn read_manifest(path: &Path) -> Result<Option<Vec<u8>>, CacheError> {
    match std::fs::read(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CacheError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Replaces the manifest content, creating the library root if needed.
fn write_manifest(path: &Path, value: &str) -> Result<(), CacheError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CacheError::Io {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    std::fs::write(path, value).map_err(|e| CacheError::Io {
        path: path.to_path_buf(),
        source: e,
    })
}
