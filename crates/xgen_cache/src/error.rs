//! Error types for cache manifest operations.

use std::path::PathBuf;

/// Errors raised while validating or writing a library's hash manifest.
///
/// Kept separate from compiler failures so callers can tell "the compiler
/// failed" apart from "cache bookkeeping failed".
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// The library's hash string does not use the supported `sha512` prefix.
    ///
    /// Not retryable: the input format is unsupported.
    #[error("unsupported hash value for package {library}, value: {hash}")]
    UnsupportedHash {
        /// The library identity (`name.version`).
        library: String,
        /// The offending hash string.
        hash: String,
    },

    /// The manifest on disk records a different hash and overwriting is disabled.
    #[error("hash mismatch found for {name}.{version}")]
    HashMismatch {
        /// The library name.
        name: String,
        /// The library version.
        version: String,
    },

    /// An I/O error occurred while reading or writing a manifest.
    #[error("cache I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_hash_display() {
        let err = CacheError::UnsupportedHash {
            library: "Foo.1.2.3".to_string(),
            hash: "md5-abc".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("Foo.1.2.3"));
        assert!(msg.contains("md5-abc"));
    }

    #[test]
    fn hash_mismatch_display() {
        let err = CacheError::HashMismatch {
            name: "Foo".to_string(),
            version: "1.2.3".to_string(),
        };
        assert_eq!(err.to_string(), "hash mismatch found for Foo.1.2.3");
    }

    #[test]
    fn io_error_display() {
        let err = CacheError::Io {
            path: PathBuf::from("/out/x64/Foo/1.2.3/Foo.1.2.3.nupkg.sha512"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("cache I/O error"));
        assert!(msg.contains("nupkg.sha512"));
    }
}
