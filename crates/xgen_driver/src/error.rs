//! Error types for orchestration.

use xgen_cache::CacheError;

/// Errors that stop a compilation run.
///
/// Per-asset failures are never fatal to a run; they are recorded in the
/// [`RunReport`](crate::RunReport).
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// A library's cache bookkeeping failed under the abort policy.
    #[error(transparent)]
    Cache(#[from] CacheError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_error_is_transparent() {
        let err = DriverError::from(CacheError::HashMismatch {
            name: "Foo".to_string(),
            version: "1.0.0".to_string(),
        });
        assert_eq!(err.to_string(), "hash mismatch found for Foo.1.0.0");
    }
}
