//! Parsing of package hash strings of the form `{algorithm}-{value}`.

use std::fmt;

/// Hash algorithm named by the prefix of a package hash string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HashAlgorithm {
    /// SHA-512, the only algorithm the manifest cache accepts.
    Sha512,
    /// Any other algorithm prefix, kept verbatim.
    Other(String),
}

impl HashAlgorithm {
    fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "sha512" => HashAlgorithm::Sha512,
            other => HashAlgorithm::Other(other.to_string()),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HashAlgorithm::Sha512 => f.write_str("sha512"),
            HashAlgorithm::Other(name) => f.write_str(name),
        }
    }
}

/// Error returned when a hash string has no `-` separating algorithm and value.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("malformed hash string '{input}': expected '{{algorithm}}-{{value}}'")]
pub struct HashFormatError {
    /// The input string that failed to parse.
    pub input: String,
}

/// A package hash split into its algorithm and opaque value.
///
/// The split happens at the first `-`; the value is everything after it and
/// is treated as an opaque string (never decoded).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryHash {
    algorithm: HashAlgorithm,
    value: String,
}

impl LibraryHash {
    /// Parses a `{algorithm}-{value}` hash string.
    pub fn parse(input: &str) -> Result<Self, HashFormatError> {
        let (prefix, value) = input.split_once('-').ok_or_else(|| HashFormatError {
            input: input.to_string(),
        })?;
        Ok(Self {
            algorithm: HashAlgorithm::from_prefix(prefix),
            value: value.to_string(),
        })
    }

    /// Returns the algorithm named by the prefix.
    pub fn algorithm(&self) -> &HashAlgorithm {
        &self.algorithm
    }

    /// Returns the hash value with the algorithm prefix removed.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Consumes the hash, returning the value.
    pub fn into_value(self) -> String {
        self.value
    }
}

impl fmt::Display for LibraryHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.algorithm, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_sha512() {
        let h = LibraryHash::parse("sha512-abc").unwrap();
        assert_eq!(h.algorithm(), &HashAlgorithm::Sha512);
        assert_eq!(h.value(), "abc");
    }

    #[test]
    fn value_is_everything_after_first_dash() {
        let h = LibraryHash::parse("sha512-ab-cd-ef").unwrap();
        assert_eq!(h.value(), "ab-cd-ef");
    }

    #[test]
    fn base64_value_kept_verbatim() {
        let raw = "sha512-3J/f1t8dWw4IXZfKxbBq+XbfCq3hJ9ohf2JtHb3/QxUfrHvuxH9KIw==";
        let h = LibraryHash::parse(raw).unwrap();
        assert_eq!(
            h.value(),
            "3J/f1t8dWw4IXZfKxbBq+XbfCq3hJ9ohf2JtHb3/QxUfrHvuxH9KIw=="
        );
        assert_eq!(h.to_string(), raw);
    }

    #[test]
    fn other_algorithm_is_preserved() {
        let h = LibraryHash::parse("sha256-xyz").unwrap();
        assert_eq!(h.algorithm(), &HashAlgorithm::Other("sha256".to_string()));
        assert_eq!(h.algorithm().to_string(), "sha256");
    }

    #[test]
    fn prefix_is_case_sensitive() {
        let h = LibraryHash::parse("SHA512-abc").unwrap();
        assert_ne!(h.algorithm(), &HashAlgorithm::Sha512);
    }

    #[test]
    fn empty_value_is_accepted() {
        let h = LibraryHash::parse("sha512-").unwrap();
        assert_eq!(h.value(), "");
    }

    #[test]
    fn missing_dash_is_error() {
        let err = LibraryHash::parse("sha512abc").unwrap_err();
        assert_eq!(err.input, "sha512abc");
        assert!(err.to_string().contains("malformed hash string"));
    }
}
