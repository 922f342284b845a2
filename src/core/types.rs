//! Core data types for the Merkle client

use serde::{Deserialize, Serialize};
use std::fmt;

/// A candidate dataset element submitted for verification
pub type Record = String;

/// Textual digest of a Merkle node.
///
/// Roots and sibling hashes travel as text, so the value is kept as the
/// string the authority produced. Equality always compares content.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashValue(String);

impl HashValue {
    /// Wrap an existing digest string
    pub fn new(value: impl Into<String>) -> Self {
        HashValue(value.into())
    }

    /// Create a hash value from raw digest bytes (lowercase hex)
    pub fn from_digest(bytes: &[u8]) -> Self {
        HashValue(hex::encode(bytes))
    }

    /// Get the digest as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Length of the textual digest
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether the value looks like a hex digest of `bytes` length
    pub fn is_hex_of_len(&self, bytes: usize) -> bool {
        self.0.len() == bytes * 2 && hex::decode(&self.0).is_ok()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for HashValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown: String = self.0.chars().take(8).collect();
        write!(f, "HashValue({})", shown)
    }
}

impl From<&str> for HashValue {
    fn from(value: &str) -> Self {
        HashValue(value.to_string())
    }
}

impl From<String> for HashValue {
    fn from(value: String) -> Self {
        HashValue(value)
    }
}

impl AsRef<str> for HashValue {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Known Merkle root of the dataset
pub type MerkleRoot = HashValue;

/// Ordered sibling hashes returned by the authority for one record
pub type SiblingProof = Vec<HashValue>;

/// Address of the proof authority
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorityAddress {
    pub host: String,
    pub port: u16,
}

impl AuthorityAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for AuthorityAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // IPv6 literals need brackets to form a valid socket address
        if self.host.contains(':') && !self.host.starts_with('[') {
            write!(f, "[{}]:{}", self.host, self.port)
        } else {
            write!(f, "{}:{}", self.host, self.port)
        }
    }
}
