//! Hash utilities for Merkle path recomputation

use crate::core::types::HashValue;
use digest::Digest;
use ::md5::Md5;
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;
use std::str::FromStr;

/// Digest function used to combine Merkle nodes
pub trait NodeHasher: Send + Sync {
    /// Hash arbitrary bytes into a lowercase hex digest
    fn hash(&self, data: &[u8]) -> HashValue;

    /// Length of the raw digest in bytes
    fn output_len(&self) -> usize;
}

/// Supported digest algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// 128-bit MD5, the digest used by existing authorities
    #[default]
    Md5,
    /// 256-bit SHA-256
    Sha256,
}

impl HashAlgorithm {
    pub fn name(self) -> &'static str {
        match self {
            HashAlgorithm::Md5 => "md5",
            HashAlgorithm::Sha256 => "sha256",
        }
    }
}

impl NodeHasher for HashAlgorithm {
    fn hash(&self, data: &[u8]) -> HashValue {
        match self {
            HashAlgorithm::Md5 => digest_hex::<Md5>(data),
            HashAlgorithm::Sha256 => digest_hex::<Sha256>(data),
        }
    }

    fn output_len(&self) -> usize {
        match self {
            HashAlgorithm::Md5 => <Md5 as Digest>::output_size(),
            HashAlgorithm::Sha256 => <Sha256 as Digest>::output_size(),
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha256" | "sha-256" => Ok(HashAlgorithm::Sha256),
            other => Err(format!(
                "unknown hash algorithm '{}', expected md5 or sha256",
                other
            )),
        }
    }
}

/// Hash data with any RustCrypto digest and hex-encode the output
pub fn digest_hex<D: Digest>(data: &[u8]) -> HashValue {
    let mut hasher = D::new();
    hasher.update(data);
    HashValue::from_digest(&hasher.finalize())
}

/// Compute the MD5 digest of data
pub fn md5(data: &[u8]) -> HashValue {
    digest_hex::<Md5>(data)
}

/// Compute the SHA-256 digest of data
pub fn sha256(data: &[u8]) -> HashValue {
    digest_hex::<Sha256>(data)
}

/// Hash the concatenation `left || right` (one Merkle path step)
pub fn hash_concat(hasher: &dyn NodeHasher, left: &str, right: &str) -> HashValue {
    let mut buffer = Vec::with_capacity(left.len() + right.len());
    buffer.extend_from_slice(left.as_bytes());
    buffer.extend_from_slice(right.as_bytes());
    hasher.hash(&buffer)
}
