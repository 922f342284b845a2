//! Core types and utilities for the Merkle client
//!
//! This module contains the fundamental data types, error handling,
//! and hashing used throughout the system.

pub mod error;
pub mod hash;
pub mod types;

// Re-export commonly used items
pub use error::{ClientError, Result};
pub use hash::{hash_concat, md5, sha256, HashAlgorithm, NodeHasher};
pub use types::{AuthorityAddress, HashValue, MerkleRoot, Record, SiblingProof};
