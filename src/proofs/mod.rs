//! Merkle proof verification
//!
//! Recomputes a root from a record and its ordered sibling hashes and
//! compares it with the root the client already trusts.

pub mod verifier;

// Re-export commonly used items
pub use verifier::{recompute_root, verify, ProofVerifier};
