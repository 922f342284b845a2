//! Proof transport
//!
//! Fetches the ordered sibling hashes for one record from the authority.

pub mod frame;
pub mod retry;
pub mod tcp;

use crate::core::{
    error::Result,
    types::{AuthorityAddress, SiblingProof},
};

/// Source of sibling proofs for individual records
#[cfg_attr(test, mockall::automock)]
pub trait ProofTransport: Send + Sync {
    /// Perform one full round trip for `record` and return its proof
    fn fetch_proof(&self, address: &AuthorityAddress, record: &str) -> Result<SiblingProof>;
}

// Re-export commonly used items
pub use frame::{decode_frame, encode_frame, read_frames};
pub use retry::fetch_with_retry;
pub use tcp::TcpTransport;
