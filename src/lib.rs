//! Merkle Client - dataset membership checks against a known Merkle root
//!
//! A client holds only the Merkle root of a dataset. To learn whether a
//! record belongs to the dataset it asks a trusted authority for the
//! record's sibling proof, then recomputes the root locally by hashing the
//! record with each sibling in the order received.
//!
//! # Core Features
//!
//! - **Proof Verification**: Order-sensitive path recomputation with value equality
//! - **One Connection per Record**: Plain TCP round trips with fixed-size hash frames
//! - **Batch Classification**: Every record lands in exactly one of valid, invalid or errored
//! - **Bounded Parallelism**: Optional worker pool with per-record connections
//! - **Retries and Timeouts**: Configured per connection, never hardcoded
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use merkle_client::ValidityRequest;
//!
//! let request = ValidityRequest::builder("127.0.0.1", 7000, "3f2a9c0e5b1d4e6f8a7b9c0d1e2f3a4b")
//!     .add_merkle_validity_check("tx1")
//!     .add_merkle_validity_check("tx2")
//!     .build()?;
//!
//! let report = request.check_which_transaction_valid()?;
//! for record in report.valid() {
//!     println!("{} is a member", record);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![allow(clippy::should_implement_trait)]

pub mod cli;
pub mod config;
pub mod core;
pub mod proofs;
pub mod request;
pub mod transport;

// Re-export commonly used types
pub use crate::core::{
    error::{ClientError, Result},
    hash::{HashAlgorithm, NodeHasher},
    types::{AuthorityAddress, HashValue, MerkleRoot, Record, SiblingProof},
};

pub use crate::config::{ClientConfig, ErrorPolicy, RetryPolicy};

pub use crate::proofs::{recompute_root, verify, ProofVerifier};

pub use crate::request::{FailedRecord, ValidityReport, ValidityRequest, ValidityRequestBuilder};

pub use crate::transport::{ProofTransport, TcpTransport};

/// Current version of the Merkle client
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
