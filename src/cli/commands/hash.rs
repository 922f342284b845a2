//! Hash command implementation

use crate::cli::context::CliContext;
use crate::core::hash::{HashAlgorithm, NodeHasher};
use anyhow::Result;

/// Execute the hash command
pub fn execute(data: String, algorithm: Option<HashAlgorithm>) -> Result<()> {
    let algorithm = match algorithm {
        Some(algorithm) => algorithm,
        None => CliContext::load_config()?.verification.hash_algorithm,
    };

    println!("{}", algorithm.hash(data.as_bytes()));
    Ok(())
}
