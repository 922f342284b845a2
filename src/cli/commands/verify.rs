//! Offline verify command implementation

use crate::cli::context::CliContext;
use crate::core::hash::HashAlgorithm;
use crate::core::types::HashValue;
use crate::proofs::ProofVerifier;
use anyhow::Result;
use colored::Colorize;

/// Execute the verify command
pub fn execute(
    root: String,
    record: String,
    siblings: Vec<String>,
    algorithm: Option<HashAlgorithm>,
    json: bool,
) -> Result<()> {
    let algorithm = match algorithm {
        Some(algorithm) => algorithm,
        None => CliContext::load_config()?.verification.hash_algorithm,
    };

    let proof: Vec<HashValue> = siblings.into_iter().map(HashValue::from).collect();
    let verifier = ProofVerifier::new(HashValue::from(root), algorithm);
    let recomputed = verifier.recompute(&record, &proof);
    let valid = recomputed == *verifier.root();

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "record": record,
                "root": verifier.root(),
                "recomputed_root": recomputed,
                "algorithm": algorithm.name(),
                "siblings": proof.len(),
                "valid": valid,
            }))?
        );
    } else if !CliContext::is_quiet() {
        if CliContext::is_verbose() {
            println!("  • Algorithm: {}", algorithm.name().cyan());
            println!("  • Proof elements: {}", proof.len());
            println!("  • Recomputed root: {}", recomputed.as_str().cyan());
            println!("  • Expected root: {}", verifier.root().as_str().cyan());
        }
        if valid {
            println!("{} {}", "✓ Record is valid:".green(), record);
        } else {
            println!("{} {}", "✗ Record is invalid:".red(), record);
        }
    }

    if valid {
        Ok(())
    } else {
        Err(anyhow::anyhow!("Recomputed root does not match the expected root"))
    }
}
