//! Bounded retries around a proof transport

use crate::config::RetryPolicy;
use crate::core::{
    error::Result,
    types::{AuthorityAddress, SiblingProof},
};
use crate::transport::ProofTransport;
use std::thread;
use tracing::warn;

/// Fetch a proof, retrying connection failures and timeouts.
///
/// Malformed proofs are returned immediately; another round trip would
/// not change what the authority sends.
pub fn fetch_with_retry(
    transport: &dyn ProofTransport,
    address: &AuthorityAddress,
    record: &str,
    policy: &RetryPolicy,
) -> Result<SiblingProof> {
    let mut attempt = 0;
    loop {
        match transport.fetch_proof(address, record) {
            Ok(proof) => return Ok(proof),
            Err(e) if e.is_retryable() && attempt < policy.max_retries => {
                attempt += 1;
                let delay = policy.backoff(attempt);
                warn!(
                    record = %record,
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "proof fetch failed, retrying"
                );
                thread::sleep(delay);
            },
            Err(e) => return Err(e),
        }
    }
}
