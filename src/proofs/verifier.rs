//! Merkle path verification
//!
//! A record is a member of the dataset when hashing it together with each
//! sibling hash, in the order the authority sent them, reproduces the known
//! root. Every step computes `acc = H(acc || sibling)`.

use crate::core::{
    hash::{hash_concat, HashAlgorithm, NodeHasher},
    types::{HashValue, MerkleRoot},
};

/// Recompute the root reached from `record` through `siblings`.
///
/// With no siblings the result is the record itself.
pub fn recompute_root(record: &str, siblings: &[HashValue], hasher: &dyn NodeHasher) -> HashValue {
    let mut accumulator = HashValue::new(record);
    for sibling in siblings {
        accumulator = hash_concat(hasher, accumulator.as_str(), sibling.as_str());
    }
    accumulator
}

/// Check whether `record` chains through `siblings` to `expected_root`.
pub fn verify(
    record: &str,
    siblings: &[HashValue],
    expected_root: &MerkleRoot,
    hasher: &dyn NodeHasher,
) -> bool {
    recompute_root(record, siblings, hasher) == *expected_root
}

/// Verifier bound to one known root
#[derive(Debug, Clone)]
pub struct ProofVerifier {
    root: MerkleRoot,
    algorithm: HashAlgorithm,
}

impl ProofVerifier {
    /// Create a verifier for the given root
    pub fn new(root: MerkleRoot, algorithm: HashAlgorithm) -> Self {
        Self { root, algorithm }
    }

    pub fn root(&self) -> &MerkleRoot {
        &self.root
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Verify one record against the bound root
    pub fn verify(&self, record: &str, siblings: &[HashValue]) -> bool {
        verify(record, siblings, &self.root, &self.algorithm)
    }

    /// Recompute the root for one record without comparing it
    pub fn recompute(&self, record: &str, siblings: &[HashValue]) -> HashValue {
        recompute_root(record, siblings, &self.algorithm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::hash::md5;

    fn chain(record: &str, siblings: &[&str]) -> HashValue {
        let mut acc = record.to_string();
        for sibling in siblings {
            acc = md5(format!("{}{}", acc, sibling).as_bytes()).into_string();
        }
        HashValue::new(acc)
    }

    fn proof(siblings: &[&str]) -> Vec<HashValue> {
        siblings.iter().map(|s| HashValue::from(*s)).collect()
    }

    #[test]
    fn test_valid_two_sibling_proof() {
        let root = chain("tx1", &["hashA", "hashB"]);
        assert!(verify("tx1", &proof(&["hashA", "hashB"]), &root, &HashAlgorithm::Md5));
    }

    #[test]
    fn test_swapped_siblings_are_rejected() {
        let root = chain("tx1", &["hashA", "hashB"]);
        assert!(!verify("tx1", &proof(&["hashB", "hashA"]), &root, &HashAlgorithm::Md5));
    }

    #[test]
    fn test_empty_proof_compares_record_with_root() {
        let hasher = HashAlgorithm::Md5;
        assert!(verify("leaf", &[], &HashValue::from("leaf"), &hasher));
        assert!(!verify("leaf", &[], &HashValue::from("other"), &hasher));
    }

    #[test]
    fn test_root_compared_by_content() {
        let root = chain("tx9", &["s1"]);
        // A separately allocated copy of the same digest must match
        let copy = HashValue::new(root.as_str().to_owned());
        assert!(verify("tx9", &proof(&["s1"]), &copy, &HashAlgorithm::Md5));
    }

    #[test]
    fn test_proof_verifier_binds_root() {
        let root = chain("tx2", &["a", "b", "c"]);
        let verifier = ProofVerifier::new(root.clone(), HashAlgorithm::Md5);
        assert_eq!(verifier.recompute("tx2", &proof(&["a", "b", "c"])), root);
        assert!(verifier.verify("tx2", &proof(&["a", "b", "c"])));
        assert!(!verifier.verify("tx3", &proof(&["a", "b", "c"])));
    }

    #[test]
    fn test_algorithm_must_match_root() {
        let root = chain("tx1", &["hashA"]);
        assert!(!verify("tx1", &proof(&["hashA"]), &root, &HashAlgorithm::Sha256));
    }
}
