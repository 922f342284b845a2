//! Batch membership checks against one authority
//!
//! A [`ValidityRequest`] is assembled once through [`ValidityRequestBuilder`]
//! and can then be checked any number of times. Every check opens one
//! connection per record, verifies the returned proof against the known
//! root and sorts the record into the valid, invalid or errored bucket.

use crate::config::{ClientConfig, ErrorPolicy};
use crate::core::{
    error::{ClientError, Result},
    hash::{HashAlgorithm, NodeHasher},
    types::{AuthorityAddress, MerkleRoot, Record},
};
use crate::proofs::ProofVerifier;
use crate::request::report::{RecordOutcome, ValidityReport};
use crate::transport::{fetch_with_retry, ProofTransport, TcpTransport};
use rayon::prelude::*;
use tracing::{debug, info, warn};

/// Immutable set of records to check against a known root
#[derive(Debug, Clone)]
pub struct ValidityRequest {
    address: AuthorityAddress,
    root: MerkleRoot,
    records: Vec<Record>,
    config: ClientConfig,
}

impl ValidityRequest {
    /// Start building a request for the given authority and root
    pub fn builder(
        host: impl Into<String>,
        port: u16,
        root: impl Into<MerkleRoot>,
    ) -> ValidityRequestBuilder {
        ValidityRequestBuilder::new(host, port, root)
    }

    pub fn address(&self) -> &AuthorityAddress {
        &self.address
    }

    pub fn root(&self) -> &MerkleRoot {
        &self.root
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Check every record sequentially over TCP
    pub fn check_which_transaction_valid(&self) -> Result<ValidityReport> {
        let transport = TcpTransport::new(self.config.network.clone());
        self.check_with_transport(&transport)
    }

    /// Check every record sequentially using the given transport
    pub fn check_with_transport(&self, transport: &dyn ProofTransport) -> Result<ValidityReport> {
        info!(
            authority = %self.address,
            records = self.records.len(),
            "checking record validity"
        );

        let verifier = self.verifier();
        let mut report = ValidityReport::new();
        for record in &self.records {
            let outcome = self.check_record(transport, &verifier, record);
            self.accumulate(&mut report, record, outcome)?;
        }

        log_summary(&report);
        Ok(report)
    }

    /// Check every record on a bounded worker pool over TCP
    pub fn check_which_transaction_valid_parallel(&self) -> Result<ValidityReport> {
        let transport = TcpTransport::new(self.config.network.clone());
        self.check_parallel_with_transport(&transport)
    }

    /// Check every record on a bounded worker pool using the given transport.
    ///
    /// Each worker owns its own round trip; results are folded into the
    /// report on the calling thread in input order.
    pub fn check_parallel_with_transport(
        &self,
        transport: &dyn ProofTransport,
    ) -> Result<ValidityReport> {
        let workers = self.config.parallel.effective_workers();
        info!(
            authority = %self.address,
            records = self.records.len(),
            workers,
            "checking record validity in parallel"
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("merkle-check-{}", i))
            .build()
            .map_err(|e| ClientError::configuration(format!("Failed to start worker pool: {}", e)))?;

        let verifier = self.verifier();
        let outcomes: Vec<RecordOutcome> = pool.install(|| {
            self.records
                .par_iter()
                .map(|record| self.check_record(transport, &verifier, record))
                .collect()
        });

        let mut report = ValidityReport::new();
        for (record, outcome) in self.records.iter().zip(outcomes) {
            self.accumulate(&mut report, record, outcome)?;
        }

        log_summary(&report);
        Ok(report)
    }

    fn verifier(&self) -> ProofVerifier {
        ProofVerifier::new(self.root.clone(), self.config.verification.hash_algorithm)
    }

    /// One full round trip and verification for a single record
    fn check_record(
        &self,
        transport: &dyn ProofTransport,
        verifier: &ProofVerifier,
        record: &str,
    ) -> RecordOutcome {
        match fetch_with_retry(transport, &self.address, record, &self.config.retry) {
            Ok(proof) => {
                let digest_len = verifier.algorithm().output_len();
                let foreign = proof.iter().filter(|s| !s.is_hex_of_len(digest_len)).count();
                if foreign > 0 {
                    warn!(
                        record = %record,
                        siblings = foreign,
                        algorithm = %verifier.algorithm(),
                        "proof carries siblings that are not digests of the configured algorithm"
                    );
                }
                if verifier.verify(record, &proof) {
                    debug!(record = %record, siblings = proof.len(), "record is valid");
                    RecordOutcome::Valid
                } else {
                    debug!(record = %record, siblings = proof.len(), "record is invalid");
                    RecordOutcome::Invalid
                }
            },
            Err(e) => {
                warn!(record = %record, error = %e, "could not fetch proof");
                RecordOutcome::Errored(e)
            },
        }
    }

    fn accumulate(
        &self,
        report: &mut ValidityReport,
        record: &str,
        outcome: RecordOutcome,
    ) -> Result<()> {
        match (outcome, self.config.verification.error_policy) {
            (RecordOutcome::Errored(e), ErrorPolicy::Abort) => {
                Err(ClientError::record_failed(record, e))
            },
            (outcome, _) => {
                report.add(record.to_string(), outcome);
                Ok(())
            },
        }
    }
}

fn log_summary(report: &ValidityReport) {
    info!(
        valid = report.valid().len(),
        invalid = report.invalid().len(),
        errored = report.errored().len(),
        "validity check complete"
    );
}

/// Builder for [`ValidityRequest`]
#[derive(Debug, Clone)]
pub struct ValidityRequestBuilder {
    host: String,
    port: u16,
    root: MerkleRoot,
    records: Vec<Record>,
    config: ClientConfig,
}

impl ValidityRequestBuilder {
    pub fn new(host: impl Into<String>, port: u16, root: impl Into<MerkleRoot>) -> Self {
        Self {
            host: host.into(),
            port,
            root: root.into(),
            records: Vec::new(),
            config: ClientConfig::default(),
        }
    }

    /// Add one record to check
    pub fn add_merkle_validity_check(mut self, record: impl Into<Record>) -> Self {
        self.records.push(record.into());
        self
    }

    /// Add several records to check
    pub fn add_records<I, S>(mut self, records: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Record>,
    {
        self.records.extend(records.into_iter().map(Into::into));
        self
    }

    /// Replace the whole client configuration
    pub fn with_config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn hash_algorithm(mut self, algorithm: HashAlgorithm) -> Self {
        self.config.verification.hash_algorithm = algorithm;
        self
    }

    pub fn error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.config.verification.error_policy = policy;
        self
    }

    pub fn build(self) -> Result<ValidityRequest> {
        if self.host.trim().is_empty() {
            return Err(ClientError::configuration("authority host must not be empty"));
        }
        if self.port == 0 {
            return Err(ClientError::configuration("authority port must not be zero"));
        }
        if self.root.is_empty() {
            return Err(ClientError::configuration("merkle root must not be empty"));
        }
        self.config.validate()?;

        Ok(ValidityRequest {
            address: AuthorityAddress::new(self.host, self.port),
            root: self.root,
            records: self.records,
            config: self.config,
        })
    }
}
