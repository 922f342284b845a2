//! Partitioned outcome of one validity check

use crate::core::{
    error::{ClientError, Result},
    types::Record,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Classification of a single record
#[derive(Debug)]
pub enum RecordOutcome {
    /// The proof reproduced the known root
    Valid,
    /// The proof led to a different root
    Invalid,
    /// The round trip failed before verification could run
    Errored(ClientError),
}

/// A record whose proof could not be fetched
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailedRecord {
    pub record: Record,
    pub reason: String,
}

/// Valid, invalid and errored records of one verification pass.
///
/// Each submitted record occurrence appears in exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidityReport {
    valid: Vec<Record>,
    invalid: Vec<Record>,
    errored: Vec<FailedRecord>,
}

impl ValidityReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a record into the bucket matching its outcome
    pub fn add(&mut self, record: Record, outcome: RecordOutcome) {
        match outcome {
            RecordOutcome::Valid => self.valid.push(record),
            RecordOutcome::Invalid => self.invalid.push(record),
            RecordOutcome::Errored(error) => self.errored.push(FailedRecord {
                record,
                reason: error.to_string(),
            }),
        }
    }

    /// Records that are members of the dataset
    pub fn valid(&self) -> &[Record] {
        &self.valid
    }

    /// Records whose proof did not reproduce the root
    pub fn invalid(&self) -> &[Record] {
        &self.invalid
    }

    /// Records whose round trip failed
    pub fn errored(&self) -> &[FailedRecord] {
        &self.errored
    }

    /// Number of classified record occurrences
    pub fn total(&self) -> usize {
        self.valid.len() + self.invalid.len() + self.errored.len()
    }

    pub fn is_valid(&self, record: &str) -> bool {
        self.valid.iter().any(|r| r == record)
    }

    /// True when every record was verified as a member
    pub fn all_valid(&self) -> bool {
        self.invalid.is_empty() && self.errored.is_empty()
    }

    /// Two-key view: `true` for members, `false` for non-members.
    /// Errored records are in neither key.
    pub fn as_partition(&self) -> HashMap<bool, Vec<Record>> {
        let mut partition = HashMap::with_capacity(2);
        partition.insert(true, self.valid.clone());
        partition.insert(false, self.invalid.clone());
        partition
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(ClientError::JsonSerialization)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(ClientError::JsonSerialization)
    }
}
