//! Validity requests
//!
//! Runs transport and verification over a batch of records and partitions
//! them into valid, invalid and errored buckets.

pub mod report;
pub mod validity_request;

// Re-export commonly used items
pub use report::{FailedRecord, RecordOutcome, ValidityReport};
pub use validity_request::{ValidityRequest, ValidityRequestBuilder};
