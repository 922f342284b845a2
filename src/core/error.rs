//! Error types for the Merkle client

use crate::core::types::Record;
use thiserror::Error;

/// Main error type for client operations
#[derive(Error, Debug)]
pub enum ClientError {
    /// Transport errors
    #[error("Connection to authority {address} failed: {source}")]
    ConnectionFailed {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Timed out during {operation} with authority {address}")]
    Timeout { address: String, operation: String },

    #[error("Invalid authority address: {address}")]
    InvalidAddress { address: String },

    /// Proof errors
    #[error("Malformed proof data: {reason}")]
    MalformedProof { reason: String },

    /// Batch errors
    #[error("Verification of record '{record}' failed: {source}")]
    RecordFailed {
        record: Record,
        #[source]
        source: Box<ClientError>,
    },

    /// Configuration errors
    #[error("Configuration error: {reason}")]
    ConfigurationError { reason: String },

    #[error("Home directory not found")]
    HomeDirectoryNotFound,

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Create a new connection failed error
    pub fn connection_failed(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::ConnectionFailed {
            address: address.into(),
            source,
        }
    }

    /// Create a new timeout error
    pub fn timeout(address: impl Into<String>, operation: impl Into<String>) -> Self {
        Self::Timeout {
            address: address.into(),
            operation: operation.into(),
        }
    }

    /// Create a new invalid address error
    pub fn invalid_address(address: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.into(),
        }
    }

    /// Create a new malformed proof error
    pub fn malformed_proof(reason: impl Into<String>) -> Self {
        Self::MalformedProof {
            reason: reason.into(),
        }
    }

    /// Wrap an error with the record whose round trip produced it
    pub fn record_failed(record: impl Into<Record>, source: ClientError) -> Self {
        Self::RecordFailed {
            record: record.into(),
            source: Box::new(source),
        }
    }

    /// Create a new configuration error
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::ConfigurationError {
            reason: reason.into(),
        }
    }

    /// Whether a fresh connection attempt could succeed where this one failed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::ConnectionFailed { .. } | Self::Timeout { .. })
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;
