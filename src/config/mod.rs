//! Configuration management for the Merkle client
//!
//! Settings live in ~/.merkle-client/config.toml and cover timeouts,
//! retries, the digest algorithm and batch behaviour.

pub mod client_config;

// Re-export commonly used items
pub use client_config::{
    ClientConfig, ConfigKey, ConfigValue, ErrorPolicy, NetworkConfig, ParallelConfig,
    RetryPolicy, VerificationConfig, DEFAULT_FRAME_SIZE, MAX_WORKER_THREADS,
};
