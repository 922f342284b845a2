//! Command-line interface for the Merkle client

use crate::core::hash::HashAlgorithm;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod commands;
pub mod context;

/// Merkle client - verify dataset membership against a trusted root
#[derive(Parser)]
#[command(
    name = "merkle-client",
    version,
    about = "Verify that records belong to a dataset summarized by a known Merkle root",
    long_about = "Fetches sibling proofs from a trusted authority, one connection per record, and recomputes the Merkle root locally to classify each record as valid or invalid."
)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output: auto, always, never
    #[arg(long, default_value = "auto", global = true)]
    pub color: String,

    /// Path to the configuration file
    #[arg(long, global = true, env = "MERKLE_CLIENT_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ask the authority for proofs and classify records
    Check {
        /// Authority host name or IP address
        #[arg(long)]
        host: String,

        /// Authority port
        #[arg(long)]
        port: u16,

        /// Known Merkle root
        #[arg(long)]
        root: String,

        /// Records to verify
        records: Vec<String>,

        /// Read records from stdin, one per line
        #[arg(long)]
        from_stdin: bool,

        /// Check records on a bounded worker pool
        #[arg(long)]
        parallel: bool,

        /// Override the configured hash algorithm (md5, sha256)
        #[arg(long)]
        algorithm: Option<HashAlgorithm>,

        /// Stop at the first record whose proof cannot be fetched
        #[arg(long)]
        abort_on_error: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Verify a record against a root with a proof given on the command line
    Verify {
        /// Known Merkle root
        #[arg(long)]
        root: String,

        /// Record to verify
        #[arg(long)]
        record: String,

        /// Sibling hashes in proof order
        siblings: Vec<String>,

        /// Override the configured hash algorithm (md5, sha256)
        #[arg(long)]
        algorithm: Option<HashAlgorithm>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the digest of a string
    Hash {
        /// Data to hash
        data: String,

        /// Override the configured hash algorithm (md5, sha256)
        #[arg(long)]
        algorithm: Option<HashAlgorithm>,
    },

    /// Get and set configuration values
    Config {
        /// Configuration key to get/set
        key: Option<String>,

        /// Configuration value to set
        value: Option<String>,

        /// List all configuration values
        #[arg(short, long)]
        list: bool,

        /// Reset a configuration value to its default
        #[arg(long)]
        unset: bool,

        /// Show configuration file location
        #[arg(long)]
        show_origin: bool,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_check_command() {
        let cli = Cli::parse_from([
            "merkle-client",
            "check",
            "--host",
            "127.0.0.1",
            "--port",
            "7000",
            "--root",
            "abc",
            "--algorithm",
            "sha256",
            "tx1",
            "tx2",
        ]);
        match cli.command {
            Commands::Check {
                host,
                port,
                records,
                algorithm,
                ..
            } => {
                assert_eq!(host, "127.0.0.1");
                assert_eq!(port, 7000);
                assert_eq!(records, vec!["tx1", "tx2"]);
                assert_eq!(algorithm, Some(HashAlgorithm::Sha256));
            },
            _ => panic!("Expected Check command"),
        }
    }
}
