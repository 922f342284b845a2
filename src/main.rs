//! Merkle client CLI
//!
//! Command-line driver that supplies the authority address, root and
//! records to a validity request.

use anyhow::Result;
use clap::Parser;
use merkle_client::cli::{commands, context::CliContext, Cli};

fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    match cli.color.as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => {},
    }

    // Initialize logging; stdout is reserved for command output
    let default_level = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    CliContext::set(CliContext {
        verbose: cli.verbose,
        quiet: cli.quiet,
        config_path: cli.config,
    });

    // Execute the command
    commands::dispatch(cli.command)
}
