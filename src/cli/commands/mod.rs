//! CLI command implementations

pub mod check;
pub mod config;
pub mod hash;
pub mod verify;

use crate::cli::Commands;
use anyhow::Result;

/// Dispatch a parsed subcommand to its implementation
pub fn dispatch(command: Commands) -> Result<()> {
    match command {
        Commands::Check {
            host,
            port,
            root,
            records,
            from_stdin,
            parallel,
            algorithm,
            abort_on_error,
            json,
        } => check::execute(check::CheckArgs {
            host,
            port,
            root,
            records,
            from_stdin,
            parallel,
            algorithm,
            abort_on_error,
            json,
        }),
        Commands::Verify {
            root,
            record,
            siblings,
            algorithm,
            json,
        } => verify::execute(root, record, siblings, algorithm, json),
        Commands::Hash { data, algorithm } => hash::execute(data, algorithm),
        Commands::Config {
            key,
            value,
            list,
            unset,
            show_origin,
            json,
        } => config::execute(key, value, list, unset, show_origin, json),
    }
}
