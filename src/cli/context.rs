//! CLI context for storing global options during command execution

use crate::config::ClientConfig;
use std::cell::RefCell;
use std::path::PathBuf;

thread_local! {
    static CLI_CONTEXT: RefCell<Option<CliContext>> = const { RefCell::new(None) };
}

/// Context containing global CLI options
#[derive(Debug, Clone, Default)]
pub struct CliContext {
    pub verbose: bool,
    pub quiet: bool,
    pub config_path: Option<PathBuf>,
}

impl CliContext {
    /// Set the global CLI context for the current thread
    pub fn set(context: CliContext) {
        CLI_CONTEXT.with(|c| {
            *c.borrow_mut() = Some(context);
        });
    }

    /// Get the current CLI context
    pub fn get() -> Option<CliContext> {
        CLI_CONTEXT.with(|c| c.borrow().clone())
    }

    /// Check if verbose mode is enabled
    pub fn is_verbose() -> bool {
        Self::get().map(|ctx| ctx.verbose).unwrap_or(false)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet() -> bool {
        Self::get().map(|ctx| ctx.quiet).unwrap_or(false)
    }

    /// Path of the configuration file in effect
    pub fn config_path() -> crate::core::error::Result<PathBuf> {
        match Self::get().and_then(|ctx| ctx.config_path) {
            Some(path) => Ok(path),
            None => ClientConfig::get_config_path(),
        }
    }

    /// Load the configuration file in effect
    pub fn load_config() -> crate::core::error::Result<ClientConfig> {
        ClientConfig::load_from(&Self::config_path()?)
    }
}
