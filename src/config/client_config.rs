//! Client configuration management
//!
//! Provides settings stored in ~/.merkle-client/config.toml. A missing file
//! yields the defaults, which reproduce the plain sequential client.

use crate::core::error::{ClientError, Result};
use crate::core::hash::HashAlgorithm;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

/// Default size of one proof frame on the wire
pub const DEFAULT_FRAME_SIZE: usize = 256;

/// Upper bound on `parallel.worker_threads`
pub const MAX_WORKER_THREADS: usize = 256;

/// Configuration for the Merkle client
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Network configuration
    pub network: NetworkConfig,
    /// Retry configuration
    pub retry: RetryPolicy,
    /// Verification configuration
    pub verification: VerificationConfig,
    /// Parallel checking configuration
    pub parallel: ParallelConfig,
}

/// Per-connection network settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Connect timeout in milliseconds (0 = none)
    pub connect_timeout_ms: u64,
    /// Read timeout in milliseconds (0 = none)
    pub read_timeout_ms: u64,
    /// Write timeout in milliseconds (0 = none)
    pub write_timeout_ms: u64,
    /// Size of one hash frame sent by the authority
    pub frame_size: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout_ms: 5_000,
            read_timeout_ms: 10_000,
            write_timeout_ms: 10_000,
            frame_size: DEFAULT_FRAME_SIZE,
        }
    }
}

impl NetworkConfig {
    pub fn connect_timeout(&self) -> Option<Duration> {
        millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        millis(self.read_timeout_ms)
    }

    pub fn write_timeout(&self) -> Option<Duration> {
        millis(self.write_timeout_ms)
    }
}

fn millis(ms: u64) -> Option<Duration> {
    if ms == 0 {
        None
    } else {
        Some(Duration::from_millis(ms))
    }
}

/// Bounded retry with exponential backoff for connection failures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetryPolicy {
    /// Additional attempts after the first one
    pub max_retries: u32,
    /// Delay before the first retry in milliseconds
    pub initial_backoff_ms: u64,
    /// Upper bound on the delay between retries in milliseconds
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_backoff_ms: 100,
            max_backoff_ms: 2_000,
        }
    }
}

impl RetryPolicy {
    /// Delay before retry number `attempt` (1-based)
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt.saturating_sub(1)).unwrap_or(u64::MAX);
        let delay = self.initial_backoff_ms.saturating_mul(factor);
        Duration::from_millis(delay.min(self.max_backoff_ms))
    }
}

/// What a batch does when one record's round trip fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Report the record as errored and keep going
    #[default]
    Continue,
    /// Stop the batch at the first failure
    Abort,
}

impl FromStr for ErrorPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "continue" => Ok(ErrorPolicy::Continue),
            "abort" => Ok(ErrorPolicy::Abort),
            other => Err(format!(
                "unknown error policy '{}', expected continue or abort",
                other
            )),
        }
    }
}

/// Verification settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VerificationConfig {
    /// Digest used to combine Merkle nodes
    pub hash_algorithm: HashAlgorithm,
    /// Per-record failure handling
    pub error_policy: ErrorPolicy,
}

/// Parallel checking settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelConfig {
    /// Number of worker threads (0 = auto-detect)
    pub worker_threads: usize,
}

impl ParallelConfig {
    pub fn effective_workers(&self) -> usize {
        if self.worker_threads == 0 {
            num_cpus::get()
        } else {
            self.worker_threads
        }
    }
}

/// Configuration value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    Number(i64),
    Boolean(bool),
}

impl ConfigValue {
    /// Parse a command-line value, preferring numbers and booleans
    pub fn parse(raw: &str) -> Self {
        if let Ok(n) = raw.parse::<i64>() {
            ConfigValue::Number(n)
        } else if let Ok(b) = raw.parse::<bool>() {
            ConfigValue::Boolean(b)
        } else {
            ConfigValue::String(raw.to_string())
        }
    }
}

impl std::fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigValue::String(s) => f.write_str(s),
            ConfigValue::Number(n) => write!(f, "{}", n),
            ConfigValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Configuration key for setting values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    NetworkConnectTimeout,
    NetworkReadTimeout,
    NetworkWriteTimeout,
    NetworkFrameSize,
    RetryMaxRetries,
    RetryInitialBackoff,
    RetryMaxBackoff,
    VerificationHashAlgorithm,
    VerificationErrorPolicy,
    ParallelWorkerThreads,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 10] = [
        ConfigKey::NetworkConnectTimeout,
        ConfigKey::NetworkReadTimeout,
        ConfigKey::NetworkWriteTimeout,
        ConfigKey::NetworkFrameSize,
        ConfigKey::RetryMaxRetries,
        ConfigKey::RetryInitialBackoff,
        ConfigKey::RetryMaxBackoff,
        ConfigKey::VerificationHashAlgorithm,
        ConfigKey::VerificationErrorPolicy,
        ConfigKey::ParallelWorkerThreads,
    ];

    pub fn from_str(key: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|k| k.to_str() == key)
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            ConfigKey::NetworkConnectTimeout => "network.connect_timeout_ms",
            ConfigKey::NetworkReadTimeout => "network.read_timeout_ms",
            ConfigKey::NetworkWriteTimeout => "network.write_timeout_ms",
            ConfigKey::NetworkFrameSize => "network.frame_size",
            ConfigKey::RetryMaxRetries => "retry.max_retries",
            ConfigKey::RetryInitialBackoff => "retry.initial_backoff_ms",
            ConfigKey::RetryMaxBackoff => "retry.max_backoff_ms",
            ConfigKey::VerificationHashAlgorithm => "verification.hash_algorithm",
            ConfigKey::VerificationErrorPolicy => "verification.error_policy",
            ConfigKey::ParallelWorkerThreads => "parallel.worker_threads",
        }
    }
}

impl ClientConfig {
    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            // Return default configuration if file doesn't exist
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(config_path)?;
        let config: ClientConfig =
            toml::from_str(&content).map_err(|e| ClientError::ConfigurationError {
                reason: format!("Failed to parse client config: {}", e),
            })?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| ClientError::ConfigurationError {
                reason: format!("Failed to serialize config: {}", e),
            })?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        let user_dirs = UserDirs::new().ok_or(ClientError::HomeDirectoryNotFound)?;

        let client_dir = user_dirs.home_dir().join(".merkle-client");
        Ok(client_dir.join("config.toml"))
    }

    /// Reject settings the transport cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.network.frame_size == 0 {
            return Err(ClientError::configuration(
                "network.frame_size must be greater than zero",
            ));
        }
        if self.retry.max_backoff_ms < self.retry.initial_backoff_ms {
            return Err(ClientError::configuration(
                "retry.max_backoff_ms must not be smaller than retry.initial_backoff_ms",
            ));
        }
        if self.parallel.worker_threads > MAX_WORKER_THREADS {
            return Err(ClientError::configuration(format!(
                "parallel.worker_threads must be at most {}",
                MAX_WORKER_THREADS
            )));
        }
        Ok(())
    }

    /// Get a configuration value
    pub fn get(&self, key: &ConfigKey) -> ConfigValue {
        match key {
            ConfigKey::NetworkConnectTimeout => number(self.network.connect_timeout_ms),
            ConfigKey::NetworkReadTimeout => number(self.network.read_timeout_ms),
            ConfigKey::NetworkWriteTimeout => number(self.network.write_timeout_ms),
            ConfigKey::NetworkFrameSize => number(self.network.frame_size as u64),
            ConfigKey::RetryMaxRetries => number(self.retry.max_retries as u64),
            ConfigKey::RetryInitialBackoff => number(self.retry.initial_backoff_ms),
            ConfigKey::RetryMaxBackoff => number(self.retry.max_backoff_ms),
            ConfigKey::VerificationHashAlgorithm => {
                ConfigValue::String(self.verification.hash_algorithm.to_string())
            },
            ConfigKey::VerificationErrorPolicy => ConfigValue::String(
                match self.verification.error_policy {
                    ErrorPolicy::Continue => "continue",
                    ErrorPolicy::Abort => "abort",
                }
                .to_string(),
            ),
            ConfigKey::ParallelWorkerThreads => number(self.parallel.worker_threads as u64),
        }
    }

    /// Set a configuration value
    pub fn set(&mut self, key: ConfigKey, value: ConfigValue) -> Result<()> {
        match key {
            ConfigKey::NetworkConnectTimeout => {
                self.network.connect_timeout_ms = expect_number(key, &value)?
            },
            ConfigKey::NetworkReadTimeout => {
                self.network.read_timeout_ms = expect_number(key, &value)?
            },
            ConfigKey::NetworkWriteTimeout => {
                self.network.write_timeout_ms = expect_number(key, &value)?
            },
            ConfigKey::NetworkFrameSize => {
                let size = expect_number(key, &value)?;
                if size == 0 {
                    return Err(ClientError::configuration(
                        "network.frame_size must be greater than zero",
                    ));
                }
                self.network.frame_size = size as usize;
            },
            ConfigKey::RetryMaxRetries => {
                self.retry.max_retries = u32::try_from(expect_number(key, &value)?)
                    .map_err(|_| ClientError::configuration("retry.max_retries is too large"))?
            },
            ConfigKey::RetryInitialBackoff => {
                self.retry.initial_backoff_ms = expect_number(key, &value)?
            },
            ConfigKey::RetryMaxBackoff => self.retry.max_backoff_ms = expect_number(key, &value)?,
            ConfigKey::VerificationHashAlgorithm => {
                let raw = expect_string(key, &value)?;
                self.verification.hash_algorithm =
                    raw.parse().map_err(ClientError::configuration)?;
            },
            ConfigKey::VerificationErrorPolicy => {
                let raw = expect_string(key, &value)?;
                self.verification.error_policy =
                    raw.parse().map_err(ClientError::configuration)?;
            },
            ConfigKey::ParallelWorkerThreads => {
                let threads = usize::try_from(expect_number(key, &value)?)
                    .ok()
                    .filter(|&n| n <= MAX_WORKER_THREADS)
                    .ok_or_else(|| {
                        ClientError::configuration(format!(
                            "parallel.worker_threads must be at most {}",
                            MAX_WORKER_THREADS
                        ))
                    })?;
                self.parallel.worker_threads = threads;
            },
        }
        Ok(())
    }

    /// Reset a configuration value to its default
    pub fn unset(&mut self, key: &ConfigKey) -> Result<()> {
        let defaults = ClientConfig::default();
        self.set(*key, defaults.get(key))
    }

    /// List all configuration values
    pub fn list(&self) -> Vec<(String, String)> {
        let mut entries: Vec<(String, String)> = ConfigKey::ALL
            .iter()
            .map(|key| (key.to_str().to_string(), self.get(key).to_string()))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries
    }
}

fn number(n: u64) -> ConfigValue {
    ConfigValue::Number(i64::try_from(n).unwrap_or(i64::MAX))
}

fn expect_number(key: ConfigKey, value: &ConfigValue) -> Result<u64> {
    match value {
        ConfigValue::Number(n) if *n >= 0 => Ok(*n as u64),
        _ => Err(ClientError::configuration(format!(
            "{} must be a non-negative number",
            key.to_str()
        ))),
    }
}

fn expect_string(key: ConfigKey, value: &ConfigValue) -> Result<String> {
    match value {
        ConfigValue::String(s) => Ok(s.clone()),
        _ => Err(ClientError::configuration(format!(
            "{} must be a string",
            key.to_str()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults_match_plain_client() {
        let config = ClientConfig::default();
        assert_eq!(config.network.frame_size, 256);
        assert_eq!(config.retry.max_retries, 0);
        assert_eq!(config.verification.hash_algorithm, HashAlgorithm::Md5);
        assert_eq!(config.verification.error_policy, ErrorPolicy::Continue);
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            max_retries: 5,
            initial_backoff_ms: 100,
            max_backoff_ms: 350,
        };
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(350));
        assert_eq!(policy.backoff(70), Duration::from_millis(350));
    }

    #[test]
    fn test_zero_timeout_means_none() {
        let mut network = NetworkConfig::default();
        network.read_timeout_ms = 0;
        assert!(network.read_timeout().is_none());
        assert_eq!(network.connect_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_partial_file_fills_defaults() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            "[verification]\nhash_algorithm = \"sha256\"\n\n[retry]\nmax_retries = 3\n",
        )?;

        let config = ClientConfig::load_from(&path)?;
        assert_eq!(config.verification.hash_algorithm, HashAlgorithm::Sha256);
        assert_eq!(config.retry.max_retries, 3);
        assert_eq!(config.network, NetworkConfig::default());
        Ok(())
    }

    #[test]
    fn test_missing_file_yields_defaults() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let config = ClientConfig::load_from(&temp_dir.path().join("absent.toml"))?;
        assert_eq!(config, ClientConfig::default());
        Ok(())
    }

    #[test]
    fn test_zero_frame_size_rejected_on_load() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[network]\nframe_size = 0\n")?;
        assert!(matches!(
            ClientConfig::load_from(&path),
            Err(ClientError::ConfigurationError { .. })
        ));
        Ok(())
    }

    #[test]
    fn test_save_and_reload() -> anyhow::Result<()> {
        let temp_dir = TempDir::new()?;
        let path = temp_dir.path().join("nested").join("config.toml");

        let mut config = ClientConfig::default();
        config.set(ConfigKey::VerificationErrorPolicy, ConfigValue::parse("abort"))?;
        config.set(ConfigKey::ParallelWorkerThreads, ConfigValue::parse("4"))?;
        config.save_to(&path)?;

        let loaded = ClientConfig::load_from(&path)?;
        assert_eq!(loaded, config);
        Ok(())
    }

    #[test]
    fn test_set_rejects_wrong_types() {
        let mut config = ClientConfig::default();
        assert!(config
            .set(ConfigKey::NetworkFrameSize, ConfigValue::String("big".into()))
            .is_err());
        assert!(config
            .set(ConfigKey::VerificationHashAlgorithm, ConfigValue::Number(5))
            .is_err());
        assert!(config
            .set(ConfigKey::VerificationHashAlgorithm, ConfigValue::parse("crc32"))
            .is_err());
        assert!(config.set(ConfigKey::NetworkFrameSize, ConfigValue::Number(0)).is_err());
    }

    #[test]
    fn test_unset_restores_default() -> anyhow::Result<()> {
        let mut config = ClientConfig::default();
        config.set(ConfigKey::RetryMaxRetries, ConfigValue::Number(9))?;
        config.unset(&ConfigKey::RetryMaxRetries)?;
        assert_eq!(config.retry.max_retries, 0);
        Ok(())
    }

    #[test]
    fn test_unset_every_key_succeeds() -> anyhow::Result<()> {
        let mut config = ClientConfig::default();
        config.set(ConfigKey::ParallelWorkerThreads, ConfigValue::Number(8))?;
        config.set(ConfigKey::VerificationErrorPolicy, ConfigValue::parse("abort"))?;
        for key in ConfigKey::ALL {
            config.unset(&key)?;
        }
        assert_eq!(config, ClientConfig::default());
        Ok(())
    }

    #[test]
    fn test_worker_threads_are_capped() {
        let mut config = ClientConfig::default();
        assert!(config
            .set(ConfigKey::ParallelWorkerThreads, ConfigValue::Number(1_000_000))
            .is_err());
        assert!(config
            .set(
                ConfigKey::ParallelWorkerThreads,
                ConfigValue::Number(MAX_WORKER_THREADS as i64)
            )
            .is_ok());

        config.parallel.worker_threads = MAX_WORKER_THREADS + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_key_names_round_trip() {
        for key in ConfigKey::ALL {
            assert_eq!(ConfigKey::from_str(key.to_str()), Some(key));
        }
        assert_eq!(ConfigKey::from_str("user.name"), None);
        assert_eq!(ClientConfig::default().list().len(), ConfigKey::ALL.len());
    }
}
