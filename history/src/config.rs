//! History service configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use suiscope_rpc::{QueryDirection, TransportOptions, DEFAULT_LIMIT, MAX_LIMIT};
use suiscope_types::{Endpoint, TypesError};
use suiscope_utils::LogFormat;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid endpoint: {0}")]
    Endpoint(#[from] TypesError),

    #[error("no ledger endpoints configured")]
    NoEndpoints,

    #[error("limit must be between 1 and {max}, got {0}", max = MAX_LIMIT)]
    Limit(usize),

    #[error("failed to build transport: {0}")]
    Transport(String),
}

/// Configuration for a history lookup.
///
/// Can be loaded from a TOML file via [`HistoryConfig::from_toml_file`] or
/// built programmatically (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Ledger node URLs, tried strictly in this order.
    #[serde(default = "default_endpoints")]
    pub endpoints: Vec<String>,

    /// Number of most recent transactions to fetch.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Select transactions by sender (default) or recipient.
    #[serde(default)]
    pub direction: QueryDirection,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_endpoints() -> Vec<String> {
    vec![
        "https://fullnode.mainnet.sui.io:443".to_string(),
        "https://sui-rpc.publicnode.com".to_string(),
        "https://sui-mainnet-rpc.allthatnode.com:8545".to_string(),
    ]
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

fn default_log_level() -> String {
    "warn".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl HistoryConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(s)?)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check the values a history request depends on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=MAX_LIMIT).contains(&self.limit) {
            return Err(ConfigError::Limit(self.limit));
        }
        self.endpoint_list().map(|_| ())
    }

    /// The ordered endpoint list; priority is list position.
    pub fn endpoint_list(&self) -> Result<Vec<Endpoint>, ConfigError> {
        if self.endpoints.is_empty() {
            return Err(ConfigError::NoEndpoints);
        }
        Ok(Endpoint::list_from_urls(&self.endpoints)?)
    }

    pub fn transport_options(&self) -> TransportOptions {
        TransportOptions {
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
        }
    }
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            endpoints: default_endpoints(),
            limit: default_limit(),
            direction: QueryDirection::default(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }
}
