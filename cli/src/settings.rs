//! Effective configuration: the TOML file is the base, flags and
//! `SUISCOPE_*` environment variables override it.

use anyhow::Context;
use std::path::PathBuf;

use suiscope_history::HistoryConfig;
use suiscope_rpc::QueryDirection;
use suiscope_utils::LogFormat;

#[derive(clap::Args, Debug, Default)]
pub struct ConfigArgs {
    /// Path to a TOML configuration file. If provided, file settings
    /// are used as the base; CLI flags and env vars override them.
    #[arg(long, global = true, env = "SUISCOPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Ledger node URL, tried in the order given. Repeat the flag or
    /// pass a comma-separated list.
    #[arg(
        long = "endpoint",
        global = true,
        env = "SUISCOPE_ENDPOINTS",
        value_delimiter = ','
    )]
    pub endpoints: Vec<String>,

    /// Number of most recent transactions to fetch (1-50).
    #[arg(long, global = true, env = "SUISCOPE_LIMIT")]
    pub limit: Option<usize>,

    /// Select transactions by "sender" or "recipient".
    #[arg(long, global = true, env = "SUISCOPE_DIRECTION")]
    pub direction: Option<QueryDirection>,

    /// Per-request timeout in seconds.
    #[arg(long, global = true, env = "SUISCOPE_REQUEST_TIMEOUT")]
    pub request_timeout_secs: Option<u64>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, global = true, env = "SUISCOPE_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, global = true, env = "SUISCOPE_LOG_FORMAT")]
    pub log_format: Option<LogFormat>,
}

impl ConfigArgs {
    /// Load the config file (if any) and layer the flags over it.
    pub fn load(&self) -> anyhow::Result<HistoryConfig> {
        let base = match &self.config {
            Some(path) => HistoryConfig::from_toml_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => HistoryConfig::default(),
        };
        Ok(self.apply(base))
    }

    pub fn apply(&self, base: HistoryConfig) -> HistoryConfig {
        HistoryConfig {
            endpoints: if self.endpoints.is_empty() {
                base.endpoints
            } else {
                self.endpoints.clone()
            },
            limit: self.limit.unwrap_or(base.limit),
            direction: self.direction.unwrap_or(base.direction),
            request_timeout_secs: self.request_timeout_secs.unwrap_or(base.request_timeout_secs),
            log_format: self.log_format.unwrap_or(base.log_format),
            log_level: self.log_level.clone().unwrap_or(base.log_level),
            ..base
        }
    }
}
