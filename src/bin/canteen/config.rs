//! CLI configuration

use std::{path::PathBuf, time::Duration};

use clap::Args;

use canteen::facades::CallPolicy;

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(
        long,
        env = "CANTEEN_LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Compact,
        global = true
    )]
    pub log_format: LogFormat,
}

/// Storage and service settings.
#[derive(Debug, Args)]
pub(crate) struct ClientConfig {
    /// Directory holding the session, cart and order history
    #[arg(long, env = "CANTEEN_DATA_DIR", default_value = ".canteen", global = true)]
    pub data_dir: PathBuf,

    /// Simulated service latency in milliseconds
    #[arg(long, env = "CANTEEN_LATENCY_MS", default_value_t = 0, global = true)]
    pub latency_ms: u64,

    /// Service call timeout in milliseconds
    #[arg(long, env = "CANTEEN_TIMEOUT_MS", default_value_t = 10_000, global = true)]
    pub timeout_ms: u64,
}

impl ClientConfig {
    pub(crate) fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }

    pub(crate) fn policy(&self) -> CallPolicy {
        CallPolicy::with_timeout(Duration::from_millis(self.timeout_ms))
    }
}
