//! Structured logging infrastructure for NBA Graphs

use crate::error::{NbaGraphError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Mutex;
use tracing_subscriber::{fmt as tfmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Output format of the log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Multi-line human readable output with colors
    Pretty,
    /// Single-line output
    #[default]
    Compact,
    /// Newline-delimited JSON
    Json,
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Compact => write!(f, "compact"),
            Self::Json => write!(f, "json"),
        }
    }
}

impl FromStr for LogFormat {
    type Err = NbaGraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(NbaGraphError::validation_field(
                format!("unknown log format '{other}'"),
                "logging.format",
            )),
        }
    }
}

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "nbagraph_graphs=debug")
    pub level: String,
    /// Output format
    pub format: LogFormat,
    /// Optional file path for log output instead of stderr
    pub file_path: Option<String>,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Compact,
            file_path: None,
            include_targets: true,
        }
    }
}

/// Initialize the tracing subscriber with the given configuration.
///
/// `RUST_LOG` takes precedence over the configured level when set.
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .or_else(|_| EnvFilter::try_new("info"))
        .map_err(|e| NbaGraphError::config_with_source("Invalid log filter", e))?;

    let registry = tracing_subscriber::registry().with(env_filter);
    let file = match &config.file_path {
        Some(path) => Some(Mutex::new(
            std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?,
        )),
        None => None,
    };

    let result = match (config.format, file) {
        (LogFormat::Json, Some(file)) => registry
            .with(tfmt::layer().json().with_target(config.include_targets).with_writer(file))
            .try_init(),
        (LogFormat::Json, None) => registry
            .with(
                tfmt::layer()
                    .json()
                    .with_target(config.include_targets)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        (LogFormat::Pretty, Some(file)) => registry
            .with(
                tfmt::layer()
                    .pretty()
                    .with_ansi(false)
                    .with_target(config.include_targets)
                    .with_writer(file),
            )
            .try_init(),
        (LogFormat::Pretty, None) => registry
            .with(
                tfmt::layer()
                    .pretty()
                    .with_target(config.include_targets)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        (LogFormat::Compact, Some(file)) => registry
            .with(
                tfmt::layer()
                    .compact()
                    .with_ansi(false)
                    .with_target(config.include_targets)
                    .with_writer(file),
            )
            .try_init(),
        (LogFormat::Compact, None) => registry
            .with(
                tfmt::layer()
                    .compact()
                    .with_target(config.include_targets)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| NbaGraphError::config_with_source("Failed to install log subscriber", e))
}
