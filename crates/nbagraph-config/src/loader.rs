//! Configuration loading utilities

use crate::defaults::DEFAULT_CONFIG_FILE;
use crate::schema::Config;
use nbagraph_common::{LogFormat, NbaGraphError};
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "NBAGRAPH_CONFIG";

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file '{path}': {source}")]
    IoError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[source] NbaGraphError),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for NbaGraphError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::ValidationError(inner) => inner,
            other => NbaGraphError::config_with_source(other.to_string(), other),
        }
    }
}

/// Configuration loader: YAML file, then environment overrides, then validation.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::IoError {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = serde_yaml::from_str(&content)?;
        debug!(path = %path.display(), "Parsed configuration file");

        Self::apply_env_overrides(&mut config)?;
        config.validate().map_err(ConfigError::ValidationError)?;

        Ok(config)
    }

    /// Load configuration from `explicit`, `NBAGRAPH_CONFIG`, or `nbagraph.yaml`
    /// in the working directory, falling back to defaults when none exists.
    pub fn load(explicit: Option<&Path>) -> nbagraph_common::Result<Config> {
        let path = explicit
            .map(Path::to_path_buf)
            .or_else(|| env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));

        let config = match path {
            Some(path) => {
                info!(path = %path.display(), "Loading configuration");
                Self::load_config(&path)?
            }
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                info!(path = DEFAULT_CONFIG_FILE, "Loading configuration");
                Self::load_config(DEFAULT_CONFIG_FILE)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                let mut config = Config::default();
                Self::apply_env_overrides(&mut config)?;
                config.validate()?;
                config
            }
        };

        Ok(config)
    }

    /// Apply process environment overrides to configuration
    pub fn apply_env_overrides(config: &mut Config) -> Result<(), ConfigError> {
        Self::apply_overrides_from(config, |key| env::var(key).ok())
    }

    /// Apply overrides using `lookup` as the variable source.
    pub fn apply_overrides_from<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("NBAGRAPH_CACHE_DIR") {
            config.cache.dir = PathBuf::from(dir);
        }
        if let Some(root) = lookup("NBAGRAPH_OUTPUT_DIR") {
            config.output.root = PathBuf::from(root);
        }
        if let Some(dir) = lookup("NBAGRAPH_LOGO_DIR") {
            config.graph.logo_dir = PathBuf::from(dir);
        }

        if let Some(url) = lookup("ESPN_BASE_URL") {
            config.fetch.base_url = url.trim_end_matches('/').to_string();
        }
        if let Some(timeout) = lookup("ESPN_TIMEOUT") {
            config.fetch.timeout_seconds = parse_var("ESPN_TIMEOUT", &timeout)?;
        }
        if let Some(rate) = lookup("ESPN_RATE_LIMIT") {
            config.fetch.rate_limit_per_second = parse_var("ESPN_RATE_LIMIT", &rate)?;
        }

        if let Some(season) = lookup("NBAGRAPH_SEASON") {
            config.season.label = Some(season);
        }

        if let Some(dir) = lookup("NBAGRAPH_PUBLIC_DIR") {
            config.publish.public_dir = PathBuf::from(dir);
        }
        if let Some(manifest) = lookup("NBAGRAPH_MANIFEST") {
            config.publish.manifest_path = PathBuf::from(manifest);
        }
        if let Some(bind) = lookup("NBAGRAPH_BIND") {
            config.server.bind = bind;
        }

        if let Some(level) = lookup("LOG_LEVEL") {
            config.logging.level = level;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            config.logging.format = parse_var::<LogFormat>("LOG_FORMAT", &format)?;
        }
        if let Some(file) = lookup("LOG_FILE") {
            config.logging.file = Some(file);
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}
