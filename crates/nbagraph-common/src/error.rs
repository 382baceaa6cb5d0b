//! Error types and utilities for NBA Graphs

use thiserror::Error;

/// Result type alias for NBA Graphs operations
pub type Result<T> = std::result::Result<T, NbaGraphError>;

type BoxedSource = Box<dyn std::error::Error + Send + Sync>;

/// Main error type for NBA Graphs operations
#[derive(Error, Debug)]
pub enum NbaGraphError {
    /// Team code that is not part of the league table
    #[error("Invalid team: '{code}' is not a known team code")]
    InvalidTeam { code: String },

    /// Failure retrieving a team's schedule from the stats source
    #[error("Failed to fetch schedule for '{team}': {message}")]
    Fetch {
        team: String,
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Schedule page could not be understood
    #[error("Parse error: {message}")]
    Parse { message: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Validation errors for configuration or user input
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    /// Network related errors (HTTP client construction, transport)
    #[error("Network error: {message}")]
    Network {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Graph generation and plotting errors
    #[error("Graph error: {message}")]
    Graph {
        message: String,
        #[source]
        source: Option<BoxedSource>,
    },

    /// Publishing errors, including write-once violations
    #[error("Publish error: {message}")]
    Publish { message: String },

    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl NbaGraphError {
    /// Create an invalid team error
    pub fn invalid_team(code: impl Into<String>) -> Self {
        Self::InvalidTeam { code: code.into() }
    }

    /// Create a fetch error for a team
    pub fn fetch(team: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Fetch {
            team: team.into(),
            message: msg.into(),
            source: None,
        }
    }

    /// Create a fetch error for a team with source
    pub fn fetch_with_source(
        team: impl Into<String>,
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Fetch {
            team: team.into(),
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new parse error
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new configuration error with source
    pub fn config_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Config {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new validation error with field name
    pub fn validation_field(msg: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new network error with source
    pub fn network_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Network {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new graph error
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a new graph error with source
    pub fn graph_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Graph {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a new publish error
    pub fn publish(msg: impl Into<String>) -> Self {
        Self::Publish {
            message: msg.into(),
        }
    }

    /// Attach a team to a lower-level error so the operator can see which
    /// fetch failed. Errors that already name a team are returned as-is.
    pub fn for_team(self, team: &str) -> Self {
        match self {
            Self::Fetch { .. } | Self::InvalidTeam { .. } => self,
            Self::Parse { message } => Self::fetch(team, message),
            other => Self::fetch_with_source(team, other.to_string(), other),
        }
    }

    /// The team this error refers to, if any
    pub fn team(&self) -> Option<&str> {
        match self {
            Self::Fetch { team, .. } => Some(team),
            Self::InvalidTeam { code } => Some(code),
            _ => None,
        }
    }
}

/// Convert from reqwest::Error to NbaGraphError
impl From<reqwest::Error> for NbaGraphError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network_with_source("Request timeout", err)
        } else if err.is_connect() {
            Self::network_with_source("Connection failed", err)
        } else if err.is_status() {
            let status_code = err.status().map(|s| s.as_u16()).unwrap_or(0);
            Self::network_with_source(format!("HTTP error: {status_code}"), err)
        } else {
            Self::network_with_source("Network request failed", err)
        }
    }
}

#[cfg(feature = "plotters")]
/// Convert from plotters drawing errors to NbaGraphError
impl<T> From<plotters::drawing::DrawingAreaErrorKind<T>> for NbaGraphError
where
    T: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<T>) -> Self {
        Self::graph_with_source("Graph rendering failed", err)
    }
}
