//! Application-wide error types using thiserror.

use nbagraph_common::NbaGraphError;

/// Errors surfaced by the command line front end.
#[derive(thiserror::Error, Debug)]
pub enum CliError {
    /// Any failure from the fetch, render or publish pipeline.
    #[error(transparent)]
    NbaGraph(#[from] NbaGraphError),

    /// `--bind` or `server.bind` is not a socket address.
    #[error("Invalid bind address '{addr}': {source}")]
    InvalidBind {
        /// The rejected value.
        addr: String,
        /// Parse failure.
        #[source]
        source: std::net::AddrParseError,
    },

    /// Writing command output failed.
    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    /// Team named by the underlying fetch error, if any.
    pub fn team(&self) -> Option<&str> {
        match self {
            Self::NbaGraph(e) => e.team(),
            _ => None,
        }
    }
}

/// Result type for the command line application.
pub type CliResult<T> = Result<T, CliError>;
