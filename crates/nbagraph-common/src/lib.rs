//! # NBA Graphs Common
//!
//! Shared types, utilities, and common functionality for NBA Graphs.
//!
//! This crate provides the foundational types (teams, conferences, game
//! records), the workspace error type and the logging bootstrap used across
//! all other crates in the workspace.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod error;
pub mod logging;
pub mod teams;
pub mod types;
pub mod utils;

#[cfg(any(test, feature = "testing"))]
pub mod test_utils;

pub use error::{NbaGraphError, Result};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use teams::{conference_of, conference_teams, find_team, lookup_team, TEAMS};
pub use types::*;
pub use utils::*;
