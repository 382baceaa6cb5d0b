//! # NBA Graphs
//!
//! Command line front end: scrape schedules, render the weekly graphs,
//! publish them to frozen URLs and serve the published images.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod app;
pub mod cli;
pub mod error;

pub use app::App;
pub use cli::{CacheCommand, Cli, Command};
pub use error::{CliError, CliResult};
