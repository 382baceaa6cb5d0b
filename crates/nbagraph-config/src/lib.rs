//! # NBA Graphs Config
//!
//! YAML configuration for NBA Graphs.
//!
//! Loading order is file (explicit path, `NBAGRAPH_CONFIG`, or
//! `nbagraph.yaml`), then environment overrides, then validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validator;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
pub use validator::*;
