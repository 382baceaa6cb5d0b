//! # NBA Graphs Web
//!
//! Write-once publishing of rendered graphs and the static server that
//! serves them from their frozen URLs.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod manifest;
pub mod publisher;
pub mod server;

pub use manifest::{Manifest, ManifestEntry};
pub use publisher::Publisher;
pub use server::{router, serve, AppState, IMMUTABLE_CACHE_CONTROL};
