//! # NBA Graphs Rendering
//!
//! Schedule scraping, aggregation and PNG rendering for NBA Graphs.
//!
//! This crate fetches per-team schedules through a durable on-disk cache,
//! turns the league's games into standings, head-to-head and conference
//! battle aggregates, and renders them natively with plotters.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cache;
pub mod data_fetcher;
pub mod espn;
pub mod manager;
pub mod renderer;
pub mod traits;
pub mod utils;

// Aggregators
pub mod conference_battle;
pub mod head_to_head;
pub mod standings;

// Graph implementations
pub mod conference_battle_graph;
pub mod head_to_head_graph;
pub mod standings_graph;

pub use cache::{CacheEntry, TeamCache};
pub use conference_battle::{BattlePoint, ConferenceBattle};
pub use conference_battle_graph::ConferenceBattleGraph;
pub use data_fetcher::*;
pub use espn::{parse_schedule, EspnClient};
pub use head_to_head::{HeadToHead, MatchupCell};
pub use head_to_head_graph::HeadToHeadGraph;
pub use manager::*;
pub use renderer::GraphStyle;
pub use standings::{ConferenceStandings, RecordPoint, TeamStandings};
pub use standings_graph::StandingsGraph;
pub use traits::*;
pub use utils::*;
