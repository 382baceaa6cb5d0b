//! Command line arguments.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use nbagraph_common::{Conference, GraphKind};
use std::path::PathBuf;

/// Weekly NBA standings, head-to-head and East-vs-West graphs.
#[derive(Parser, Debug)]
#[command(name = "nbagraph", author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level or filter directive, overrides the configuration
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    /// Command to run
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Fetch one team's completed games (cached after the first run)
    Fetch {
        /// Team code, e.g. bos
        team: String,
    },

    /// List the 30 teams by conference
    Teams,

    /// Render cumulative standings for one conference
    Standings {
        /// east or west
        conference: Conference,
    },

    /// Render the head-to-head matrix
    HeadToHead,

    /// Render the East vs West tally
    ConferenceBattle,

    /// Fetch the league once and render every graph
    All,

    /// Copy a rendered graph to its frozen public URL
    Publish {
        /// standings-east, standings-west, head-to-head or conference-battle
        kind: GraphKind,

        /// Publication date (defaults to today)
        #[arg(short, long, value_name = "YYYY-MM-DD")]
        date: Option<NaiveDate>,
    },

    /// List published URLs
    Published {
        /// Only this graph kind
        kind: Option<GraphKind>,
    },

    /// Manage the schedule cache
    Cache {
        /// What to do with the cache
        #[command(subcommand)]
        action: CacheCommand,
    },

    /// Serve published images
    Serve {
        /// Socket address, overrides server.bind
        #[arg(short, long, value_name = "ADDR")]
        bind: Option<String>,
    },
}

/// `cache` subcommands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum CacheCommand {
    /// Delete cached schedules so the next run scrapes again
    Clear {
        /// Only this team
        team: Option<String>,
    },
}
