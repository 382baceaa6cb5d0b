//! Test utilities and shared fixtures for NBA Graphs.
//!
//! Available to this crate's unit tests and, through the `testing` feature,
//! to the tests of every other crate in the workspace.

use crate::types::GameRecord;
use chrono::NaiveDate;
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

static INIT: Once = Once::new();

/// Initialize logging for tests. Safe to call multiple times.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// Create a temporary directory for tests that automatically cleans up.
pub fn create_temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Shorthand date constructor.
pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid test date")
}

/// Game fixtures.
pub mod game_fixtures {
    use super::*;

    /// A finished game with explicit scores.
    pub fn game(date: NaiveDate, home: &str, away: &str, home_score: u16, away_score: u16) -> GameRecord {
        GameRecord {
            date,
            home: home.to_string(),
            away: away.to_string(),
            home_score,
            away_score,
        }
    }

    /// `winner` beats `loser` at home, 110-100.
    pub fn home_win(date: NaiveDate, winner: &str, loser: &str) -> GameRecord {
        game(date, winner, loser, 110, 100)
    }

    /// `winner` beats `loser` on the road, 100-110 from the home side.
    pub fn away_win(date: NaiveDate, winner: &str, loser: &str) -> GameRecord {
        game(date, loser, winner, 100, 110)
    }

    /// A small opening week mixing conference and cross-conference games.
    ///
    /// Final records: bos 2-1, ny 1-1, mem 1-1, lal 1-2, phi 1-0, okc 0-1.
    pub fn opening_week() -> Vec<GameRecord> {
        vec![
            home_win(date(2025, 10, 22), "bos", "ny"),
            away_win(date(2025, 10, 22), "mem", "lal"),
            home_win(date(2025, 10, 24), "bos", "lal"),
            away_win(date(2025, 10, 25), "ny", "mem"),
            home_win(date(2025, 10, 27), "lal", "okc"),
            away_win(date(2025, 10, 28), "phi", "bos"),
        ]
    }
}

/// Property-based testing strategies.
pub mod property_testing {
    use super::*;
    use crate::teams::TEAMS;
    use proptest::prelude::*;

    /// Index pair of two distinct teams.
    fn matchup_strategy() -> impl Strategy<Value = (usize, usize)> {
        (0..TEAMS.len(), 1..TEAMS.len()).prop_map(|(a, offset)| (a, (a + offset) % TEAMS.len()))
    }

    /// A valid game between two distinct known teams during the 2025-26 season.
    pub fn game_strategy() -> impl Strategy<Value = GameRecord> {
        (matchup_strategy(), 0i64..170, 80u16..140, 1u16..30, any::<bool>()).prop_map(
            |((home, away), day, base, margin, home_wins)| {
                let (home_score, away_score) = if home_wins {
                    (base + margin, base)
                } else {
                    (base, base + margin)
                };
                GameRecord {
                    date: date(2025, 10, 21) + chrono::Duration::days(day),
                    home: TEAMS[home].code.to_string(),
                    away: TEAMS[away].code.to_string(),
                    home_score,
                    away_score,
                }
            },
        )
    }

    /// Up to `max` games, deduplicated by game key.
    pub fn games_strategy(max: usize) -> impl Strategy<Value = Vec<GameRecord>> {
        prop::collection::vec(game_strategy(), 0..max).prop_map(|games| {
            let mut seen = std::collections::HashSet::new();
            games.into_iter().filter(|g| seen.insert(g.key())).collect()
        })
    }
}
