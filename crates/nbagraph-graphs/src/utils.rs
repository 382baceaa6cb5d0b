//! Graph utility functions and helpers.

use nbagraph_common::GameRecord;
use std::collections::HashSet;

/// Keep the first occurrence of every game key, then sort by date (stable).
pub fn dedupe_games(games: Vec<GameRecord>) -> Vec<GameRecord> {
    let mut seen = HashSet::with_capacity(games.len());
    let mut unique: Vec<GameRecord> = games.into_iter().filter(|g| seen.insert(g.key())).collect();
    unique.sort_by_key(|g| g.date);
    unique
}

/// Symmetric axis bounds around zero that contain `[min, max]` with `pad`
/// units of headroom.
pub fn symmetric_bounds(min: i32, max: i32, pad: i32) -> (i32, i32) {
    let extent = min.abs().max(max.abs()) + pad;
    (-extent, extent)
}

/// Upper bound for a count axis, never below `floor`.
pub fn count_ceiling(max: u32, floor: u32) -> u32 {
    let padded = max + (max / 10).max(1);
    padded.max(floor)
}
