//! League-wide head-to-head win matrix.

use nbagraph_common::{GameRecord, Team, TEAMS};
use std::cmp::Reverse;
use tracing::warn;

const N: usize = 30;

/// Wins of every team against every other team.
///
/// `wins[a][b]` counts the games team `a` won against team `b`, indexed by
/// position in the static team table. The diagonal is always zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadToHead {
    wins: [[u32; N]; N],
}

impl Default for HeadToHead {
    fn default() -> Self {
        Self { wins: [[0; N]; N] }
    }
}

fn index_of(code: &str) -> Option<usize> {
    TEAMS.iter().position(|t| t.code == code)
}

impl HeadToHead {
    /// Single pass over `games`, crediting each winner against its loser.
    pub fn compute(games: &[GameRecord]) -> Self {
        let mut matrix = Self::default();
        for game in games {
            match (index_of(game.winner()), index_of(game.loser())) {
                (Some(w), Some(l)) if w != l => matrix.wins[w][l] += 1,
                _ => warn!(game = %game, "Skipping game with unknown or identical teams"),
            }
        }
        matrix
    }

    /// Games `team` won against `opponent`. Unknown codes count as zero.
    pub fn wins(&self, team: &str, opponent: &str) -> u32 {
        match (index_of(team), index_of(opponent)) {
            (Some(a), Some(b)) => self.wins[a][b],
            _ => 0,
        }
    }

    /// `(team's wins, opponent's wins)` in their meetings.
    pub fn record(&self, team: &str, opponent: &str) -> (u32, u32) {
        (self.wins(team, opponent), self.wins(opponent, team))
    }

    /// Number of games played between the two teams.
    pub fn games_between(&self, team: &str, opponent: &str) -> u32 {
        let (w, l) = self.record(team, opponent);
        w + l
    }

    /// Wins of `team` against the whole league.
    pub fn total_wins(&self, team: &str) -> u32 {
        index_of(team).map(|a| self.wins[a].iter().sum()).unwrap_or(0)
    }

    /// All teams ordered by total wins, best first; ties keep table order.
    pub fn ordering(&self) -> Vec<&'static Team> {
        let mut teams: Vec<&'static Team> = TEAMS.iter().collect();
        teams.sort_by_key(|t| Reverse(self.total_wins(t.code)));
        teams
    }

    /// Total games recorded in the matrix.
    pub fn total_games(&self) -> u32 {
        self.wins.iter().flatten().sum()
    }

    /// True when no game has been recorded.
    pub fn is_empty(&self) -> bool {
        self.total_games() == 0
    }
}

/// Display cell for a rendered matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchupCell {
    /// A team against itself
    Diagonal,
    /// The teams have not met yet
    Unplayed,
    /// Wins and losses of the row team against the column team
    Played { wins: u32, losses: u32 },
}

impl MatchupCell {
    /// Wins minus losses; zero for cells without games.
    pub fn differential(self) -> i32 {
        match self {
            Self::Played { wins, losses } => wins as i32 - losses as i32,
            _ => 0,
        }
    }

    /// Cell annotation such as "2-1".
    pub fn label(self) -> Option<String> {
        match self {
            Self::Played { wins, losses } => Some(format!("{wins}-{losses}")),
            _ => None,
        }
    }
}

impl HeadToHead {
    /// Display cell for `team` (row) against `opponent` (column).
    pub fn cell(&self, team: &str, opponent: &str) -> MatchupCell {
        if team == opponent {
            return MatchupCell::Diagonal;
        }
        if self.games_between(team, opponent) == 0 {
            return MatchupCell::Unplayed;
        }
        let (wins, losses) = self.record(team, opponent);
        MatchupCell::Played { wins, losses }
    }
}
