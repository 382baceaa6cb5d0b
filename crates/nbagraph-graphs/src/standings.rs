//! Cumulative conference standings.

use chrono::NaiveDate;
use nbagraph_common::{conference_teams, Conference, GameRecord, Team};
use serde::Serialize;
use std::cmp::Reverse;

/// A team's record after the games of one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordPoint {
    pub date: NaiveDate,
    pub wins: u32,
    pub losses: u32,
}

impl RecordPoint {
    /// Games played up to and including `date`.
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }

    /// Wins minus losses.
    pub fn games_over_500(&self) -> i32 {
        self.wins as i32 - self.losses as i32
    }
}

/// Cumulative record series for one team.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamStandings {
    pub team: &'static Team,
    /// One point per game played, in date order
    pub points: Vec<RecordPoint>,
}

impl TeamStandings {
    /// Build the series for `team`. Games the team did not play are ignored.
    pub fn compute(team: &'static Team, games: &[GameRecord]) -> Self {
        let mut played: Vec<&GameRecord> = games.iter().filter(|g| g.involves(team.code)).collect();
        played.sort_by_key(|g| g.date);

        let (mut wins, mut losses) = (0, 0);
        let points = played
            .into_iter()
            .map(|game| {
                if game.is_win_for(team.code) {
                    wins += 1;
                } else {
                    losses += 1;
                }
                RecordPoint {
                    date: game.date,
                    wins,
                    losses,
                }
            })
            .collect();

        Self { team, points }
    }

    /// `(wins, losses)` after the last game, `(0, 0)` before the first.
    pub fn final_record(&self) -> (u32, u32) {
        self.points
            .last()
            .map(|p| (p.wins, p.losses))
            .unwrap_or((0, 0))
    }

    /// Final wins minus losses.
    pub fn games_over_500(&self) -> i32 {
        let (wins, losses) = self.final_record();
        wins as i32 - losses as i32
    }

    pub fn games_played(&self) -> usize {
        self.points.len()
    }
}

/// Standings of every team in one conference.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConferenceStandings {
    pub conference: Conference,
    /// One series per team, in team table order
    pub teams: Vec<TeamStandings>,
}

impl ConferenceStandings {
    /// Compute the cumulative series for all 15 teams of `conference`.
    pub fn compute(games: &[GameRecord], conference: Conference) -> Self {
        let teams = conference_teams(conference)
            .map(|team| TeamStandings::compute(team, games))
            .collect();
        Self { conference, teams }
    }

    /// Series for one team code.
    pub fn team(&self, code: &str) -> Option<&TeamStandings> {
        self.teams.iter().find(|t| t.team.code == code)
    }

    /// Teams ordered best first by games over .500, ties broken by code.
    pub fn ranking(&self) -> Vec<&TeamStandings> {
        let mut ranked: Vec<&TeamStandings> = self.teams.iter().collect();
        ranked.sort_by_key(|t| (Reverse(t.games_over_500()), t.team.code));
        ranked
    }

    /// True when no team in the conference has played.
    pub fn is_empty(&self) -> bool {
        self.teams.iter().all(|t| t.points.is_empty())
    }

    /// Most games any team has played.
    pub fn max_games_played(&self) -> usize {
        self.teams.iter().map(TeamStandings::games_played).max().unwrap_or(0)
    }

    /// Lowest and highest games-over-.500 reached by any team at any point.
    pub fn games_over_500_extent(&self) -> (i32, i32) {
        self.teams
            .iter()
            .flat_map(|t| t.points.iter().map(RecordPoint::games_over_500))
            .fold((0, 0), |(lo, hi), v| (lo.min(v), hi.max(v)))
    }
}
