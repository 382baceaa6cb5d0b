//! East vs West running tally of cross-conference games.

use chrono::NaiveDate;
use nbagraph_common::{conference_of, Conference, GameRecord};
use serde::Serialize;

/// Cumulative cross-conference wins after the games of one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BattlePoint {
    pub date: NaiveDate,
    pub east_wins: u32,
    pub west_wins: u32,
}

impl BattlePoint {
    /// East wins minus West wins.
    pub fn differential(&self) -> i32 {
        self.east_wins as i32 - self.west_wins as i32
    }
}

/// One point per date with at least one East vs West game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ConferenceBattle {
    pub points: Vec<BattlePoint>,
}

impl ConferenceBattle {
    /// Tally cross-conference games. Intra-conference games and games with
    /// unknown teams are ignored.
    pub fn compute(games: &[GameRecord]) -> Self {
        let mut cross: Vec<(NaiveDate, Conference)> = games
            .iter()
            .filter_map(|g| {
                let winner = conference_of(g.winner())?;
                let loser = conference_of(g.loser())?;
                (winner != loser).then_some((g.date, winner))
            })
            .collect();
        cross.sort_by_key(|(date, _)| *date);

        let mut points: Vec<BattlePoint> = Vec::new();
        let (mut east_wins, mut west_wins) = (0, 0);
        for (date, winner) in cross {
            match winner {
                Conference::East => east_wins += 1,
                Conference::West => west_wins += 1,
            }
            let point = BattlePoint {
                date,
                east_wins,
                west_wins,
            };
            match points.last_mut() {
                Some(last) if last.date == date => *last = point,
                _ => points.push(point),
            }
        }

        Self { points }
    }

    /// Final `(east, west)` totals.
    pub fn totals(&self) -> (u32, u32) {
        self.points
            .last()
            .map(|p| (p.east_wins, p.west_wins))
            .unwrap_or((0, 0))
    }

    /// Running East minus West differential.
    pub fn differential(&self) -> Vec<(NaiveDate, i32)> {
        self.points.iter().map(|p| (p.date, p.differential())).collect()
    }

    /// Conference ahead after the last game, `None` when level.
    pub fn leader(&self) -> Option<Conference> {
        let (east, west) = self.totals();
        match east.cmp(&west) {
            std::cmp::Ordering::Greater => Some(Conference::East),
            std::cmp::Ordering::Less => Some(Conference::West),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First and last dates of the series.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        Some((self.points.first()?.date, self.points.last()?.date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbagraph_common::test_utils::{date, game_fixtures::*, property_testing::games_strategy};
    use proptest::prelude::*;

    #[test]
    fn test_opening_week_battle() {
        let battle = ConferenceBattle::compute(&opening_week());

        // bos beat lal on 10-24, ny won at mem on 10-25.
        assert_eq!(
            battle.points,
            vec![
                BattlePoint { date: date(2025, 10, 24), east_wins: 1, west_wins: 0 },
                BattlePoint { date: date(2025, 10, 25), east_wins: 2, west_wins: 0 },
            ]
        );
        assert_eq!(battle.totals(), (2, 0));
        assert_eq!(battle.leader(), Some(Conference::East));
        assert_eq!(battle.differential(), vec![(date(2025, 10, 24), 1), (date(2025, 10, 25), 2)]);
    }

    #[test]
    fn test_same_day_games_collapse_into_one_point() {
        let games = vec![
            home_win(date(2025, 11, 3), "lal", "bos"),
            home_win(date(2025, 11, 3), "mia", "gs"),
            away_win(date(2025, 11, 3), "den", "ny"),
            home_win(date(2025, 11, 3), "mia", "orl"),
        ];
        let battle = ConferenceBattle::compute(&games);
        assert_eq!(battle.points.len(), 1);
        assert_eq!(battle.totals(), (1, 2));
        assert_eq!(battle.leader(), Some(Conference::West));
    }

    #[test]
    fn test_no_cross_conference_games() {
        let games = vec![home_win(date(2025, 10, 22), "bos", "ny")];
        let battle = ConferenceBattle::compute(&games);
        assert!(battle.is_empty());
        assert_eq!(battle.totals(), (0, 0));
        assert_eq!(battle.leader(), None);
        assert_eq!(battle.date_range(), None);
        assert!(ConferenceBattle::compute(&[]).is_empty());
    }

    proptest! {
        #[test]
        fn prop_totals_match_cross_conference_games(games in games_strategy(80)) {
            let battle = ConferenceBattle::compute(&games);
            let cross = games
                .iter()
                .filter(|g| conference_of(&g.home) != conference_of(&g.away))
                .count() as u32;
            let (east, west) = battle.totals();
            prop_assert_eq!(east + west, cross);
            let monotonic = battle.points.windows(2).all(|w| {
                w[0].date < w[1].date
                    && w[0].east_wins <= w[1].east_wins
                    && w[0].west_wins <= w[1].west_wins
            });
            prop_assert!(monotonic);
        }
    }
}
