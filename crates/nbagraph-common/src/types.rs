//! Common type definitions for domain modeling.

use crate::error::{NbaGraphError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// NBA conference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conference {
    /// Eastern Conference
    East,
    /// Western Conference
    West,
}

impl Conference {
    /// Both conferences, East first.
    pub const ALL: [Conference; 2] = [Conference::East, Conference::West];

    /// Long display name, e.g. "Eastern".
    pub fn long_name(self) -> &'static str {
        match self {
            Self::East => "Eastern",
            Self::West => "Western",
        }
    }

    /// URL slug used for published standings, e.g. "eastern-conference".
    pub fn slug(self) -> &'static str {
        match self {
            Self::East => "eastern-conference",
            Self::West => "western-conference",
        }
    }
}

impl fmt::Display for Conference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::East => write!(f, "east"),
            Self::West => write!(f, "west"),
        }
    }
}

impl FromStr for Conference {
    type Err = NbaGraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "east" | "eastern" | "e" => Ok(Self::East),
            "west" | "western" | "w" => Ok(Self::West),
            other => Err(NbaGraphError::validation_field(
                format!("unknown conference '{other}'"),
                "conference",
            )),
        }
    }
}

/// Static reference data for one franchise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Team {
    /// ESPN short code, e.g. "bos"
    pub code: &'static str,
    /// Display name, e.g. "Celtics"
    pub name: &'static str,
    /// Conference membership
    pub conference: Conference,
    /// Primary color (hex)
    pub color: &'static str,
    /// Secondary color (hex)
    pub color2: &'static str,
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.code)
    }
}

/// One completed game. Immutable once fetched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameRecord {
    /// Game date (local US date as listed on the schedule)
    pub date: NaiveDate,
    /// Home team code
    pub home: String,
    /// Away team code
    pub away: String,
    /// Home team final score
    pub home_score: u16,
    /// Away team final score
    pub away_score: u16,
}

/// Identity of a game: `(date, team, team)` with the codes sorted.
pub type GameKey = (NaiveDate, String, String);

impl GameRecord {
    /// Build a record from one team's point of view.
    pub fn from_perspective(
        date: NaiveDate,
        team: &str,
        opponent: &str,
        is_home: bool,
        team_score: u16,
        opponent_score: u16,
    ) -> Self {
        if is_home {
            Self {
                date,
                home: team.to_string(),
                away: opponent.to_string(),
                home_score: team_score,
                away_score: opponent_score,
            }
        } else {
            Self {
                date,
                home: opponent.to_string(),
                away: team.to_string(),
                home_score: opponent_score,
                away_score: team_score,
            }
        }
    }

    /// Unique identity of this game: the date and the two teams in code
    /// order. Two teams never meet twice on one day, so a neutral-site game
    /// listed as "vs" on both schedules still has a single key.
    pub fn key(&self) -> GameKey {
        let (first, second) = if self.home <= self.away {
            (&self.home, &self.away)
        } else {
            (&self.away, &self.home)
        };
        (self.date, first.clone(), second.clone())
    }

    /// Winning team code.
    pub fn winner(&self) -> &str {
        if self.home_score > self.away_score {
            &self.home
        } else {
            &self.away
        }
    }

    /// Losing team code.
    pub fn loser(&self) -> &str {
        if self.home_score > self.away_score {
            &self.away
        } else {
            &self.home
        }
    }

    /// Whether `team` played in this game.
    pub fn involves(&self, team: &str) -> bool {
        self.home == team || self.away == team
    }

    /// Whether `team` won this game. False if the team did not play.
    pub fn is_win_for(&self, team: &str) -> bool {
        self.involves(team) && self.winner() == team
    }
}

impl fmt::Display for GameRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} @ {} {}",
            self.date, self.away, self.away_score, self.home, self.home_score
        )
    }
}

/// The three published graph families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GraphKind {
    /// Cumulative standings for one conference
    Standings(Conference),
    /// League-wide head-to-head matrix
    HeadToHead,
    /// East vs West cumulative tally
    ConferenceBattle,
}

impl GraphKind {
    /// Every graph the pipeline produces.
    pub const ALL: [GraphKind; 4] = [
        GraphKind::Standings(Conference::East),
        GraphKind::Standings(Conference::West),
        GraphKind::HeadToHead,
        GraphKind::ConferenceBattle,
    ];

    /// Directory (relative to the output root) the renderer writes into.
    pub fn output_dir(self) -> &'static str {
        match self {
            Self::Standings(_) => ".standings",
            Self::HeadToHead => ".head_to_head",
            Self::ConferenceBattle => ".conference_battle",
        }
    }

    /// File name of the rendered image.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Standings(Conference::East) => "east_standings.png",
            Self::Standings(Conference::West) => "west_standings.png",
            Self::HeadToHead => "head_to_head.png",
            Self::ConferenceBattle => "conference_battle.png",
        }
    }

    /// Rendered image location below the output `root`.
    pub fn output_path(self, root: &Path) -> PathBuf {
        root.join(self.output_dir()).join(self.file_name())
    }

    /// Prefix of the frozen public URL; the date and `.png` are appended.
    pub fn url_prefix(self) -> String {
        match self {
            Self::Standings(conference) => format!("/nba-standings/{}", conference.slug()),
            Self::HeadToHead => "/nba-head-to-head".to_string(),
            Self::ConferenceBattle => "/nba-east-vs-west".to_string(),
        }
    }

    /// Public URL path for the image published on `date`.
    pub fn public_url(self, date: NaiveDate) -> String {
        format!("{}/{}.png", self.url_prefix(), date.format("%Y-%m-%d"))
    }
}

impl fmt::Display for GraphKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standings(conference) => write!(f, "standings-{conference}"),
            Self::HeadToHead => write!(f, "head-to-head"),
            Self::ConferenceBattle => write!(f, "conference-battle"),
        }
    }
}

impl FromStr for GraphKind {
    type Err = NbaGraphError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "standings-east" | "east" => Ok(Self::Standings(Conference::East)),
            "standings-west" | "west" => Ok(Self::Standings(Conference::West)),
            "head-to-head" | "h2h" => Ok(Self::HeadToHead),
            "conference-battle" | "east-vs-west" => Ok(Self::ConferenceBattle),
            other => Err(NbaGraphError::validation_field(
                format!("unknown graph '{other}'"),
                "graph",
            )),
        }
    }
}
