//! Static league table.
//!
//! Codes are the short names ESPN uses in its team URLs. Colors are the
//! official primary/secondary colors, tuned for dark backgrounds.

use crate::error::{NbaGraphError, Result};
use crate::types::Conference::{East, West};
use crate::types::{Conference, Team};

const fn team(
    code: &'static str,
    name: &'static str,
    conference: Conference,
    color: &'static str,
    color2: &'static str,
) -> Team {
    Team {
        code,
        name,
        conference,
        color,
        color2,
    }
}

/// All 30 teams, Eastern Conference first, alphabetical by code within each.
pub static TEAMS: [Team; 30] = [
    team("atl", "Hawks", East, "#E03A3E", "#C1D32F"),
    team("bos", "Celtics", East, "#007A33", "#BA9653"),
    team("bkn", "Nets", East, "#000000", "#A1A1A4"),
    team("cha", "Hornets", East, "#1D1160", "#00788C"),
    team("chi", "Bulls", East, "#CE1141", "#000000"),
    team("cle", "Cavaliers", East, "#FFB81C", "#6F263D"),
    team("det", "Pistons", East, "#C8102E", "#1D42BA"),
    team("ind", "Pacers", East, "#FDBB30", "#002D62"),
    team("mia", "Heat", East, "#98002E", "#000000"),
    team("mil", "Bucks", East, "#00471B", "#552582"),
    team("ny", "Knicks", East, "#F58426", "#006BB6"),
    team("orl", "Magic", East, "#0077C0", "#C4CED4"),
    team("phi", "76ers", East, "#006BB6", "#ED174C"),
    team("tor", "Raptors", East, "#CE1141", "#5D2E8C"),
    team("wsh", "Wizards", East, "#002B5C", "#E31837"),
    team("dal", "Mavericks", West, "#B8C4CA", "#00538C"),
    team("den", "Nuggets", West, "#0E2240", "#FEC524"),
    team("gs", "Warriors", West, "#FFC72C", "#1D428A"),
    team("hou", "Rockets", West, "#CE1141", "#C4CED4"),
    team("lac", "Clippers", West, "#C8102E", "#1D428A"),
    team("lal", "Lakers", West, "#FDB927", "#552583"),
    team("mem", "Grizzlies", West, "#5D76A9", "#12173F"),
    team("min", "Wolves", West, "#236192", "#0C2340"),
    team("no", "Pelicans", West, "#0C2340", "#85714D"),
    team("okc", "Thunder", West, "#007AC1", "#EF3B24"),
    team("phx", "Suns", West, "#E56020", "#1D1160"),
    team("por", "Blazers", West, "#000000", "#E03A3E"),
    team("sac", "Kings", West, "#5A2D81", "#63727A"),
    team("sa", "Spurs", West, "#C4CED4", "#000000"),
    team("utah", "Jazz", West, "#00471B", "#F9A01B"),
];

/// Find a team by code, ignoring case and surrounding whitespace.
pub fn find_team(code: &str) -> Option<&'static Team> {
    let code = code.trim();
    TEAMS.iter().find(|t| t.code.eq_ignore_ascii_case(code))
}

/// Resolve a team code or fail with [`NbaGraphError::InvalidTeam`].
pub fn lookup_team(code: &str) -> Result<&'static Team> {
    find_team(code).ok_or_else(|| NbaGraphError::invalid_team(code.trim()))
}

/// Teams of one conference in table order.
pub fn conference_teams(conference: Conference) -> impl Iterator<Item = &'static Team> {
    TEAMS.iter().filter(move |t| t.conference == conference)
}

/// Conference of a team code, if the code is known.
pub fn conference_of(code: &str) -> Option<Conference> {
    find_team(code).map(|t| t.conference)
}
