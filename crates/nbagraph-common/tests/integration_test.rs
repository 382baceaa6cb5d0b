//! Integration tests for nbagraph-common crate.

use chrono::NaiveDate;
use nbagraph_common::{
    conference_of, conference_teams, format_signed, lookup_team, parse_season_label, Conference,
    GameRecord, GraphKind, NbaGraphError, TEAMS,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_every_team_resolves_to_its_conference() {
    for team in &TEAMS {
        let resolved = lookup_team(&team.code.to_uppercase()).unwrap();
        assert_eq!(resolved.code, team.code);
        assert_eq!(conference_of(team.code), Some(team.conference));
    }
    let east: Vec<_> = conference_teams(Conference::East).map(|t| t.code).collect();
    assert!(east.contains(&"bkn"));
    assert!(!east.contains(&"gs"));
}

#[test]
fn test_invalid_team_error_names_code() {
    let err = lookup_team("seattle").unwrap_err();
    assert!(matches!(err, NbaGraphError::InvalidTeam { .. }));
    assert!(err.to_string().contains("seattle"));
}

#[test]
fn test_game_record_json_shape() {
    let g = GameRecord::from_perspective(date(2025, 10, 22), "bos", "ny", true, 110, 100);
    let json = serde_json::to_value(&g).unwrap();
    assert_eq!(json["date"], "2025-10-22");
    assert_eq!(json["home"], "bos");
    assert_eq!(json["home_score"], 110);

    let back: GameRecord = serde_json::from_value(json).unwrap();
    assert_eq!(back, g);
}

#[test]
fn test_same_game_seen_from_both_sides_has_one_key() {
    let from_home = GameRecord::from_perspective(date(2025, 11, 3), "okc", "sa", true, 121, 118);
    let from_away = GameRecord::from_perspective(date(2025, 11, 3), "sa", "okc", false, 118, 121);
    assert_eq!(from_home.key(), from_away.key());
}

#[test]
fn test_graph_kind_serializes_kebab_case() {
    let yaml = serde_yaml::to_string(&GraphKind::HeadToHead).unwrap();
    assert_eq!(yaml.trim(), "head-to-head");
    let kind: GraphKind = serde_yaml::from_str("conference-battle").unwrap();
    assert_eq!(kind, GraphKind::ConferenceBattle);
}

#[test]
fn test_formatting_helpers() {
    assert_eq!(format_signed(12), "+12");
    assert_eq!(parse_season_label("2024-25").unwrap(), (2024, 2025));
}
