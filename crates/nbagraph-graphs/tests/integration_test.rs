//! Integration tests for nbagraph-graphs crate.
//!
//! A local axum server stands in for ESPN so the real client, parser, cache
//! and renderers run end to end.

use axum::extract::{Path as UrlPath, State};
use axum::http::StatusCode;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use nbagraph_common::test_utils::{create_temp_dir, date, init_test_logging};
use nbagraph_common::{Conference, GraphKind, NbaGraphError};
use nbagraph_config::{Config, FetchConfig};
use nbagraph_graphs::{DataFetcher, EspnClient, GraphManager, TeamCache};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Schedule page for `code` with one win over `bos` when `code` is West,
/// and a home loss to `lal` when East. Other codes get no completed games.
fn schedule_page(code: &str) -> String {
    let row = match code {
        "lal" => r#"<tr><td><span data-testid="date">Wed, Oct 22</span></td>
            <td>vs<a href="/nba/team/_/name/bos/boston-celtics">BOS</a></td>
            <td><span data-testid="symbol">W</span><a href="/nba/game/_/gameId/1">118-111</a></td></tr>"#,
        "bos" => r#"<tr><td><span data-testid="date">Wed, Oct 22</span></td>
            <td>@<a href="/nba/team/_/name/lal/los-angeles-lakers">LAL</a></td>
            <td><span data-testid="symbol">L</span><a href="/nba/game/_/gameId/1">118-111</a></td></tr>"#,
        _ => "",
    };
    format!(
        "<html><body><h1>Schedule 2025-26</h1><table><tbody>\
         <tr><td>DATE</td><td>OPPONENT</td><td>RESULT</td></tr>{row}</tbody></table></body></html>"
    )
}

#[derive(Clone)]
struct Fixture {
    hits: Arc<AtomicUsize>,
}

async fn schedule(
    State(fixture): State<Fixture>,
    UrlPath(code): UrlPath<String>,
) -> Result<Html<String>, StatusCode> {
    fixture.hits.fetch_add(1, Ordering::SeqCst);
    match code.as_str() {
        "ny" => Err(StatusCode::SERVICE_UNAVAILABLE),
        _ => Ok(Html(schedule_page(&code))),
    }
}

/// Start the fixture server and return its base URL and hit counter.
async fn spawn_fixture() -> (String, Arc<AtomicUsize>) {
    let hits = Arc::new(AtomicUsize::new(0));
    let app = Router::new()
        .route("/nba/team/schedule/_/name/:code", get(schedule))
        .with_state(Fixture { hits: hits.clone() });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), hits)
}

fn fetch_config(base_url: String) -> FetchConfig {
    FetchConfig {
        base_url,
        timeout_seconds: 5,
        rate_limit_per_second: 100,
        ..FetchConfig::default()
    }
}

#[tokio::test]
async fn test_scrape_then_serve_from_cache() {
    init_test_logging();
    let (base_url, hits) = spawn_fixture().await;
    let dir = create_temp_dir();
    let client = EspnClient::new(&fetch_config(base_url)).unwrap();
    let fetcher = DataFetcher::new(client, TeamCache::new(dir.path()));

    let first = fetcher.team_games("LAL").await.unwrap();
    assert_eq!(first.len(), 1);
    assert_eq!(first[0].date, date(2025, 10, 22));
    assert_eq!((first[0].home.as_str(), first[0].away.as_str()), ("lal", "bos"));
    assert_eq!((first[0].home_score, first[0].away_score), (118, 111));
    assert!(dir.path().join("lal.json").exists());

    let second = fetcher.team_games("lal").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_http_error_names_team_and_is_not_cached() {
    let (base_url, hits) = spawn_fixture().await;
    let dir = create_temp_dir();
    let client = EspnClient::new(&fetch_config(base_url)).unwrap();
    let fetcher = DataFetcher::new(client, TeamCache::new(dir.path()));

    let err = fetcher.team_games("ny").await.unwrap_err();
    assert!(matches!(err, NbaGraphError::Fetch { ref team, .. } if team == "ny"));
    assert!(err.to_string().contains("503"));
    assert!(fetcher.cached_teams().unwrap().is_empty());

    let err = fetcher.team_games("knicks").await.unwrap_err();
    assert!(matches!(err, NbaGraphError::InvalidTeam { .. }));
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_league_games_are_deduplicated() {
    let (base_url, _) = spawn_fixture().await;
    let dir = create_temp_dir();
    let client = EspnClient::new(&fetch_config(base_url)).unwrap();
    let fetcher = DataFetcher::new(client, TeamCache::new(dir.path()));
    let teams: Vec<_> = ["bos", "lal", "mem"]
        .iter()
        .filter_map(|c| nbagraph_common::find_team(c))
        .collect();

    let games = fetcher.fetch_league(&teams).await.unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].winner(), "lal");
}

#[tokio::test]
async fn test_manager_renders_from_scraped_pages() {
    let (base_url, _) = spawn_fixture().await;
    let dir = create_temp_dir();

    let mut config = Config::default();
    config.fetch = fetch_config(base_url);
    config.cache.dir = dir.path().join(".teams");
    config.output.root = dir.path().to_path_buf();
    config.graph.standings_width = 800;
    config.graph.standings_height = 700;

    let manager = GraphManager::from_config(&config, date(2025, 10, 23)).unwrap();
    let path = manager
        .generate(GraphKind::Standings(Conference::West))
        .await
        .unwrap();

    assert_eq!(path, dir.path().join(".standings").join("west_standings.png"));
    assert_eq!(image::image_dimensions(&path).unwrap(), (800, 700));
    assert_eq!(manager.season(), "2025-26");

    // East includes the failing "ny" page: nothing is written for it.
    let err = manager
        .generate(GraphKind::Standings(Conference::East))
        .await
        .unwrap_err();
    assert_eq!(err.team(), Some("ny"));
    assert!(!manager.output_path(GraphKind::Standings(Conference::East)).exists());
}
