//! ESPN team schedule scraping.
//!
//! The schedule page lists one `<tr>` per game. Completed games carry a
//! `data-testid="symbol"` cell with `W` or `L`; upcoming games do not.

use crate::data_fetcher::ScheduleSource;
use async_trait::async_trait;
use chrono::{Datelike, Local, NaiveDate};
use governor::{DefaultDirectRateLimiter, Quota};
use nbagraph_common::{find_team, season_start_year, GameRecord, NbaGraphError, Result, Team};
use nbagraph_config::FetchConfig;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use std::num::NonZeroU32;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

static TABLE: Lazy<Selector> = Lazy::new(|| selector("table"));
static HEADING: Lazy<Selector> = Lazy::new(|| selector("h1"));
static ROW: Lazy<Selector> = Lazy::new(|| selector("tr"));
static CELL: Lazy<Selector> = Lazy::new(|| selector("td"));
static LINK: Lazy<Selector> = Lazy::new(|| selector("a[href]"));
static SYMBOL: Lazy<Selector> = Lazy::new(|| selector(r#"[data-testid="symbol"]"#));
static DATE: Lazy<Selector> = Lazy::new(|| selector(r#"[data-testid="date"]"#));

static SEASON_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{4})-(\d{2})").expect("Invalid season regex pattern"));
static TEAM_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"/nba/team/_/name/([a-z]+)").expect("Invalid team link regex pattern"));
static SCORE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s*-\s*(\d+)").expect("Invalid score regex pattern"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("Invalid CSS selector")
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// HTTP client for ESPN team schedule pages, spaced by a rate limiter.
#[derive(Debug, Clone)]
pub struct EspnClient {
    client: Client,
    base_url: String,
    user_agent: String,
    rate_limiter: Arc<DefaultDirectRateLimiter>,
}

impl EspnClient {
    /// Create a client from fetch configuration.
    pub fn new(config: &FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| NbaGraphError::network_with_source("Failed to create HTTP client", e))?;

        let quota = Quota::per_second(
            NonZeroU32::new(config.rate_limit_per_second)
                .ok_or_else(|| NbaGraphError::config("Rate limit must be greater than 0"))?,
        );

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            rate_limiter: Arc::new(DefaultDirectRateLimiter::direct(quota)),
        })
    }

    /// Schedule page URL for a team code.
    pub fn schedule_url(&self, code: &str) -> String {
        format!("{}/nba/team/schedule/_/name/{}", self.base_url, code)
    }
}

#[async_trait]
impl ScheduleSource for EspnClient {
    #[instrument(skip(self, team), fields(team = team.code))]
    async fn fetch_schedule(&self, team: &'static Team) -> Result<Vec<GameRecord>> {
        self.rate_limiter.until_ready().await;

        let url = self.schedule_url(team.code);
        debug!(%url, "Requesting schedule page");

        let response = self
            .client
            .get(&url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .await
            .map_err(|e| NbaGraphError::fetch_with_source(team.code, "request failed", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NbaGraphError::fetch(team.code, format!("HTTP {status} from {url}")));
        }

        let html = response
            .text()
            .await
            .map_err(|e| NbaGraphError::fetch_with_source(team.code, "failed to read body", e))?;

        let games = parse_schedule(&html, team.code, Local::now().date_naive())
            .map_err(|e| e.for_team(team.code))?;
        info!(games = games.len(), "Scraped schedule");
        Ok(games)
    }
}

/// Season years `(first, second)` from the page heading, e.g.
/// "Memphis Grizzlies Schedule 2025-26" gives `(2025, 2026)`.
fn season_years(document: &Html, today: NaiveDate) -> (i32, i32) {
    let heading = document.select(&HEADING).next().map(element_text);
    let parsed = heading.as_deref().and_then(|text| {
        let caps = SEASON_RE.captures(text)?;
        caps[1].parse::<i32>().ok()
    });

    let first = parsed.unwrap_or_else(|| season_start_year(today));
    (first, first + 1)
}

/// Parse a "Wed, Oct 22" date using the season years to pick the calendar year.
fn parse_game_date(text: &str, (first, second): (i32, i32)) -> Option<NaiveDate> {
    let month_day = text.split_once(',').map_or(text, |(_, rest)| rest).trim();
    // 2000 is a leap year so Feb 29 parses here and is checked against the real year below.
    let parsed = NaiveDate::parse_from_str(&format!("{month_day} 2000"), "%b %d %Y").ok()?;
    let year = if parsed.month() >= 10 { first } else { second };
    NaiveDate::from_ymd_opt(year, parsed.month(), parsed.day())
}

/// Opponent code and home flag from the opponent cell.
fn parse_opponent(row: ElementRef<'_>) -> Option<(String, bool)> {
    row.select(&CELL).find_map(|cell| {
        let code = cell.select(&LINK).find_map(|link| {
            let href = link.value().attr("href")?;
            TEAM_LINK_RE.captures(href).map(|caps| caps[1].to_string())
        })?;
        let is_away = element_text(cell).starts_with('@');
        Some((code, !is_away))
    })
}

/// Parse a team schedule page into game records.
///
/// Rows without a result marker are upcoming games and are skipped. Rows
/// with an unparseable date or unknown opponent are skipped with a warning.
/// `today` only matters when the page heading carries no season.
pub fn parse_schedule(html: &str, team: &str, today: NaiveDate) -> Result<Vec<GameRecord>> {
    let document = Html::parse_document(html);
    let table = document
        .select(&TABLE)
        .next()
        .ok_or_else(|| NbaGraphError::parse("no schedule table"))?;

    let season = season_years(&document, today);
    debug!(team, first_year = season.0, "Parsing schedule table");

    let mut games = Vec::new();
    for row in table.select(&ROW) {
        let Some(symbol) = row.select(&SYMBOL).next() else {
            continue;
        };
        let Some(date_elem) = row.select(&DATE).next() else {
            continue;
        };

        let date_text = element_text(date_elem);
        let Some(date) = parse_game_date(&date_text, season) else {
            debug!(team, date = %date_text, "Skipping row with unparseable date");
            continue;
        };

        let Some((opponent_code, is_home)) = parse_opponent(row) else {
            warn!(team, %date, "Skipping row without opponent link");
            continue;
        };
        let Some(opponent) = find_team(&opponent_code) else {
            warn!(team, %date, opponent = %opponent_code, "Skipping row with unknown opponent");
            continue;
        };

        let result_text = row
            .select(&CELL)
            .find(|cell| cell.select(&SYMBOL).next().is_some())
            .map(element_text)
            .unwrap_or_default();
        let Some(caps) = SCORE_RE.captures(&result_text) else {
            warn!(team, %date, result = %result_text, "Skipping row without score");
            continue;
        };
        let (Ok(first), Ok(second)) = (caps[1].parse::<u16>(), caps[2].parse::<u16>()) else {
            warn!(team, %date, result = %result_text, "Skipping row with oversized score");
            continue;
        };

        // Winner's score is listed first.
        let win = element_text(symbol) == "W";
        let (team_score, opponent_score) = if win { (first, second) } else { (second, first) };

        games.push(GameRecord::from_perspective(
            date,
            team,
            opponent.code,
            is_home,
            team_score,
            opponent_score,
        ));
    }

    debug!(team, games = games.len(), "Parsed schedule");
    Ok(games)
}
