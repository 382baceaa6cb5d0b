//! Data fetching: cache first, then the schedule source.

use crate::cache::TeamCache;
use crate::utils::dedupe_games;
use async_trait::async_trait;
use nbagraph_common::{lookup_team, GameRecord, Result, Team, TEAMS};
use tracing::{info, instrument};

/// Source of a team's completed games for the current season.
#[async_trait]
pub trait ScheduleSource: Send + Sync {
    /// Fetch every completed game `team` has played so far.
    async fn fetch_schedule(&self, team: &'static Team) -> Result<Vec<GameRecord>>;
}

/// Fetches team schedules through the on-disk cache.
pub struct DataFetcher<S> {
    source: S,
    cache: TeamCache,
}

impl<S: ScheduleSource> DataFetcher<S> {
    /// Create a fetcher over `source` memoized in `cache`.
    pub fn new(source: S, cache: TeamCache) -> Self {
        Self { source, cache }
    }

    /// The underlying cache.
    pub fn cache(&self) -> &TeamCache {
        &self.cache
    }

    /// The underlying schedule source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Games for one team, sorted by date.
    ///
    /// Unknown codes fail before the cache or network is touched. A cache
    /// hit never reaches the network; a miss fetches once and persists.
    #[instrument(skip(self))]
    pub async fn team_games(&self, code: &str) -> Result<Vec<GameRecord>> {
        let team = lookup_team(code)?;

        if let Some(entry) = self.cache.get(team.code).map_err(|e| e.for_team(team.code))? {
            info!(team = team.code, games = entry.games.len(), "Cache hit");
            let mut games = entry.games;
            games.sort_by_key(|g| g.date);
            return Ok(games);
        }

        info!(team = team.code, "Cache miss, fetching schedule");
        let mut games = self
            .source
            .fetch_schedule(team)
            .await
            .map_err(|e| e.for_team(team.code))?;
        games.sort_by_key(|g| g.date);

        self.cache
            .put(team.code, &games)
            .map_err(|e| e.for_team(team.code))?;
        Ok(games)
    }

    /// Games for several teams, fetched one after another.
    ///
    /// Stops at the first failure; the error names the failing team. The
    /// result holds each game once, sorted by date.
    pub async fn fetch_league(&self, teams: &[&'static Team]) -> Result<Vec<GameRecord>> {
        let mut all = Vec::new();
        for team in teams {
            all.extend(self.team_games(team.code).await?);
        }
        let games = dedupe_games(all);
        info!(teams = teams.len(), games = games.len(), "Assembled league games");
        Ok(games)
    }

    /// Games for all 30 teams.
    pub async fn fetch_all(&self) -> Result<Vec<GameRecord>> {
        let teams: Vec<&'static Team> = TEAMS.iter().collect();
        self.fetch_league(&teams).await
    }

    /// Drop the cached schedule of one team.
    pub fn invalidate(&self, code: &str) -> Result<bool> {
        let team = lookup_team(code)?;
        self.cache.invalidate(team.code)
    }

    /// Drop every cached schedule.
    pub fn clear(&self) -> Result<usize> {
        self.cache.clear()
    }

    /// Codes of the teams currently cached.
    pub fn cached_teams(&self) -> Result<Vec<String>> {
        self.cache.cached_teams()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbagraph_common::test_utils::{create_temp_dir, date, game_fixtures::*};
    use nbagraph_common::{find_team, NbaGraphError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Serves fixture games and counts calls; fails for `fail_on`.
    struct FakeSource {
        games: Vec<GameRecord>,
        calls: AtomicUsize,
        fail_on: Option<&'static str>,
    }

    impl FakeSource {
        fn new(games: Vec<GameRecord>) -> Self {
            Self {
                games,
                calls: AtomicUsize::new(0),
                fail_on: None,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ScheduleSource for FakeSource {
        async fn fetch_schedule(&self, team: &'static Team) -> Result<Vec<GameRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_on == Some(team.code) {
                return Err(NbaGraphError::parse("no schedule table"));
            }
            let mut games: Vec<_> = self
                .games
                .iter()
                .filter(|g| g.involves(team.code))
                .cloned()
                .collect();
            games.reverse();
            Ok(games)
        }
    }

    fn fetcher(source: FakeSource, dir: &std::path::Path) -> DataFetcher<FakeSource> {
        DataFetcher::new(source, TeamCache::new(dir))
    }

    #[test]
    fn test_unknown_team_fails_before_network() {
        let dir = create_temp_dir();
        let fetcher = fetcher(FakeSource::new(opening_week()), dir.path());

        let err = tokio_test::block_on(fetcher.team_games("xyz")).unwrap_err();
        assert!(matches!(err, NbaGraphError::InvalidTeam { .. }));
        assert_eq!(fetcher.source().calls(), 0);
        assert!(fetcher.cached_teams().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_warm_cache_skips_network() {
        let dir = create_temp_dir();
        let fetcher = fetcher(FakeSource::new(opening_week()), dir.path());

        let first = fetcher.team_games("BOS").await.unwrap();
        let second = fetcher.team_games("bos").await.unwrap();

        let expected = opening_week().iter().filter(|g| g.involves("bos")).count();
        assert_eq!(first, second);
        assert_eq!(first.len(), expected);
        assert_eq!(expected, 3);
        assert!(first.windows(2).all(|w| w[0].date <= w[1].date));
        assert_eq!(fetcher.source().calls(), 1);
        assert_eq!(fetcher.cached_teams().unwrap(), vec!["bos".to_string()]);
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let dir = create_temp_dir();
        let fetcher = fetcher(FakeSource::new(opening_week()), dir.path());

        fetcher.team_games("lal").await.unwrap();
        assert!(fetcher.invalidate("LAL").unwrap());
        fetcher.team_games("lal").await.unwrap();
        assert_eq!(fetcher.source().calls(), 2);
    }

    #[tokio::test]
    async fn test_league_fetch_dedupes_shared_games() {
        let dir = create_temp_dir();
        let fetcher = fetcher(FakeSource::new(opening_week()), dir.path());
        let teams: Vec<_> = ["bos", "ny", "mem", "lal", "phi", "okc"]
            .iter()
            .filter_map(|c| find_team(c))
            .collect();

        let games = fetcher.fetch_league(&teams).await.unwrap();
        assert_eq!(games.len(), opening_week().len());
        assert_eq!(games[0].date, date(2025, 10, 22));
    }

    #[tokio::test]
    async fn test_league_fetch_aborts_naming_team() {
        let dir = create_temp_dir();
        let mut source = FakeSource::new(opening_week());
        source.fail_on = Some("ny");
        let fetcher = fetcher(source, dir.path());
        let teams: Vec<_> = ["bos", "ny", "mem"].iter().filter_map(|c| find_team(c)).collect();

        let err = fetcher.fetch_league(&teams).await.unwrap_err();
        assert_eq!(err.team(), Some("ny"));
        assert!(err.to_string().contains("no schedule table"));
        assert_eq!(fetcher.source().calls(), 2);
        assert_eq!(fetcher.cached_teams().unwrap(), vec!["bos".to_string()]);
    }

    #[tokio::test]
    async fn test_team_without_games_caches_empty_schedule() {
        let dir = create_temp_dir();
        let fetcher = fetcher(FakeSource::new(vec![home_win(date(2025, 10, 22), "bos", "ny")]), dir.path());

        assert!(fetcher.team_games("utah").await.unwrap().is_empty());
        assert!(fetcher.team_games("utah").await.unwrap().is_empty());
        assert_eq!(fetcher.source().calls(), 1);
    }
}
