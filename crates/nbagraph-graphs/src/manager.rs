//! Graph manager orchestrating fetch, aggregation and rendering.

use crate::cache::TeamCache;
use crate::conference_battle::ConferenceBattle;
use crate::conference_battle_graph::ConferenceBattleGraph;
use crate::data_fetcher::{DataFetcher, ScheduleSource};
use crate::espn::EspnClient;
use crate::head_to_head::HeadToHead;
use crate::head_to_head_graph::HeadToHeadGraph;
use crate::renderer::GraphStyle;
use crate::standings::ConferenceStandings;
use crate::standings_graph::StandingsGraph;
use crate::traits::GraphRenderer;
use chrono::NaiveDate;
use nbagraph_common::{conference_teams, GameRecord, GraphKind, Result, Team};
use nbagraph_config::{Config, GraphConfig};
use std::path::PathBuf;
use tracing::{info, instrument};

/// Runs Fetcher → Aggregator → Renderer for each graph kind.
pub struct GraphManager<S> {
    fetcher: DataFetcher<S>,
    graph: GraphConfig,
    style: GraphStyle,
    output_root: PathBuf,
    season: String,
    today: NaiveDate,
}

impl GraphManager<EspnClient> {
    /// Manager scraping ESPN through the configured cache.
    pub fn from_config(config: &Config, today: NaiveDate) -> Result<Self> {
        let client = EspnClient::new(&config.fetch)?;
        let fetcher = DataFetcher::new(client, TeamCache::new(&config.cache.dir));
        Self::new(fetcher, config, today)
    }
}

impl<S: ScheduleSource> GraphManager<S> {
    /// Creates a new graph manager around `fetcher`.
    pub fn new(fetcher: DataFetcher<S>, config: &Config, today: NaiveDate) -> Result<Self> {
        Ok(Self {
            fetcher,
            graph: config.graph.clone(),
            style: GraphStyle::from_config(&config.graph)?,
            output_root: config.output.root.clone(),
            season: config.season.resolve(today),
            today,
        })
    }

    pub fn fetcher(&self) -> &DataFetcher<S> {
        &self.fetcher
    }

    /// Season label printed on every graph.
    pub fn season(&self) -> &str {
        &self.season
    }

    /// Where the image for `kind` is written.
    pub fn output_path(&self, kind: GraphKind) -> PathBuf {
        kind.output_path(&self.output_root)
    }

    /// Fetch what `kind` needs and render it.
    ///
    /// A fetch failure returns before any image is written.
    #[instrument(skip(self), fields(graph = %kind))]
    pub async fn generate(&self, kind: GraphKind) -> Result<PathBuf> {
        let games = match kind {
            GraphKind::Standings(conference) => {
                let teams: Vec<&'static Team> = conference_teams(conference).collect();
                self.fetcher.fetch_league(&teams).await?
            }
            GraphKind::HeadToHead | GraphKind::ConferenceBattle => self.fetcher.fetch_all().await?,
        };
        self.render(kind, &games)
    }

    /// Fetch the whole league once and render every graph.
    #[instrument(skip(self))]
    pub async fn generate_all(&self) -> Result<Vec<(GraphKind, PathBuf)>> {
        let games = self.fetcher.fetch_all().await?;
        let mut written = Vec::with_capacity(GraphKind::ALL.len());
        for kind in GraphKind::ALL {
            written.push((kind, self.render(kind, &games)?));
        }
        info!(graphs = written.len(), games = games.len(), "Generated all graphs");
        Ok(written)
    }

    /// Aggregate `games` for `kind` and write the image.
    pub fn render(&self, kind: GraphKind, games: &[GameRecord]) -> Result<PathBuf> {
        let path = self.output_path(kind);
        let graph = &self.graph;
        let style = self.style.clone();

        match kind {
            GraphKind::Standings(conference) => {
                let data = ConferenceStandings::compute(games, conference);
                StandingsGraph::new(style, graph.standings_width, graph.standings_height, &self.season)
                    .render_to_file(&data, &path)?;
            }
            GraphKind::HeadToHead => {
                let data = HeadToHead::compute(games);
                HeadToHeadGraph::new(style, graph.head_to_head_size, &self.season, self.today)
                    .render_to_file(&data, &path)?;
            }
            GraphKind::ConferenceBattle => {
                let data = ConferenceBattle::compute(games);
                ConferenceBattleGraph::new(style, graph.battle_width, graph.battle_height, &self.season)
                    .render_to_file(&data, &path)?;
            }
        }

        info!(graph = %kind, path = %path.display(), "Graph written");
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nbagraph_common::test_utils::{create_temp_dir, game_fixtures::opening_week};
    use nbagraph_common::{Conference, NbaGraphError};
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixtureSource {
        games: Vec<GameRecord>,
        calls: AtomicUsize,
        broken: Option<&'static str>,
    }

    #[async_trait]
    impl ScheduleSource for FixtureSource {
        async fn fetch_schedule(&self, team: &'static Team) -> Result<Vec<GameRecord>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.broken == Some(team.code) {
                return Err(NbaGraphError::fetch(team.code, "HTTP 503"));
            }
            Ok(self.games.iter().filter(|g| g.involves(team.code)).cloned().collect())
        }
    }

    fn manager(root: &Path, broken: Option<&'static str>) -> GraphManager<FixtureSource> {
        let mut config = Config::default();
        config.output.root = root.join("out");
        config.season.label = Some("2025-26".to_string());
        config.graph.standings_width = 700;
        config.graph.standings_height = 600;
        config.graph.head_to_head_size = 600;

        let source = FixtureSource {
            games: opening_week(),
            calls: AtomicUsize::new(0),
            broken,
        };
        let fetcher = DataFetcher::new(source, TeamCache::new(root.join("teams")));
        GraphManager::new(fetcher, &config, nbagraph_common::test_utils::date(2025, 10, 29)).unwrap()
    }

    #[tokio::test]
    async fn test_standings_fetches_only_its_conference() {
        let dir = create_temp_dir();
        let manager = manager(dir.path(), None);

        let path = manager.generate(GraphKind::Standings(Conference::West)).await.unwrap();

        assert!(path.ends_with(".standings/west_standings.png"));
        assert_eq!(image::image_dimensions(&path).unwrap(), (700, 600));
        assert_eq!(manager.fetcher().source().calls.load(Ordering::SeqCst), 15);
        assert_eq!(manager.season(), "2025-26");
    }

    #[tokio::test]
    async fn test_generate_all_writes_every_graph() {
        let dir = create_temp_dir();
        let manager = manager(dir.path(), None);

        let written = manager.generate_all().await.unwrap();

        assert_eq!(written.len(), 4);
        for (kind, path) in &written {
            assert_eq!(path, &manager.output_path(*kind));
            assert!(image::image_dimensions(path).is_ok(), "{kind} not decodable");
        }
        assert_eq!(manager.fetcher().cached_teams().unwrap().len(), 30);
    }

    #[tokio::test]
    async fn test_fetch_failure_writes_nothing() {
        let dir = create_temp_dir();
        let manager = manager(dir.path(), Some("lal"));

        let err = manager.generate(GraphKind::HeadToHead).await.unwrap_err();

        assert_eq!(err.team(), Some("lal"));
        assert!(!manager.output_path(GraphKind::HeadToHead).exists());
    }
}
