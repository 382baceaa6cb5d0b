//! Command dispatch.

use crate::cli::{CacheCommand, Command};
use crate::error::{CliError, CliResult};
use chrono::NaiveDate;
use nbagraph_common::{lookup_team, Conference, GraphKind, TEAMS};
use nbagraph_config::Config;
use nbagraph_graphs::{EspnClient, GraphManager, ScheduleSource};
use nbagraph_web::Publisher;
use std::io::Write;
use std::net::SocketAddr;
use tracing::info;

/// Everything one invocation needs.
pub struct App<S> {
    manager: GraphManager<S>,
    publisher: Publisher,
    bind: String,
    today: NaiveDate,
}

impl App<EspnClient> {
    /// App scraping ESPN with the settings in `config`.
    pub fn from_config(config: &Config, today: NaiveDate) -> CliResult<Self> {
        let manager = GraphManager::from_config(config, today)?;
        Ok(Self::new(manager, config, today))
    }
}

impl<S: ScheduleSource> App<S> {
    /// App around an existing manager.
    pub fn new(manager: GraphManager<S>, config: &Config, today: NaiveDate) -> Self {
        Self {
            manager,
            publisher: Publisher::from_config(config),
            bind: config.server.bind.clone(),
            today,
        }
    }

    /// Graph manager driving fetch and render.
    pub fn manager(&self) -> &GraphManager<S> {
        &self.manager
    }

    /// Publisher for frozen URLs.
    pub fn publisher(&self) -> &Publisher {
        &self.publisher
    }

    /// Run `command`, writing human-readable results to `out`.
    pub async fn run<W: Write>(&self, command: Command, out: &mut W) -> CliResult<()> {
        match command {
            Command::Fetch { team } => self.fetch(&team, out).await,
            Command::Teams => list_teams(out),
            Command::Standings { conference } => {
                self.generate(GraphKind::Standings(conference), out).await
            }
            Command::HeadToHead => self.generate(GraphKind::HeadToHead, out).await,
            Command::ConferenceBattle => self.generate(GraphKind::ConferenceBattle, out).await,
            Command::All => {
                for (kind, path) in self.manager.generate_all().await? {
                    writeln!(out, "{kind}: {}", path.display())?;
                }
                Ok(())
            }
            Command::Publish { kind, date } => {
                let entry = self.publisher.publish(kind, date.unwrap_or(self.today))?;
                writeln!(out, "Published {}", entry.url_path)?;
                Ok(())
            }
            Command::Published { kind } => self.list_published(kind, out),
            Command::Cache { action: CacheCommand::Clear { team } } => self.clear_cache(team, out),
            Command::Serve { bind } => {
                let addr = bind.unwrap_or_else(|| self.bind.clone());
                let bind: SocketAddr = addr
                    .parse()
                    .map_err(|source| CliError::InvalidBind { addr, source })?;
                nbagraph_web::serve(bind, self.publisher.manifest_path(), self.publisher.public_dir())
                    .await?;
                Ok(())
            }
        }
    }

    async fn fetch<W: Write>(&self, team: &str, out: &mut W) -> CliResult<()> {
        let team = lookup_team(team)?;
        let games = self.manager.fetcher().team_games(team.code).await?;
        for game in &games {
            writeln!(out, "{game}")?;
        }
        let wins = games.iter().filter(|g| g.is_win_for(team.code)).count();
        writeln!(
            out,
            "{team}: {} games, {wins}-{}",
            games.len(),
            games.len() - wins
        )?;
        Ok(())
    }

    async fn generate<W: Write>(&self, kind: GraphKind, out: &mut W) -> CliResult<()> {
        let path = self.manager.generate(kind).await?;
        writeln!(out, "{kind}: {}", path.display())?;
        Ok(())
    }

    fn list_published<W: Write>(&self, kind: Option<GraphKind>, out: &mut W) -> CliResult<()> {
        let entries = self.publisher.published(kind)?;
        if entries.is_empty() {
            writeln!(out, "Nothing published yet")?;
        }
        for entry in entries {
            writeln!(out, "{}  {:<18} {}", entry.date, entry.graph.to_string(), entry.url_path)?;
        }
        Ok(())
    }

    fn clear_cache<W: Write>(&self, team: Option<String>, out: &mut W) -> CliResult<()> {
        let fetcher = self.manager.fetcher();
        match team {
            Some(code) => {
                let team = lookup_team(&code)?;
                if fetcher.invalidate(team.code)? {
                    writeln!(out, "Removed cached schedule for {team}")?;
                } else {
                    writeln!(out, "No cached schedule for {team}")?;
                }
            }
            None => {
                let removed = fetcher.clear()?;
                info!(removed, "Cleared schedule cache");
                writeln!(out, "Removed {removed} cached schedules")?;
            }
        }
        Ok(())
    }
}

fn list_teams<W: Write>(out: &mut W) -> CliResult<()> {
    for conference in Conference::ALL {
        writeln!(out, "{}", conference.long_name())?;
        for team in TEAMS.iter().filter(|t| t.conference == conference) {
            writeln!(out, "  {:<5} {}", team.code, team.name)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_teams() {
        let mut out = Vec::new();
        list_teams(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), 32);
        assert!(text.starts_with("Eastern\n  atl "));
        let west = text.find("Western").unwrap();
        assert!(text.find("  bos ").unwrap() < west);
        assert!(text.find("  lal ").unwrap() > west);
    }
}
