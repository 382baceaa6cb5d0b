//! NBA Graphs - Main Entry Point

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use nbagraph::{App, Cli};
use nbagraph_common::init_logging;
use nbagraph_config::ConfigLoader;
use tracing::{debug, error};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = ConfigLoader::load(cli.config.as_deref()).context("Failed to load configuration")?;

    let mut logging = config.logging.to_logging_config();
    if let Some(level) = cli.log_level {
        logging.level = level;
    }
    init_logging(logging)?;
    debug!(command = ?cli.command, "Configuration loaded");

    let today = Local::now().date_naive();
    let app = App::from_config(&config, today)?;
    let mut stdout = std::io::stdout().lock();

    if let Err(e) = app.run(cli.command, &mut stdout).await {
        match e.team() {
            Some(team) => error!(team, "{e}"),
            None => error!("{e}"),
        }
        return Err(e.into());
    }

    Ok(())
}
