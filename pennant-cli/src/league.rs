//! League file loading and saving around a controller

use anyhow::{Context, Result};
use pennant_season::{LeagueConfig, MemoryStore, SeasonController};

use crate::GlobalOpts;

pub type Controller = SeasonController<MemoryStore>;

/// Build a controller over the league file named by the global options
pub fn open(opts: &GlobalOpts) -> Result<Controller> {
    let store = MemoryStore::load(&opts.league)
        .with_context(|| format!("Failed to load league file: {}", opts.league.display()))?;
    tracing::debug!("Loaded league from {}", opts.league.display());
    Ok(SeasonController::new(store, config(opts)))
}

/// Write the controller's league back to the league file
pub fn save(controller: &Controller, opts: &GlobalOpts) -> Result<()> {
    controller
        .store()
        .save(&opts.league)
        .with_context(|| format!("Failed to save league file: {}", opts.league.display()))?;
    tracing::info!("Saved league to {}", opts.league.display());
    Ok(())
}

fn config(opts: &GlobalOpts) -> LeagueConfig {
    let mut config = LeagueConfig::default();
    if let Some(seed) = opts.seed {
        config = config.with_seed(seed);
    }
    if opts.sequential {
        config = config.sequential();
    }
    if !opts.rivalries.is_empty() {
        config = config.with_rivalries(opts.rivalries.clone());
    }
    config
}

/// Parse a `HOME,AWAY` pair of club names
pub fn parse_rivalry(value: &str) -> std::result::Result<(String, String), String> {
    let (home, away) = value
        .split_once(',')
        .ok_or_else(|| format!("expected HOME,AWAY but got `{}`", value))?;
    let (home, away) = (home.trim(), away.trim());
    if home.is_empty() || away.is_empty() {
        return Err(format!("both club names are required in `{}`", value));
    }
    if home == away {
        return Err(format!("a club cannot be its own rival: `{}`", value));
    }
    Ok((home.to_string(), away.to_string()))
}
