//! Pennant CLI - Command-line interface over a JSON league file
//!
//! Commands:
//! - init: Write a starter league
//! - new-season, fixtures, round: Season setup and schedules
//! - sim-match, sim-round, sim-season: Simulation
//! - advance, status, active, end-season: Lifecycle
//! - ladder, finals, zones: Standings
//! - game-status, form, stats: League overview, club form and box scores

mod league;
mod output;
mod report_cmd;
mod season_cmd;
mod sim_cmd;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use report_cmd::{ClubArg, FixtureArg, SeasonArg};
use season_cmd::{EndSeasonArgs, FixturesArgs, InitArgs, NewSeasonArgs, RoundArgs};
use sim_cmd::{SimMatchArgs, SimRoundArgs};

#[derive(Parser)]
#[command(name = "pennant")]
#[command(about = "Two-tier league season simulator")]
struct Cli {
    /// League file to read and update
    #[arg(long, global = true, value_name = "FILE", default_value = "league.json")]
    league: PathBuf,

    /// Random seed for reproducibility
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Output results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Simulate matches on a single thread
    #[arg(long, global = true)]
    sequential: bool,

    /// Rival clubs scheduled first in extra rounds, as HOME,AWAY names
    /// (repeatable, replaces the default rivalries)
    #[arg(
        long,
        global = true,
        value_name = "HOME,AWAY",
        value_parser = league::parse_rivalry
    )]
    rivalry: Vec<(String, String)>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter league of two tiers with squads
    Init(InitArgs),
    /// Create seasons for a year
    NewSeason(NewSeasonArgs),
    /// Generate, regenerate or clear a season's fixtures
    Fixtures(FixturesArgs),
    /// List the fixtures of one round
    Round(RoundArgs),
    /// Play a one-off match between two clubs
    SimMatch(SimMatchArgs),
    /// Simulate one round of a season
    SimRound(SimRoundArgs),
    /// Simulate the rest of a season
    SimSeason(SeasonArg),
    /// Move a season to its next round
    Advance(SeasonArg),
    /// Show a season's progress
    Status(SeasonArg),
    /// Show every active season
    Active,
    /// Show a season's ladder
    Ladder(SeasonArg),
    /// Show the finals bracket from a season's ladder
    Finals(SeasonArg),
    /// Show promotion and relegation zones for a season's year
    Zones(SeasonArg),
    /// Apply promotion and relegation and close both seasons
    EndSeason(EndSeasonArgs),
    /// Show active seasons and what to do next
    GameStatus,
    /// Show a club's lineup strength, key players and recent results
    Form(ClubArg),
    /// Show the player box scores of a played fixture
    Stats(FixtureArg),
}

/// Flags shared by every command
pub struct GlobalOpts {
    pub league: PathBuf,
    pub seed: Option<u64>,
    pub json: bool,
    pub sequential: bool,
    pub rivalries: Vec<(String, String)>,
}

fn main() -> anyhow::Result<()> {
    // Logs go to stderr so --json output stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let opts = GlobalOpts {
        league: cli.league,
        seed: cli.seed,
        json: cli.json,
        sequential: cli.sequential,
        rivalries: cli.rivalry,
    };

    match cli.command {
        Commands::Init(args) => season_cmd::init(args, &opts),
        Commands::NewSeason(args) => season_cmd::new_season(args, &opts),
        Commands::Fixtures(args) => season_cmd::fixtures(args, &opts),
        Commands::Round(args) => season_cmd::round(args, &opts),
        Commands::SimMatch(args) => sim_cmd::sim_match(args, &opts),
        Commands::SimRound(args) => sim_cmd::sim_round(args, &opts),
        Commands::SimSeason(args) => sim_cmd::sim_season(args, &opts),
        Commands::Advance(args) => season_cmd::advance(args, &opts),
        Commands::Status(args) => report_cmd::status(args, &opts),
        Commands::Active => report_cmd::active(&opts),
        Commands::Ladder(args) => report_cmd::ladder(args, &opts),
        Commands::Finals(args) => report_cmd::finals(args, &opts),
        Commands::Zones(args) => report_cmd::zones(args, &opts),
        Commands::EndSeason(args) => season_cmd::end_season(args, &opts),
        Commands::GameStatus => report_cmd::game_status(&opts),
        Commands::Form(args) => report_cmd::form(args, &opts),
        Commands::Stats(args) => report_cmd::stats(args, &opts),
    }
}
