//! Season setup and lifecycle commands
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: one function per subcommand
//! - Level 2: controller calls, league file save
//! - Level 4: argument types

use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use pennant_core::Tier;
use pennant_season::{demo_league, LeagueStore};

use crate::league;
use crate::output;
use crate::report_cmd::SeasonArg;
use crate::GlobalOpts;

/// Seed for the starter league when none is given
const DEFAULT_LEAGUE_SEED: u64 = 42;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct InitArgs {
    /// Overwrite an existing league file
    #[arg(long)]
    pub force: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
pub enum TierChoice {
    Upper,
    Lower,
    Both,
}

#[derive(Args)]
pub struct NewSeasonArgs {
    /// Season year
    #[arg(long)]
    pub year: i32,

    /// Which tier to create
    #[arg(long, value_enum, default_value = "both")]
    pub tier: TierChoice,

    /// Round count for a single-tier season (defaults to the tier's usual length)
    #[arg(long)]
    pub rounds: Option<u32>,

    /// Create the season without scheduling fixtures
    #[arg(long)]
    pub no_fixtures: bool,
}

#[derive(Args)]
pub struct FixturesArgs {
    /// Season id
    #[arg(long)]
    pub season: u32,

    /// Replace the existing fixtures with a fresh schedule
    #[arg(long, conflicts_with = "clear")]
    pub regenerate: bool,

    /// Remove every fixture of the season
    #[arg(long)]
    pub clear: bool,
}

#[derive(Args)]
pub struct RoundArgs {
    /// Season id
    #[arg(long)]
    pub season: u32,

    /// Round number
    #[arg(long)]
    pub round: u32,
}

#[derive(Args)]
pub struct EndSeasonArgs {
    /// Upper-tier season id
    #[arg(long)]
    pub upper: u32,

    /// Lower-tier season id
    #[arg(long)]
    pub lower: u32,
}

// ============================================================================
// LEVEL 1 - COMMANDS
// ============================================================================

pub fn init(args: InitArgs, opts: &GlobalOpts) -> Result<()> {
    if opts.league.exists() && !args.force {
        bail!(
            "League file {} already exists (use --force to overwrite)",
            opts.league.display()
        );
    }
    let seed = opts.seed.unwrap_or(DEFAULT_LEAGUE_SEED);
    let store = demo_league(seed).context("Failed to build starter league")?;
    store
        .save(&opts.league)
        .with_context(|| format!("Failed to write league file: {}", opts.league.display()))?;

    let clubs = store.clubs();
    if opts.json {
        output::print_json(&clubs)?;
    } else {
        println!(
            "Wrote {} clubs and {} players to {}",
            clubs.len(),
            store.players().len(),
            opts.league.display()
        );
    }
    Ok(())
}

pub fn new_season(args: NewSeasonArgs, opts: &GlobalOpts) -> Result<()> {
    let mut controller = league::open(opts)?;
    let with_fixtures = !args.no_fixtures;

    let created = match args.tier {
        TierChoice::Both => {
            if args.rounds.is_some() {
                bail!("--rounds applies to a single tier; pass --tier upper or --tier lower");
            }
            let year = controller.create_league_year(args.year, with_fixtures)?;
            vec![year.upper, year.lower]
        }
        TierChoice::Upper => vec![controller.create_season(
            args.year,
            Tier::Upper,
            args.rounds,
            with_fixtures,
        )?],
        TierChoice::Lower => vec![controller.create_season(
            args.year,
            Tier::Lower,
            args.rounds,
            with_fixtures,
        )?],
    };
    league::save(&controller, opts)?;

    if opts.json {
        return output::print_json(&created);
    }
    for c in &created {
        println!(
            "Season {}: {} {} tier, {} rounds, {} fixtures",
            c.season.id,
            c.season.year,
            output::tier_name(c.season.tier),
            c.season.total_rounds,
            c.fixture_count
        );
        if let Some(err) = &c.fixture_error {
            println!("  fixtures not generated: {}", err);
        }
    }
    Ok(())
}

pub fn fixtures(args: FixturesArgs, opts: &GlobalOpts) -> Result<()> {
    let mut controller = league::open(opts)?;

    if args.clear {
        let removed = controller.clear_fixtures(args.season)?;
        league::save(&controller, opts)?;
        if opts.json {
            return output::print_json(&serde_json::json!({ "removed": removed }));
        }
        println!("Removed {} fixtures from season {}", removed, args.season);
        return Ok(());
    }

    let fixtures = if args.regenerate {
        controller.regenerate_fixtures(args.season)?
    } else {
        controller.generate_fixtures(args.season)?
    };
    league::save(&controller, opts)?;

    if opts.json {
        return output::print_json(&fixtures);
    }
    let rounds = fixtures.iter().map(|f| f.round).max().unwrap_or(0);
    println!(
        "Season {}: {} fixtures over {} rounds",
        args.season,
        fixtures.len(),
        rounds
    );
    Ok(())
}

pub fn round(args: RoundArgs, opts: &GlobalOpts) -> Result<()> {
    let controller = league::open(opts)?;
    let round = controller.round_fixtures(args.season, args.round)?;
    if opts.json {
        return output::print_json(&round);
    }

    let store = controller.store();
    println!("Season {} round {}", round.season_id, round.round);
    output::print_fixtures(&round.fixtures, |id| {
        store
            .club(id)
            .map(|c| c.name)
            .unwrap_or_else(|_| format!("club {}", id))
    });
    Ok(())
}

pub fn advance(args: SeasonArg, opts: &GlobalOpts) -> Result<()> {
    let mut controller = league::open(opts)?;
    let outcome = controller.advance_round(args.season)?;
    if outcome.advanced {
        league::save(&controller, opts)?;
    }

    if opts.json {
        output::print_json(&outcome)
    } else {
        output::print_advance(&outcome);
        Ok(())
    }
}

pub fn end_season(args: EndSeasonArgs, opts: &GlobalOpts) -> Result<()> {
    let mut controller = league::open(opts)?;
    let report = controller.end_of_season(args.upper, args.lower)?;
    league::save(&controller, opts)?;

    if opts.json {
        output::print_json(&report)
    } else {
        output::print_rollover(&report);
        Ok(())
    }
}
