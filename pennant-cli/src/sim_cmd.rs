//! Simulation commands
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: sim_match(), sim_round(), sim_season()
//! - Level 2: controller simulation, league file save
//! - Level 3: progress reporting
//! - Level 4: argument types

use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use pennant_core::Conditions;

use crate::league;
use crate::output;
use crate::report_cmd::SeasonArg;
use crate::GlobalOpts;

// ============================================================================
// COMMAND ARGUMENTS (Level 4 - Configuration)
// ============================================================================

#[derive(Args)]
pub struct SimMatchArgs {
    /// Home club id
    #[arg(long)]
    pub home: u32,

    /// Away club id
    #[arg(long)]
    pub away: u32,

    /// Conditions: ideal, windy, wet, hot or cold
    #[arg(long, default_value = "ideal")]
    pub conditions: Conditions,
}

#[derive(Args)]
pub struct SimRoundArgs {
    /// Season id
    #[arg(long)]
    pub season: u32,

    /// Round to simulate (defaults to the season's current round)
    #[arg(long)]
    pub round: Option<u32>,
}

// ============================================================================
// LEVEL 1 - COMMANDS
// ============================================================================

pub fn sim_match(args: SimMatchArgs, opts: &GlobalOpts) -> Result<()> {
    let mut controller = league::open(opts)?;
    let report = controller.simulate_match(args.home, args.away, Some(args.conditions))?;

    if opts.json {
        output::print_json(&report)
    } else {
        output::print_match(&report);
        Ok(())
    }
}

pub fn sim_round(args: SimRoundArgs, opts: &GlobalOpts) -> Result<()> {
    let mut controller = league::open(opts)?;
    let round = match args.round {
        Some(round) => round,
        None => controller.status(args.season)?.current_round,
    };

    let report = controller.simulate_round(args.season, round)?;
    if report.matches_played > 0 {
        league::save(&controller, opts)?;
    }

    if opts.json {
        return output::print_json(&report);
    }
    if let Some(message) = &report.message {
        println!("{}", message);
        return Ok(());
    }
    println!("Season {} round {}", report.season_id, report.round);
    for result in &report.results {
        output::print_match(&result.report);
    }
    if report.round_advanced {
        println!("Current round is now {}", report.current_round);
    }
    println!();
    output::print_ladder(&report.ladder);
    Ok(())
}

pub fn sim_season(args: SeasonArg, opts: &GlobalOpts) -> Result<()> {
    let mut controller = league::open(opts)?;
    let status = controller.status(args.season)?;
    let remaining = (status.total_rounds + 1).saturating_sub(status.current_round);

    let progress = round_progress(remaining as u64, opts.json);
    let report = controller.simulate_full_season_with_callback(args.season, |round| {
        progress.set_message(format!("round {}", round.round));
        progress.inc(1);
    })?;
    progress.finish_and_clear();

    if report.rounds_simulated > 0 {
        league::save(&controller, opts)?;
    }

    if opts.json {
        return output::print_json(&report);
    }
    println!(
        "Season {}: simulated {} rounds",
        report.season_id, report.rounds_simulated
    );
    output::print_ladder(&report.final_ladder);
    Ok(())
}

// ============================================================================
// LEVEL 3 - STEPS
// ============================================================================

fn round_progress(rounds: u64, hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(rounds);
    if let Ok(style) =
        ProgressStyle::with_template("{bar:40.cyan/blue} {pos}/{len} {msg}")
    {
        bar.set_style(style.progress_chars("##-"));
    }
    bar
}
