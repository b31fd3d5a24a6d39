//! Read-only reporting commands

use anyhow::Result;
use clap::Args;

use crate::league;
use crate::output;
use crate::GlobalOpts;

#[derive(Args)]
pub struct SeasonArg {
    /// Season id
    #[arg(long)]
    pub season: u32,
}

#[derive(Args)]
pub struct ClubArg {
    /// Club id
    #[arg(long)]
    pub club: u32,
}

#[derive(Args)]
pub struct FixtureArg {
    /// Fixture id
    #[arg(long)]
    pub fixture: u32,
}

pub fn status(args: SeasonArg, opts: &GlobalOpts) -> Result<()> {
    let controller = league::open(opts)?;
    let status = controller.status(args.season)?;
    if opts.json {
        output::print_json(&status)
    } else {
        output::print_status(&status);
        Ok(())
    }
}

pub fn active(opts: &GlobalOpts) -> Result<()> {
    let controller = league::open(opts)?;
    let seasons = controller.active_seasons()?;
    if opts.json {
        return output::print_json(&seasons);
    }
    if seasons.is_empty() {
        println!("No active seasons");
    }
    for status in &seasons {
        output::print_status(status);
    }
    Ok(())
}

pub fn ladder(args: SeasonArg, opts: &GlobalOpts) -> Result<()> {
    let controller = league::open(opts)?;
    let ladder = controller.ladder(args.season)?;
    if opts.json {
        output::print_json(&ladder)
    } else {
        output::print_ladder(&ladder);
        Ok(())
    }
}

pub fn finals(args: SeasonArg, opts: &GlobalOpts) -> Result<()> {
    let controller = league::open(opts)?;
    let bracket = controller.finals(args.season)?;
    if opts.json {
        return output::print_json(&bracket);
    }
    output::print_pairings("Qualifying finals", &bracket.qualifying_finals);
    output::print_pairings("Elimination finals", &bracket.elimination_finals);
    Ok(())
}

pub fn zones(args: SeasonArg, opts: &GlobalOpts) -> Result<()> {
    let controller = league::open(opts)?;
    let report = controller.promotion_relegation(args.season)?;
    if opts.json {
        return output::print_json(&report);
    }
    println!(
        "{}: upper season {}, lower season {}",
        report.year, report.upper_season_id, report.lower_season_id
    );
    output::print_zone("Relegation zone", &report.zones.relegation_zone);
    output::print_zone("Promotion zone", &report.zones.promotion_zone);
    Ok(())
}

pub fn game_status(opts: &GlobalOpts) -> Result<()> {
    let controller = league::open(opts)?;
    let status = controller.game_status()?;
    if opts.json {
        output::print_json(&status)
    } else {
        output::print_game_status(&status);
        Ok(())
    }
}

pub fn form(args: ClubArg, opts: &GlobalOpts) -> Result<()> {
    let controller = league::open(opts)?;
    let form = controller.club_form(args.club)?;
    if opts.json {
        output::print_json(&form)
    } else {
        output::print_form(&form);
        Ok(())
    }
}

pub fn stats(args: FixtureArg, opts: &GlobalOpts) -> Result<()> {
    let controller = league::open(opts)?;
    let stats = controller.match_stats(args.fixture)?;
    if opts.json {
        return output::print_json(&stats);
    }
    if stats.is_empty() {
        println!("No player stats recorded for fixture {}", args.fixture);
        return Ok(());
    }
    let store = controller.store();
    output::print_stats(&stats, |id| {
        store
            .players()
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.name.clone())
            .unwrap_or_else(|| format!("player {}", id))
    });
    Ok(())
}
