//! Text and JSON rendering of command results
//!
//! Level 4 - Formatting utilities

use anyhow::Result;
use pennant_core::{Fixture, FinalPairing, KeyRole, LadderEntry, MatchReport, MatchStat, Tier};
use pennant_season::{AdvanceOutcome, ClubForm, GameStatus, RolloverReport, SeasonStatus};
use serde::Serialize;

pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub fn tier_name(tier: Tier) -> &'static str {
    match tier {
        Tier::Upper => "upper",
        Tier::Lower => "lower",
    }
}

pub fn print_ladder(ladder: &[LadderEntry]) {
    println!(
        "{:>3}  {:<28} {:>3} {:>3} {:>3} {:>3} {:>5} {:>5} {:>7} {:>4}",
        "Pos", "Club", "P", "W", "L", "D", "For", "Agst", "%", "Pts"
    );
    for e in ladder {
        println!(
            "{:>3}  {:<28} {:>3} {:>3} {:>3} {:>3} {:>5} {:>5} {:>7.2} {:>4}",
            e.position,
            e.club_name,
            e.games_played,
            e.wins,
            e.losses,
            e.draws,
            e.points_for,
            e.points_against,
            e.percentage,
            e.ladder_points
        );
    }
}

pub fn print_fixtures(fixtures: &[Fixture], name_of: impl Fn(u32) -> String) {
    for f in fixtures {
        let result = match f.result {
            Some(score) => format!(
                "{}.{} ({}) - {}.{} ({})",
                score.home_goals,
                score.home_behinds,
                score.home_score(),
                score.away_goals,
                score.away_behinds,
                score.away_score()
            ),
            None => "unplayed".to_string(),
        };
        println!(
            "#{:<5} R{:<3} {}  {} v {}  {}",
            f.id,
            f.round,
            f.scheduled_at.format("%a %d %b %Y %H:%M"),
            name_of(f.home_id),
            name_of(f.away_id),
            result
        );
    }
}

pub fn print_match(report: &MatchReport) {
    println!(
        "{} {}.{} ({}) v {} {}.{} ({})",
        report.home_name,
        report.home_goals,
        report.home_behinds,
        report.home_score,
        report.away_name,
        report.away_goals,
        report.away_behinds,
        report.away_score
    );
    for q in &report.quarters {
        println!("  {}", q.event);
    }
    match report.winner_name() {
        Some(winner) => println!("  {} by {} points", winner, report.margin),
        None => println!("  Draw"),
    }
    println!("  {}", report.summary);
}

pub fn print_status(status: &SeasonStatus) {
    println!(
        "Season {} ({} {} tier): round {}/{}{}",
        status.season_id,
        status.year,
        tier_name(status.tier),
        status.current_round,
        status.total_rounds,
        if status.is_active { "" } else { " [closed]" }
    );
    println!(
        "  Played {}/{} fixtures ({:.1}%)",
        status.progress.fixtures_played, status.progress.total_fixtures, status.progress.percentage
    );
    let round = &status.current_round_status;
    println!(
        "  Round {}: {}/{} played{}",
        round.round,
        round.fixtures_played,
        round.total_fixtures,
        if round.complete { ", complete" } else { "" }
    );
}

pub fn print_advance(outcome: &AdvanceOutcome) {
    match (&outcome.reason, outcome.previous_round) {
        (Some(reason), _) => println!("Not advanced: {}", reason),
        (None, Some(previous)) => {
            println!("Advanced from round {} to {}", previous, outcome.current_round)
        }
        (None, None) => println!("Current round {}", outcome.current_round),
    }
}

pub fn print_pairings(title: &str, pairings: &[FinalPairing]) {
    println!("{}", title);
    for p in pairings {
        println!(
            "  {}: {} ({}) v {} ({})",
            p.label, p.home.club_name, p.home.position, p.away.club_name, p.away.position
        );
    }
}

pub fn print_zone(title: &str, entries: &[LadderEntry]) {
    println!("{}", title);
    for e in entries {
        println!("  {:>3}  {}", e.position, e.club_name);
    }
}

pub fn print_rollover(report: &RolloverReport) {
    for change in &report.changes {
        println!(
            "{} {} from {} to {} tier (finished {})",
            change.club_name,
            match change.change {
                pennant_season::TierMove::Promoted => "promoted",
                pennant_season::TierMove::Relegated => "relegated",
            },
            tier_name(change.from_tier),
            tier_name(change.to_tier),
            change.final_position
        );
    }
    println!(
        "{} relegated, {} promoted",
        report.clubs_relegated, report.clubs_promoted
    );
}

pub fn print_game_status(status: &GameStatus) {
    if status.total_active_seasons == 0 {
        println!("No active seasons");
        return;
    }
    for season in status.upper_seasons.iter().chain(&status.lower_seasons) {
        print_status(season);
    }
    println!("Next actions");
    for action in &status.next_actions {
        println!("  {}", action.description());
    }
}

fn role_name(role: KeyRole) -> &'static str {
    match role {
        KeyRole::Forward => "Forward",
        KeyRole::Midfielder => "Midfielder",
        KeyRole::Defender => "Defender",
        KeyRole::Ruck => "Ruck",
    }
}

pub fn print_form(form: &ClubForm) {
    println!("{} ({} tier)", form.club_name, tier_name(form.tier));
    if let Some(position) = form.ladder_position {
        println!("  Ladder position {}", position);
    }
    println!(
        "  Form {} (overall {:.1}, attack {:.1}, midfield {:.1}, defense {:.1})",
        form.form_rating,
        form.ratings.overall,
        form.ratings.attack,
        form.ratings.midfield,
        form.ratings.defense
    );
    println!(
        "  Squad {} players, {} unavailable",
        form.squad_size, form.unavailable
    );
    for key in &form.key_players {
        println!("  {:<11} {} ({:.1})", role_name(key.role), key.name, key.score);
    }
    if form.recent_results.is_empty() {
        println!("  No results yet");
        return;
    }
    println!("  Recent form {}", form.recent_form);
    for r in &form.recent_results {
        println!(
            "    R{:<3} {} {} {}-{}",
            r.round,
            if r.at_home { "v " } else { "at" },
            r.opponent_name,
            r.points_for,
            r.points_against
        );
    }
}

pub fn print_stats(stats: &[MatchStat], name_of: impl Fn(u32) -> String) {
    println!(
        "{:<5} {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>3} {:>3} {:>3}",
        "Club", "Player", "G", "B", "K", "HB", "D", "M", "T", "HO"
    );
    for s in stats {
        println!(
            "{:<5} {:<24} {:>3} {:>3} {:>3} {:>3} {:>4} {:>3} {:>3} {:>3}",
            s.club_id,
            name_of(s.player_id),
            s.goals,
            s.behinds,
            s.kicks,
            s.handballs,
            s.disposals,
            s.marks,
            s.tackles,
            s.hit_outs
        );
    }
}
