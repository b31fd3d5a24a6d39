//! Match simulation engine
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: `simulate_match` - validate, rate, play four quarters, report
//! - Level 2: `play_quarter` - fatigue, momentum, scoring for both sides
//! - Level 3: `score_side`, `accrue_player_stats` - per-opportunity draws
//! - Level 4: narrative helpers (`quarter_event`, `match_summary`)
//!
//! All randomness comes from the caller's RNG; the same rosters, conditions
//! and RNG state always produce the same report.

use rand::Rng;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::club::ClubId;
use crate::conditions::Conditions;
use crate::error::{LeagueError, Result};
use crate::fixture::{FixtureId, FixtureScore, MatchStat, BEHIND_POINTS, GOAL_POINTS, QUARTERS};
use crate::player::{Player, PlayerId, Position};
use crate::ratings::{select_lineup, TeamRatings};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Base fatigue multiplier per quarter
const QUARTER_FATIGUE: [f64; QUARTERS as usize] = [1.0, 0.95, 0.90, 0.85];
const FATIGUE_FLOOR: f64 = 0.70;
const FATIGUE_ENDURANCE_PIVOT: f64 = 70.0;
const FATIGUE_ENDURANCE_SLOPE: f64 = 0.002;

/// Rating swing per unit of momentum
const MOMENTUM_SWING: f64 = 0.05;
const MOMENTUM_DECAY: f64 = 0.5;
const MOMENTUM_POINTS_SCALE: f64 = 30.0;

const BASE_OPPORTUNITIES: i32 = 12;
const OPPORTUNITY_NOISE: i32 = 4;
const MIN_OPPORTUNITIES: i32 = 4;
const MAX_OPPORTUNITIES: i32 = 20;
const MIDFIELD_PIVOT: f64 = 70.0;

const MIN_SCORE_CHANCE: f64 = 0.2;
const MAX_SCORE_CHANCE: f64 = 0.8;

/// Goals by one side in a quarter that count as dominating it
const DOMINANT_GOALS: u32 = 4;
/// Combined goals + behinds lead that counts as controlling a quarter
const CONTROL_LEAD: u32 = 2;

const PLAYER_GOAL_CHANCE: f64 = 0.10;
const PLAYER_BEHIND_CHANCE: f64 = 0.15;

// ============================================================================
// TYPES
// ============================================================================

/// One side of a match as handed to the simulator
#[derive(Clone, Copy, Debug)]
pub struct TeamSide<'a> {
    pub name: &'a str,
    pub roster: &'a [Player],
}

impl<'a> TeamSide<'a> {
    pub fn new(name: &'a str, roster: &'a [Player]) -> Self {
        Self { name, roster }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSide {
    Home,
    Away,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchWinner {
    Home,
    Away,
    Draw,
}

/// Scoring and narrative for one quarter
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QuarterSummary {
    pub quarter: u8,
    pub home_goals: u32,
    pub home_behinds: u32,
    pub away_goals: u32,
    pub away_behinds: u32,
    /// Momentum carried into the next quarter, home-positive
    pub momentum: f64,
    pub event: String,
}

impl QuarterSummary {
    pub fn home_points(&self) -> u32 {
        self.home_goals * GOAL_POINTS + self.home_behinds * BEHIND_POINTS
    }

    pub fn away_points(&self) -> u32 {
        self.away_goals * GOAL_POINTS + self.away_behinds * BEHIND_POINTS
    }
}

/// Individual box-score line
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerPerformance {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    pub side: MatchSide,
    pub goals: u32,
    pub behinds: u32,
    pub kicks: u32,
    pub handballs: u32,
    pub marks: u32,
    pub tackles: u32,
    pub hit_outs: u32,
}

impl PlayerPerformance {
    fn new(player: &Player, side: MatchSide) -> Self {
        Self {
            player_id: player.id,
            name: player.name.clone(),
            position: player.position,
            side,
            goals: 0,
            behinds: 0,
            kicks: 0,
            handballs: 0,
            marks: 0,
            tackles: 0,
            hit_outs: 0,
        }
    }

    pub fn disposals(&self) -> u32 {
        self.kicks + self.handballs
    }
}

/// Full result of a simulated match
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub home_name: String,
    pub away_name: String,
    pub conditions: Conditions,
    pub home_goals: u32,
    pub home_behinds: u32,
    pub away_goals: u32,
    pub away_behinds: u32,
    pub home_score: u32,
    pub away_score: u32,
    pub margin: u32,
    pub winner: MatchWinner,
    pub quarters: Vec<QuarterSummary>,
    pub home_ratings: TeamRatings,
    pub away_ratings: TeamRatings,
    /// Home lineup first, then away lineup
    pub performances: Vec<PlayerPerformance>,
    pub summary: String,
}

impl MatchReport {
    /// Score to record against a fixture
    pub fn to_score(&self) -> FixtureScore {
        FixtureScore::new(
            self.home_goals,
            self.home_behinds,
            self.away_goals,
            self.away_behinds,
        )
    }

    /// Name of the winning side, `None` on a draw
    pub fn winner_name(&self) -> Option<&str> {
        match self.winner {
            MatchWinner::Home => Some(&self.home_name),
            MatchWinner::Away => Some(&self.away_name),
            MatchWinner::Draw => None,
        }
    }

    pub fn performances_for(&self, side: MatchSide) -> impl Iterator<Item = &PlayerPerformance> {
        self.performances.iter().filter(move |p| p.side == side)
    }

    /// Box scores to store against a fixture, one per lineup player
    pub fn match_stats(&self, fixture_id: FixtureId, home: ClubId, away: ClubId) -> Vec<MatchStat> {
        self.performances
            .iter()
            .map(|p| MatchStat {
                fixture_id,
                player_id: p.player_id,
                club_id: match p.side {
                    MatchSide::Home => home,
                    MatchSide::Away => away,
                },
                goals: p.goals,
                behinds: p.behinds,
                kicks: p.kicks,
                handballs: p.handballs,
                disposals: p.disposals(),
                marks: p.marks,
                tackles: p.tackles,
                hit_outs: p.hit_outs,
            })
            .collect()
    }
}

// ============================================================================
// LEVEL 1: MATCH
// ============================================================================

/// Simulate a match between two rosters
///
/// Only eligible players are selected. Rosters with out-of-range attributes
/// or duplicated player ids are rejected with an engine error.
pub fn simulate_match<R: Rng + ?Sized>(
    home: &TeamSide<'_>,
    away: &TeamSide<'_>,
    conditions: Conditions,
    rng: &mut R,
) -> Result<MatchReport> {
    validate_rosters(home, away)?;

    let home_lineup = select_lineup(home.roster);
    let away_lineup = select_lineup(away.roster);

    let home_ratings = TeamRatings::for_roster(home.roster, conditions).with_home_advantage();
    let away_ratings = TeamRatings::for_roster(away.roster, conditions);

    let mut performances: Vec<PlayerPerformance> = home_lineup
        .iter()
        .map(|p| PlayerPerformance::new(p, MatchSide::Home))
        .chain(away_lineup.iter().map(|p| PlayerPerformance::new(p, MatchSide::Away)))
        .collect();

    let mut momentum = 0.0;
    let mut quarters = Vec::with_capacity(QUARTERS as usize);
    for quarter in 1..=QUARTERS {
        let summary = play_quarter(
            quarter,
            &home_ratings,
            &away_ratings,
            momentum,
            &mut performances,
            rng,
        );
        momentum = summary.momentum;
        quarters.push(summary);
    }

    let home_goals = quarters.iter().map(|q| q.home_goals).sum::<u32>();
    let home_behinds = quarters.iter().map(|q| q.home_behinds).sum::<u32>();
    let away_goals = quarters.iter().map(|q| q.away_goals).sum::<u32>();
    let away_behinds = quarters.iter().map(|q| q.away_behinds).sum::<u32>();
    let home_score = home_goals * GOAL_POINTS + home_behinds * BEHIND_POINTS;
    let away_score = away_goals * GOAL_POINTS + away_behinds * BEHIND_POINTS;

    let winner = match home_score.cmp(&away_score) {
        std::cmp::Ordering::Greater => MatchWinner::Home,
        std::cmp::Ordering::Less => MatchWinner::Away,
        std::cmp::Ordering::Equal => MatchWinner::Draw,
    };
    let margin = home_score.abs_diff(away_score);
    let summary = match_summary(home.name, away.name, home_score, away_score, conditions);

    Ok(MatchReport {
        home_name: home.name.to_string(),
        away_name: away.name.to_string(),
        conditions,
        home_goals,
        home_behinds,
        away_goals,
        away_behinds,
        home_score,
        away_score,
        margin,
        winner,
        quarters,
        home_ratings,
        away_ratings,
        performances,
        summary,
    })
}

fn validate_rosters(home: &TeamSide<'_>, away: &TeamSide<'_>) -> Result<()> {
    let mut seen = FxHashSet::default();
    for side in [home, away] {
        for player in side.roster {
            player.validate()?;
            if !seen.insert(player.id) {
                return Err(LeagueError::engine(format!(
                    "player {} ({}) appears more than once in the match rosters",
                    player.id, player.name
                )));
            }
        }
    }
    Ok(())
}

// ============================================================================
// LEVEL 2: QUARTER
// ============================================================================

fn play_quarter<R: Rng + ?Sized>(
    quarter: u8,
    home: &TeamRatings,
    away: &TeamRatings,
    momentum: f64,
    performances: &mut [PlayerPerformance],
    rng: &mut R,
) -> QuarterSummary {
    let base = QUARTER_FATIGUE[(quarter - 1) as usize];
    let home_q = home.for_quarter(fatigue(base, home), 1.0 + momentum * MOMENTUM_SWING);
    let away_q = away.for_quarter(fatigue(base, away), 1.0 - momentum * MOMENTUM_SWING);

    let (home_goals, home_behinds) = score_side(&home_q, &away_q, rng);
    let (away_goals, away_behinds) = score_side(&away_q, &home_q, rng);

    for performance in performances.iter_mut() {
        accrue_player_stats(performance, rng);
    }

    let diff = (home_goals * GOAL_POINTS + home_behinds * BEHIND_POINTS) as f64
        - (away_goals * GOAL_POINTS + away_behinds * BEHIND_POINTS) as f64;
    let next_momentum =
        (MOMENTUM_DECAY * momentum + diff / MOMENTUM_POINTS_SCALE).clamp(-1.0, 1.0);

    QuarterSummary {
        quarter,
        home_goals,
        home_behinds,
        away_goals,
        away_behinds,
        momentum: next_momentum,
        event: quarter_event(quarter, home_goals, home_behinds, away_goals, away_behinds),
    }
}

fn fatigue(base: f64, ratings: &TeamRatings) -> f64 {
    (base + (ratings.endurance - FATIGUE_ENDURANCE_PIVOT) * FATIGUE_ENDURANCE_SLOPE)
        .max(FATIGUE_FLOOR)
}

// ============================================================================
// LEVEL 3: SCORING AND PLAYER STATS
// ============================================================================

/// Goals and behinds kicked by `attack` against `defense` in one quarter
fn score_side<R: Rng + ?Sized>(
    attack: &TeamRatings,
    defense: &TeamRatings,
    rng: &mut R,
) -> (u32, u32) {
    let noise = rng.gen_range(-OPPORTUNITY_NOISE..=OPPORTUNITY_NOISE);
    let raw = ((BASE_OPPORTUNITIES + noise) as f64 * attack.midfield / MIDFIELD_PIVOT) as i32;
    let opportunities = raw.clamp(MIN_OPPORTUNITIES, MAX_OPPORTUNITIES);

    let chance = ((attack.attack - defense.defense + 70.0) / 140.0)
        .clamp(MIN_SCORE_CHANCE, MAX_SCORE_CHANCE);
    let accuracy = (attack.goal_accuracy / 100.0).clamp(0.0, 1.0);

    let mut goals = 0;
    let mut behinds = 0;
    for _ in 0..opportunities {
        if rng.gen_bool(chance) {
            if rng.gen_bool(accuracy) {
                goals += 1;
            } else {
                behinds += 1;
            }
        }
    }
    (goals, behinds)
}

fn accrue_player_stats<R: Rng + ?Sized>(perf: &mut PlayerPerformance, rng: &mut R) {
    if rng.gen_bool(PLAYER_GOAL_CHANCE) {
        perf.goals += 1;
    }
    if rng.gen_bool(PLAYER_BEHIND_CHANCE) {
        perf.behinds += 1;
    }
    perf.kicks += rng.gen_range(2..=8);
    perf.handballs += rng.gen_range(1..=6);
    perf.marks += rng.gen_range(0..=3);
    perf.tackles += rng.gen_range(0..=4);
    if perf.position == Position::Ruck {
        perf.hit_outs += rng.gen_range(2..=8);
    }
}

// ============================================================================
// LEVEL 4: NARRATIVE
// ============================================================================

fn quarter_event(
    quarter: u8,
    home_goals: u32,
    home_behinds: u32,
    away_goals: u32,
    away_behinds: u32,
) -> String {
    let home_total = home_goals + home_behinds;
    let away_total = away_goals + away_behinds;

    if home_goals >= DOMINANT_GOALS {
        format!("Q{}: Home team dominates with {} goals", quarter, home_goals)
    } else if away_goals >= DOMINANT_GOALS {
        format!("Q{}: Away team dominates with {} goals", quarter, away_goals)
    } else if home_total > away_total + CONTROL_LEAD {
        format!("Q{}: Home team controls the quarter", quarter)
    } else if away_total > home_total + CONTROL_LEAD {
        format!("Q{}: Away team controls the quarter", quarter)
    } else {
        format!("Q{}: Tight, contested quarter", quarter)
    }
}

fn margin_sentence(margin: u32) -> &'static str {
    match margin {
        m if m > 50 => "A dominant performance from start to finish.",
        m if m > 25 => "A convincing victory with strong team performance.",
        m if m > 10 => "A solid win with some good passages of play.",
        _ => "A thrilling contest that went down to the wire.",
    }
}

fn match_summary(
    home: &str,
    away: &str,
    home_score: u32,
    away_score: u32,
    conditions: Conditions,
) -> String {
    let margin = home_score.abs_diff(away_score);
    let mut summary = if home_score == away_score {
        format!(
            "{} and {} played out a {}-all draw. {}",
            home,
            away,
            home_score,
            margin_sentence(0)
        )
    } else {
        let (winner, loser) = if home_score > away_score {
            (home, away)
        } else {
            (away, home)
        };
        format!(
            "{} defeated {} by {} points. {}",
            winner,
            loser,
            margin,
            margin_sentence(margin)
        )
    };

    if conditions != Conditions::Ideal {
        summary.push_str(&format!(" Played in {} conditions.", conditions));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::Attributes;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const POSITIONS: [Position; 22] = [
        Position::KeyForward,
        Position::KeyForward,
        Position::SmallForward,
        Position::SmallForward,
        Position::SmallForward,
        Position::SmallForward,
        Position::Midfielder,
        Position::Midfielder,
        Position::Midfielder,
        Position::Midfielder,
        Position::Midfielder,
        Position::Midfielder,
        Position::HalfBack,
        Position::HalfBack,
        Position::HalfBack,
        Position::KeyBack,
        Position::KeyBack,
        Position::KeyBack,
        Position::Ruck,
        Position::Ruck,
        Position::Utility,
        Position::Utility,
    ];

    fn make_test_roster(first_id: u32, club_id: u32, value: u8) -> Vec<Player> {
        POSITIONS
            .iter()
            .enumerate()
            .map(|(i, &position)| Player {
                id: first_id + i as u32,
                club_id,
                name: format!("Player {}", first_id + i as u32),
                position,
                age: 25,
                attributes: Attributes::uniform(value),
                potential: 80,
                morale: 0,
                injured: false,
                suspended: false,
            })
            .collect()
    }

    fn play(seed: u64, home: &[Player], away: &[Player], conditions: Conditions) -> MatchReport {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        simulate_match(
            &TeamSide::new("Hawks", home),
            &TeamSide::new("Swans", away),
            conditions,
            &mut rng,
        )
        .unwrap()
    }

    #[test]
    fn test_same_seed_same_report() {
        let home = make_test_roster(1, 1, 70);
        let away = make_test_roster(100, 2, 68);

        let a = play(7, &home, &away, Conditions::Ideal);
        let b = play(7, &home, &away, Conditions::Ideal);
        assert_eq!(a, b);
    }

    #[test]
    fn test_match_stats_follow_performances() {
        let home = make_test_roster(1, 1, 72);
        let away = make_test_roster(100, 2, 66);
        let report = play(21, &home, &away, Conditions::Ideal);

        let stats = report.match_stats(5, 10, 20);
        assert_eq!(stats.len(), 44);
        assert!(stats.iter().all(|s| s.fixture_id == 5));
        assert_eq!(stats.iter().filter(|s| s.club_id == 10).count(), 22);
        assert!(stats
            .iter()
            .filter(|s| s.club_id == 20)
            .all(|s| s.player_id >= 100));
        for (stat, perf) in stats.iter().zip(&report.performances) {
            assert_eq!(stat.player_id, perf.player_id);
            assert_eq!(stat.disposals, stat.kicks + stat.handballs);
            assert_eq!(stat.goals, perf.goals);
        }
    }

    #[test]
    fn test_winner_name() {
        let strong = make_test_roster(1, 1, 90);
        let weak = make_test_roster(100, 2, 40);
        let report = play(3, &strong, &weak, Conditions::Ideal);
        match report.winner {
            MatchWinner::Home => assert_eq!(report.winner_name(), Some("Hawks")),
            MatchWinner::Away => assert_eq!(report.winner_name(), Some("Swans")),
            MatchWinner::Draw => assert_eq!(report.winner_name(), None),
        }
    }

    #[test]
    fn test_scores_consistent_with_quarters() {
        let home = make_test_roster(1, 1, 70);
        let away = make_test_roster(100, 2, 70);
        let report = play(11, &home, &away, Conditions::Wet);

        assert_eq!(report.quarters.len(), QUARTERS as usize);
        assert_eq!(
            report.home_score,
            report.home_goals * GOAL_POINTS + report.home_behinds
        );
        assert_eq!(
            report.away_score,
            report.away_goals * GOAL_POINTS + report.away_behinds
        );
        let quarter_home: u32 = report.quarters.iter().map(|q| q.home_points()).sum();
        let quarter_away: u32 = report.quarters.iter().map(|q| q.away_points()).sum();
        assert_eq!(quarter_home, report.home_score);
        assert_eq!(quarter_away, report.away_score);
        assert_eq!(report.margin, report.home_score.abs_diff(report.away_score));
        assert_eq!(report.to_score().home_score(), report.home_score);

        for (i, q) in report.quarters.iter().enumerate() {
            assert_eq!(q.quarter as usize, i + 1);
            assert!(q.event.starts_with(&format!("Q{}:", i + 1)));
            assert!((-1.0..=1.0).contains(&q.momentum));
        }
    }

    #[test]
    fn test_injured_and_suspended_excluded() {
        let mut home = make_test_roster(1, 1, 70);
        home[0].injured = true;
        home[1].suspended = true;
        let away = make_test_roster(100, 2, 70);

        let report = play(3, &home, &away, Conditions::Ideal);
        let home_ids: Vec<PlayerId> = report
            .performances_for(MatchSide::Home)
            .map(|p| p.player_id)
            .collect();
        assert_eq!(home_ids.len(), 20);
        assert!(!home_ids.contains(&1));
        assert!(!home_ids.contains(&2));
        assert_eq!(report.performances_for(MatchSide::Away).count(), 22);
    }

    #[test]
    fn test_hit_outs_only_for_rucks() {
        let home = make_test_roster(1, 1, 70);
        let away = make_test_roster(100, 2, 70);
        let report = play(5, &home, &away, Conditions::Ideal);

        for perf in &report.performances {
            if perf.position == Position::Ruck {
                assert!(perf.hit_outs >= 8);
            } else {
                assert_eq!(perf.hit_outs, 0);
            }
            assert!(perf.kicks >= 8 && perf.kicks <= 32);
            assert_eq!(perf.disposals(), perf.kicks + perf.handballs);
        }
    }

    #[test]
    fn test_malformed_roster_rejected() {
        let mut home = make_test_roster(1, 1, 70);
        home[3].attributes.kicking = 120;
        let away = make_test_roster(100, 2, 70);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let err = simulate_match(
            &TeamSide::new("Hawks", &home),
            &TeamSide::new("Swans", &away),
            Conditions::Ideal,
            &mut rng,
        )
        .unwrap_err();
        assert!(matches!(err, LeagueError::Engine(_)));
    }

    #[test]
    fn test_duplicate_player_across_rosters_rejected() {
        let home = make_test_roster(1, 1, 70);
        let away = make_test_roster(10, 2, 70);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let result = simulate_match(
            &TeamSide::new("Hawks", &home),
            &TeamSide::new("Swans", &away),
            Conditions::Ideal,
            &mut rng,
        );
        assert!(matches!(result, Err(LeagueError::Engine(_))));
    }

    #[test]
    fn test_strong_side_usually_wins() {
        let strong = make_test_roster(1, 1, 90);
        let weak = make_test_roster(100, 2, 40);

        let wins = (0..20)
            .filter(|&seed| play(seed, &strong, &weak, Conditions::Ideal).winner == MatchWinner::Home)
            .count();
        assert!(wins >= 18, "strong side won only {} of 20", wins);

        let away_wins = (0..20)
            .filter(|&seed| play(seed, &weak, &strong, Conditions::Ideal).winner == MatchWinner::Away)
            .count();
        assert!(away_wins >= 18, "strong away side won only {} of 20", away_wins);
    }

    #[test]
    fn test_empty_rosters_still_play() {
        let report = play(9, &[], &[], Conditions::Ideal);
        assert_eq!(report.quarters.len(), 4);
        assert!(report.performances.is_empty());
        assert_eq!(report.away_ratings, TeamRatings::default());
    }

    #[test]
    fn test_quarter_event_thresholds() {
        assert_eq!(quarter_event(1, 4, 0, 0, 0), "Q1: Home team dominates with 4 goals");
        assert_eq!(quarter_event(2, 1, 0, 5, 2), "Q2: Away team dominates with 5 goals");
        assert_eq!(quarter_event(3, 3, 3, 1, 1), "Q3: Home team controls the quarter");
        assert_eq!(quarter_event(3, 0, 1, 2, 2), "Q3: Away team controls the quarter");
        assert_eq!(quarter_event(4, 2, 2, 2, 0), "Q4: Tight, contested quarter");
    }

    #[test]
    fn test_summary_buckets() {
        let s = match_summary("Hawks", "Swans", 120, 60, Conditions::Ideal);
        assert_eq!(
            s,
            "Hawks defeated Swans by 60 points. A dominant performance from start to finish."
        );

        let s = match_summary("Hawks", "Swans", 70, 100, Conditions::Ideal);
        assert!(s.starts_with("Swans defeated Hawks by 30 points. A convincing"));

        let s = match_summary("Hawks", "Swans", 80, 68, Conditions::Ideal);
        assert!(s.ends_with("A solid win with some good passages of play."));

        let s = match_summary("Hawks", "Swans", 80, 75, Conditions::Windy);
        assert!(s.contains("went down to the wire."));
        assert!(s.ends_with(" Played in windy conditions."));
    }

    #[test]
    fn test_draw_summary() {
        let s = match_summary("Hawks", "Swans", 77, 77, Conditions::Ideal);
        assert_eq!(
            s,
            "Hawks and Swans played out a 77-all draw. A thrilling contest that went down to the wire."
        );
    }
}
