//! Lineup selection and team rating computation

use serde::{Deserialize, Serialize};

use crate::conditions::{Conditions, EffectiveAttributes};
use crate::fixture::LINEUP_SIZE;
use crate::player::{Attributes, Player, PlayerId, Position};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Multiplicative boost for the home side's group and overall ratings
pub const HOME_ADVANTAGE: f64 = 1.03;

/// Rating used for a tactical group with nobody in it
const EMPTY_GROUP_RATING: f64 = 50.0;

/// Squad size at which depth is maxed out
const FULL_DEPTH_SQUAD: f64 = 25.0;

/// Attribute selector for weight tables
#[derive(Clone, Copy, Debug)]
enum Attr {
    Kicking,
    Handball,
    Marking,
    Spoiling,
    RuckWork,
    Speed,
    Endurance,
    Strength,
    DecisionMaking,
    Composure,
}

impl Attr {
    fn of(self, e: &EffectiveAttributes) -> f64 {
        match self {
            Attr::Kicking => e.kicking,
            Attr::Handball => e.handball,
            Attr::Marking => e.marking,
            Attr::Spoiling => e.spoiling,
            Attr::RuckWork => e.ruck_work,
            Attr::Speed => e.speed,
            Attr::Endurance => e.endurance,
            Attr::Strength => e.strength,
            Attr::DecisionMaking => e.decision_making,
            Attr::Composure => e.composure,
        }
    }
}

type Weights = &'static [(Attr, f64)];

const ATTACK_WEIGHTS: Weights = &[
    (Attr::Marking, 0.35),
    (Attr::Kicking, 0.35),
    (Attr::Speed, 0.15),
    (Attr::Composure, 0.15),
];
const MIDFIELD_WEIGHTS: Weights = &[
    (Attr::Endurance, 0.25),
    (Attr::DecisionMaking, 0.25),
    (Attr::Kicking, 0.2),
    (Attr::Handball, 0.15),
    (Attr::Speed, 0.15),
];
const DEFENSE_WEIGHTS: Weights = &[
    (Attr::Spoiling, 0.35),
    (Attr::Marking, 0.25),
    (Attr::Strength, 0.25),
    (Attr::DecisionMaking, 0.15),
];
const RUCK_WEIGHTS: Weights = &[
    (Attr::RuckWork, 0.4),
    (Attr::Strength, 0.25),
    (Attr::Marking, 0.2),
    (Attr::Endurance, 0.15),
];
const GOAL_ACCURACY_WEIGHTS: Weights = &[(Attr::Kicking, 0.7), (Attr::Composure, 0.3)];
const BALL_MOVEMENT_WEIGHTS: Weights = &[
    (Attr::Kicking, 0.4),
    (Attr::Handball, 0.3),
    (Attr::DecisionMaking, 0.3),
];
const PRESSURE_WEIGHTS: Weights = &[
    (Attr::Spoiling, 0.4),
    (Attr::Speed, 0.3),
    (Attr::Endurance, 0.3),
];
const CONTESTED_WEIGHTS: Weights = &[(Attr::Strength, 0.6), (Attr::DecisionMaking, 0.4)];

/// Utility players topping up each group, as lineup-order slices
const UTILITY_FORWARDS: (usize, usize) = (0, 2);
const UTILITY_MIDFIELD: (usize, usize) = (2, 4);
const UTILITY_DEFENSE: (usize, usize) = (4, 6);
const UTILITY_RUCK: (usize, usize) = (6, usize::MAX);

// ============================================================================
// LINEUP
// ============================================================================

/// Pick the match lineup from a roster
///
/// Injured and suspended players are skipped. Rosters larger than the lineup
/// keep the top players by overall rating; equal ratings keep roster order.
pub fn select_lineup(roster: &[Player]) -> Vec<&Player> {
    let mut eligible: Vec<&Player> = roster.iter().filter(|p| p.is_eligible()).collect();
    if eligible.len() <= LINEUP_SIZE {
        return eligible;
    }

    eligible.sort_by(|a, b| b.overall_rating().total_cmp(&a.overall_rating()));
    eligible.truncate(LINEUP_SIZE);
    eligible
}

// ============================================================================
// TEAM RATINGS
// ============================================================================

/// Snapshot of a side's strength, all on a 0-100 scale except `depth`
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TeamRatings {
    pub attack: f64,
    pub midfield: f64,
    pub defense: f64,
    pub ruck: f64,
    pub overall: f64,
    pub chemistry: f64,
    /// Eligible squad size / 25, capped at 1
    pub depth: f64,
    pub goal_accuracy: f64,
    pub ball_movement: f64,
    pub defensive_pressure: f64,
    pub contested_ball: f64,
    pub endurance: f64,
}

impl Default for TeamRatings {
    fn default() -> Self {
        Self {
            attack: 50.0,
            midfield: 50.0,
            defense: 50.0,
            ruck: 50.0,
            overall: 50.0,
            chemistry: 50.0,
            depth: 0.8,
            goal_accuracy: 60.0,
            ball_movement: 50.0,
            defensive_pressure: 50.0,
            contested_ball: 50.0,
            endurance: 50.0,
        }
    }
}

/// A lineup player with condition-adjusted attributes
struct Member<'a> {
    player: &'a Player,
    eff: EffectiveAttributes,
}

impl TeamRatings {
    /// Rate the lineup picked from a roster
    ///
    /// Depth counts every eligible player on the roster, not just the lineup.
    pub fn for_roster(roster: &[Player], conditions: Conditions) -> Self {
        let lineup = select_lineup(roster);
        let ratings = Self::for_lineup(&lineup, conditions);
        if lineup.is_empty() {
            return ratings;
        }
        let squad = roster.iter().filter(|p| p.is_eligible()).count();
        Self {
            depth: squad_depth(squad),
            ..ratings
        }
    }

    /// Rate a selected lineup under the given conditions
    ///
    /// With no roster to go on, depth is taken from the lineup size.
    pub fn for_lineup(lineup: &[&Player], conditions: Conditions) -> Self {
        if lineup.is_empty() {
            return Self::default();
        }

        let effects = conditions.effects();
        let members: Vec<Member<'_>> = lineup
            .iter()
            .map(|&player| Member {
                player,
                eff: effects.apply(&player.attributes),
            })
            .collect();

        let forwards = by_position(&members, Position::is_forward);
        let midfielders = by_position(&members, |p| p == Position::Midfielder);
        let defenders = by_position(&members, Position::is_defender);
        let rucks = by_position(&members, |p| p == Position::Ruck);
        let utility = by_position(&members, |p| p == Position::Utility);

        let attack = group_rating(
            &with_utility(&forwards, &utility, UTILITY_FORWARDS),
            ATTACK_WEIGHTS,
        );
        let midfield = group_rating(
            &with_utility(&midfielders, &utility, UTILITY_MIDFIELD),
            MIDFIELD_WEIGHTS,
        );
        let defense = group_rating(
            &with_utility(&defenders, &utility, UTILITY_DEFENSE),
            DEFENSE_WEIGHTS,
        );
        let ruck = group_rating(&with_utility(&rucks, &utility, UTILITY_RUCK), RUCK_WEIGHTS);

        let goal_accuracy = if forwards.is_empty() {
            60.0
        } else {
            weighted(&forwards, GOAL_ACCURACY_WEIGHTS).clamp(40.0, 95.0)
        };

        let mid_and_def: Vec<&EffectiveAttributes> =
            midfielders.iter().chain(defenders.iter()).copied().collect();
        let all: Vec<&EffectiveAttributes> = members.iter().map(|m| &m.eff).collect();

        Self {
            attack,
            midfield,
            defense,
            ruck,
            overall: (attack + midfield + defense + ruck) / 4.0,
            chemistry: chemistry(&members),
            depth: squad_depth(lineup.len()),
            goal_accuracy,
            ball_movement: weighted_or_default(&mid_and_def, BALL_MOVEMENT_WEIGHTS),
            defensive_pressure: weighted_or_default(&mid_and_def, PRESSURE_WEIGHTS),
            contested_ball: weighted(&all, CONTESTED_WEIGHTS),
            endurance: average(&all, Attr::Endurance),
        }
    }

    /// Home-ground boost on attack, midfield, defense, ruck and overall
    pub fn with_home_advantage(self) -> Self {
        let boost = |v: f64| (v * HOME_ADVANTAGE).min(100.0);
        Self {
            attack: boost(self.attack),
            midfield: boost(self.midfield),
            defense: boost(self.defense),
            ruck: boost(self.ruck),
            overall: boost(self.overall),
            ..self
        }
    }

    /// Fatigue and momentum applied to attack, midfield, defense and overall
    pub(crate) fn for_quarter(&self, fatigue: f64, momentum_multiplier: f64) -> Self {
        let scale = fatigue * momentum_multiplier;
        Self {
            attack: self.attack * scale,
            midfield: self.midfield * scale,
            defense: self.defense * scale,
            overall: self.overall * scale,
            ..*self
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

fn by_position<'a>(
    members: &'a [Member<'_>],
    pred: fn(Position) -> bool,
) -> Vec<&'a EffectiveAttributes> {
    members
        .iter()
        .filter(|m| pred(m.player.position))
        .map(|m| &m.eff)
        .collect()
}

/// A positional group topped up with its slice of the utility players
fn with_utility<'a>(
    group: &[&'a EffectiveAttributes],
    utility: &[&'a EffectiveAttributes],
    (start, end): (usize, usize),
) -> Vec<&'a EffectiveAttributes> {
    let len = utility.len();
    let mut out = group.to_vec();
    out.extend_from_slice(&utility[start.min(len)..end.min(len)]);
    out
}

fn average(group: &[&EffectiveAttributes], attr: Attr) -> f64 {
    group.iter().map(|e| attr.of(e)).sum::<f64>() / group.len() as f64
}

fn weighted(group: &[&EffectiveAttributes], weights: Weights) -> f64 {
    weights.iter().map(|&(attr, w)| average(group, attr) * w).sum()
}

fn weighted_or_default(group: &[&EffectiveAttributes], weights: Weights) -> f64 {
    if group.is_empty() {
        EMPTY_GROUP_RATING
    } else {
        weighted(group, weights)
    }
}

fn group_rating(group: &[&EffectiveAttributes], weights: Weights) -> f64 {
    weighted_or_default(group, weights).clamp(0.0, 100.0)
}

// ============================================================================
// FORM
// ============================================================================

/// Positional group a key player is picked for
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyRole {
    Forward,
    Midfielder,
    Defender,
    Ruck,
}

impl KeyRole {
    pub const ALL: [KeyRole; 4] = [
        KeyRole::Forward,
        KeyRole::Midfielder,
        KeyRole::Defender,
        KeyRole::Ruck,
    ];

    pub fn includes(self, position: Position) -> bool {
        match self {
            KeyRole::Forward => position.is_forward(),
            KeyRole::Midfielder => position == Position::Midfielder,
            KeyRole::Defender => position.is_defender(),
            KeyRole::Ruck => position == Position::Ruck,
        }
    }

    /// Raw-attribute score used to rank players within the group
    fn score(self, a: &Attributes) -> f64 {
        match self {
            KeyRole::Forward => mean(&[a.marking, a.kicking, a.speed]),
            KeyRole::Midfielder => mean(&[a.kicking, a.handball, a.endurance, a.decision_making]),
            KeyRole::Defender => mean(&[a.spoiling, a.marking, a.strength]),
            KeyRole::Ruck => mean(&[a.ruck_work, a.strength, a.marking]),
        }
    }
}

fn mean(values: &[u8]) -> f64 {
    values.iter().map(|&v| v as f64).sum::<f64>() / values.len() as f64
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct KeyPlayer {
    pub role: KeyRole,
    pub player_id: PlayerId,
    pub name: String,
    pub score: f64,
}

/// Best player of each positional group; groups with nobody are left out
///
/// Utility players are not considered. Ties go to the earlier player.
pub fn key_players(lineup: &[&Player]) -> Vec<KeyPlayer> {
    KeyRole::ALL
        .iter()
        .filter_map(|&role| {
            let mut best: Option<(&Player, f64)> = None;
            for &player in lineup.iter().filter(|p| role.includes(p.position)) {
                let score = role.score(&player.attributes);
                if best.map_or(true, |(_, top)| score > top) {
                    best = Some((player, score));
                }
            }
            best.map(|(player, score)| KeyPlayer {
                role,
                player_id: player.id,
                name: player.name.clone(),
                score,
            })
        })
        .collect()
}

/// Word rating for an overall team rating
pub fn form_description(overall: f64) -> &'static str {
    match overall {
        o if o >= 85.0 => "Excellent",
        o if o >= 75.0 => "Very Good",
        o if o >= 65.0 => "Good",
        o if o >= 55.0 => "Average",
        o if o >= 45.0 => "Below Average",
        _ => "Poor",
    }
}

fn squad_depth(players: usize) -> f64 {
    (players as f64 / FULL_DEPTH_SQUAD).min(1.0)
}

/// Leadership blended 60/40 with morale rescaled from [-5, 5] to [0, 100]
fn chemistry(members: &[Member<'_>]) -> f64 {
    let n = members.len() as f64;
    let leadership = members.iter().map(|m| m.eff.leadership).sum::<f64>() / n;
    let morale = members.iter().map(|m| m.player.morale as f64).sum::<f64>() / n;
    let morale_pct = (morale + 5.0) / 10.0 * 100.0;
    (leadership * 0.6 + morale_pct * 0.4).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player(id: u32, position: Position, value: u8) -> Player {
        Player {
            id,
            club_id: 1,
            name: format!("Player {}", id),
            position,
            age: 25,
            attributes: Attributes::uniform(value),
            potential: 80,
            morale: 0,
            injured: false,
            suspended: false,
        }
    }

    fn balanced_squad(value: u8) -> Vec<Player> {
        let layout = [
            (Position::KeyForward, 3),
            (Position::SmallForward, 3),
            (Position::Midfielder, 6),
            (Position::HalfBack, 3),
            (Position::KeyBack, 3),
            (Position::Ruck, 2),
            (Position::Utility, 2),
        ];
        let mut id = 0;
        let mut squad = Vec::new();
        for (position, count) in layout {
            for _ in 0..count {
                id += 1;
                squad.push(player(id, position, value));
            }
        }
        squad
    }

    #[test]
    fn test_select_lineup_caps_and_ranks() {
        let mut roster = balanced_squad(60);
        for i in 0..5 {
            roster.push(player(100 + i, Position::Midfielder, 90));
        }
        assert_eq!(roster.len(), 27);

        let lineup = select_lineup(&roster);
        assert_eq!(lineup.len(), LINEUP_SIZE);
        for i in 0..5 {
            assert!(lineup.iter().any(|p| p.id == 100 + i));
        }
    }

    #[test]
    fn test_select_lineup_skips_unavailable() {
        let mut roster = balanced_squad(60);
        roster[0].injured = true;
        roster[1].suspended = true;

        let lineup = select_lineup(&roster);
        assert_eq!(lineup.len(), 20);
        assert!(lineup.iter().all(|p| p.is_eligible()));
    }

    #[test]
    fn test_uniform_squad_ratings() {
        let squad = balanced_squad(70);
        let lineup = select_lineup(&squad);
        let ratings = TeamRatings::for_lineup(&lineup, Conditions::Ideal);

        assert!((ratings.attack - 70.0).abs() < 1e-9);
        assert!((ratings.midfield - 70.0).abs() < 1e-9);
        assert!((ratings.defense - 70.0).abs() < 1e-9);
        assert!((ratings.ruck - 70.0).abs() < 1e-9);
        assert!((ratings.overall - 70.0).abs() < 1e-9);
        assert!((ratings.endurance - 70.0).abs() < 1e-9);
        assert!((ratings.depth - 22.0 / 25.0).abs() < 1e-9);
        // leadership 70 * 0.6 + neutral morale 50 * 0.4
        assert!((ratings.chemistry - 62.0).abs() < 1e-9);
    }

    #[test]
    fn test_depth_counts_whole_roster() {
        let mut roster = balanced_squad(70);
        for i in 0..5 {
            roster.push(player(100 + i, Position::Utility, 40));
        }
        let full = TeamRatings::for_roster(&roster, Conditions::Ideal);
        assert!((full.depth - 1.0).abs() < 1e-9);

        let lineup = select_lineup(&roster);
        let lineup_only = TeamRatings::for_lineup(&lineup, Conditions::Ideal);
        assert!((lineup_only.depth - 22.0 / 25.0).abs() < 1e-9);
        assert_eq!(full.attack, lineup_only.attack);

        // Unavailable players do not add depth
        for p in roster.iter_mut().take(5) {
            p.injured = true;
        }
        let thinned = TeamRatings::for_roster(&roster, Conditions::Ideal);
        assert!((thinned.depth - 22.0 / 25.0).abs() < 1e-9);

        assert_eq!(TeamRatings::for_roster(&[], Conditions::Ideal), TeamRatings::default());
    }

    #[test]
    fn test_key_players_per_group() {
        let mut squad = balanced_squad(60);
        squad[4].attributes.kicking = 95; // small forward
        squad[9].attributes.handball = 90; // midfielder
        let lineup = select_lineup(&squad);
        let keys = key_players(&lineup);

        assert_eq!(
            keys.iter().map(|k| k.role).collect::<Vec<_>>(),
            KeyRole::ALL.to_vec()
        );
        assert_eq!(keys[0].player_id, squad[4].id);
        assert_eq!(keys[1].player_id, squad[9].id);
        // Equal defenders: the first listed wins
        assert_eq!(keys[2].player_id, 13);
        assert!((keys[3].score - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_key_players_skip_empty_groups() {
        let squad: Vec<Player> = (1..=4).map(|i| player(i, Position::Ruck, 70)).collect();
        let lineup = select_lineup(&squad);
        let keys = key_players(&lineup);
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].role, KeyRole::Ruck);
        assert!(key_players(&[]).is_empty());
    }

    #[test]
    fn test_form_description_bands() {
        assert_eq!(form_description(90.0), "Excellent");
        assert_eq!(form_description(75.0), "Very Good");
        assert_eq!(form_description(70.0), "Good");
        assert_eq!(form_description(55.0), "Average");
        assert_eq!(form_description(50.0), "Below Average");
        assert_eq!(form_description(10.0), "Poor");
    }

    #[test]
    fn test_wet_weather_lowers_attack() {
        let squad = balanced_squad(70);
        let lineup = select_lineup(&squad);
        let dry = TeamRatings::for_lineup(&lineup, Conditions::Ideal);
        let wet = TeamRatings::for_lineup(&lineup, Conditions::Wet);

        assert!(wet.attack < dry.attack);
        assert!(wet.goal_accuracy < dry.goal_accuracy);
        assert_eq!(wet.contested_ball, dry.contested_ball);
    }

    #[test]
    fn test_group_ratings_clamped() {
        let squad = balanced_squad(100);
        let lineup = select_lineup(&squad);
        let cold = TeamRatings::for_lineup(&lineup, Conditions::Cold);
        assert!(cold.midfield <= 100.0);
        assert!(cold.ruck <= 100.0);
    }

    #[test]
    fn test_empty_lineup_defaults() {
        let ratings = TeamRatings::for_lineup(&[], Conditions::Ideal);
        assert_eq!(ratings, TeamRatings::default());
    }

    #[test]
    fn test_missing_group_defaults_to_fifty() {
        let squad: Vec<Player> = (1..=10).map(|i| player(i, Position::Midfielder, 80)).collect();
        let lineup = select_lineup(&squad);
        let ratings = TeamRatings::for_lineup(&lineup, Conditions::Ideal);
        assert_eq!(ratings.attack, 50.0);
        assert_eq!(ratings.defense, 50.0);
        assert_eq!(ratings.ruck, 50.0);
        assert_eq!(ratings.goal_accuracy, 60.0);
        assert!((ratings.midfield - 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_utility_tops_up_groups_in_order() {
        let mut squad = vec![player(1, Position::Midfielder, 50)];
        // First two utilities join the forwards
        squad.push(player(2, Position::Utility, 90));
        squad.push(player(3, Position::Utility, 90));
        let lineup = select_lineup(&squad);
        let ratings = TeamRatings::for_lineup(&lineup, Conditions::Ideal);
        assert!((ratings.attack - 90.0).abs() < 1e-9);
        assert_eq!(ratings.defense, 50.0);
        // Natural forwards only feed goal accuracy
        assert_eq!(ratings.goal_accuracy, 60.0);
    }

    #[test]
    fn test_home_advantage_scope() {
        let squad = balanced_squad(70);
        let lineup = select_lineup(&squad);
        let base = TeamRatings::for_lineup(&lineup, Conditions::Ideal);
        let home = base.with_home_advantage();

        assert!((home.attack - 70.0 * HOME_ADVANTAGE).abs() < 1e-9);
        assert!((home.overall - 70.0 * HOME_ADVANTAGE).abs() < 1e-9);
        assert_eq!(home.goal_accuracy, base.goal_accuracy);
        assert_eq!(home.chemistry, base.chemistry);

        let maxed = TeamRatings::for_lineup(&select_lineup(&balanced_squad(99)), Conditions::Ideal)
            .with_home_advantage();
        assert!(maxed.attack <= 100.0);
    }
}
