//! Ladder standings, finals bracket and promotion/relegation zones
//!
//! Standings are derived on demand from played fixtures and never stored.

use std::cmp::Ordering;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::club::{Club, ClubId, Tier};
use crate::error::{LeagueError, Result};
use crate::fixture::Fixture;

pub const WIN_POINTS: u32 = 4;
pub const DRAW_POINTS: u32 = 2;

/// Clubs needed to stage a finals series
pub const FINALS_CLUBS: usize = 8;

/// Clubs in each of the promotion and relegation zones
pub const ZONE_SIZE: usize = 2;

/// One club's row on the ladder
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LadderEntry {
    pub club_id: ClubId,
    pub club_name: String,
    pub club_tier: Tier,
    /// 1-indexed
    pub position: usize,
    pub games_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub points_for: u32,
    pub points_against: u32,
    /// points_for / points_against * 100, two decimals; 100.0 with nothing conceded
    pub percentage: f64,
    pub ladder_points: u32,
}

impl LadderEntry {
    fn new(club: &Club) -> Self {
        Self {
            club_id: club.id,
            club_name: club.name.clone(),
            club_tier: club.tier,
            position: 0,
            games_played: 0,
            wins: 0,
            losses: 0,
            draws: 0,
            points_for: 0,
            points_against: 0,
            percentage: 100.0,
            ladder_points: 0,
        }
    }

    fn record(&mut self, points_for: u32, points_against: u32) {
        self.games_played += 1;
        self.points_for += points_for;
        self.points_against += points_against;
        match points_for.cmp(&points_against) {
            Ordering::Greater => self.wins += 1,
            Ordering::Less => self.losses += 1,
            Ordering::Equal => self.draws += 1,
        }
    }

    fn finalize(&mut self) {
        self.percentage = percentage(self.points_for, self.points_against);
        self.ladder_points = self.wins * WIN_POINTS + self.draws * DRAW_POINTS;
    }
}

/// Percentage rounded to two decimals, exactly 100.0 when nothing was conceded
pub fn percentage(points_for: u32, points_against: u32) -> f64 {
    if points_against == 0 {
        return 100.0;
    }
    let raw = points_for as f64 / points_against as f64 * 100.0;
    (raw * 100.0).round() / 100.0
}

/// Ranked standings for `clubs` over the played fixtures in `fixtures`
///
/// Ordered by ladder points, percentage and points for, all descending.
/// Clubs level on all three are ordered by ascending club id. Fixtures
/// involving clubs outside `clubs` only count for the listed side.
pub fn compute_ladder(clubs: &[Club], fixtures: &[Fixture]) -> Vec<LadderEntry> {
    let mut entries: Vec<LadderEntry> = clubs.iter().map(LadderEntry::new).collect();
    let index: FxHashMap<ClubId, usize> = entries
        .iter()
        .enumerate()
        .map(|(i, e)| (e.club_id, i))
        .collect();

    for fixture in fixtures.iter().filter(|f| f.is_played()) {
        for club in [fixture.home_id, fixture.away_id] {
            if let (Some(&i), Some((pf, pa))) = (index.get(&club), fixture.scores_for(club)) {
                entries[i].record(pf, pa);
            }
        }
    }

    for entry in entries.iter_mut() {
        entry.finalize();
    }

    entries.sort_by(|a, b| {
        b.ladder_points
            .cmp(&a.ladder_points)
            .then_with(|| b.percentage.total_cmp(&a.percentage))
            .then_with(|| b.points_for.cmp(&a.points_for))
            .then_with(|| a.club_id.cmp(&b.club_id))
    });
    for (i, entry) in entries.iter_mut().enumerate() {
        entry.position = i + 1;
    }
    entries
}

/// Ladder position of a club, if listed
pub fn position_of(ladder: &[LadderEntry], club: ClubId) -> Option<usize> {
    ladder.iter().find(|e| e.club_id == club).map(|e| e.position)
}

pub fn top(ladder: &[LadderEntry], n: usize) -> &[LadderEntry] {
    &ladder[..n.min(ladder.len())]
}

pub fn bottom(ladder: &[LadderEntry], n: usize) -> &[LadderEntry] {
    &ladder[ladder.len().saturating_sub(n)..]
}

// ============================================================================
// FINALS
// ============================================================================

/// A finals match; the higher-ranked club hosts
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinalPairing {
    pub label: String,
    pub home: LadderEntry,
    pub away: LadderEntry,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FinalsBracket {
    pub qualifying_finals: Vec<FinalPairing>,
    pub elimination_finals: Vec<FinalPairing>,
}

/// First week of the top-eight finals series
///
/// QF1 is 1v4, QF2 is 2v3, EF1 is 5v8 and EF2 is 6v7.
pub fn finals_bracket(ladder: &[LadderEntry]) -> Result<FinalsBracket> {
    if ladder.len() < FINALS_CLUBS {
        return Err(LeagueError::InsufficientClubs {
            required: FINALS_CLUBS,
            available: ladder.len(),
        });
    }

    let pair = |label: &str, home: usize, away: usize| FinalPairing {
        label: label.to_string(),
        home: ladder[home - 1].clone(),
        away: ladder[away - 1].clone(),
    };

    Ok(FinalsBracket {
        qualifying_finals: vec![pair("QF1", 1, 4), pair("QF2", 2, 3)],
        elimination_finals: vec![pair("EF1", 5, 8), pair("EF2", 6, 7)],
    })
}

// ============================================================================
// PROMOTION / RELEGATION
// ============================================================================

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PromotionRelegation {
    /// Bottom of the upper-tier ladder
    pub relegation_zone: Vec<LadderEntry>,
    /// Top of the lower-tier ladder
    pub promotion_zone: Vec<LadderEntry>,
}

/// Zones are empty when the corresponding ladder has fewer than two clubs
pub fn promotion_relegation(upper: &[LadderEntry], lower: &[LadderEntry]) -> PromotionRelegation {
    let relegation_zone = if upper.len() >= ZONE_SIZE {
        bottom(upper, ZONE_SIZE).to_vec()
    } else {
        Vec::new()
    };
    let promotion_zone = if lower.len() >= ZONE_SIZE {
        top(lower, ZONE_SIZE).to_vec()
    } else {
        Vec::new()
    };
    PromotionRelegation {
        relegation_zone,
        promotion_zone,
    }
}
