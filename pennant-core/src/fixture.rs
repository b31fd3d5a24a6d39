//! Seasons, fixtures and recorded scores

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::club::{ClubId, Tier};
use crate::player::PlayerId;

// ============================================================================
// CONSTANTS
// ============================================================================

pub const GOAL_POINTS: u32 = 6;
pub const BEHIND_POINTS: u32 = 1;
pub const QUARTERS: u8 = 4;

/// Players selected from an eligible roster
pub const LINEUP_SIZE: usize = 22;

pub type SeasonId = u32;
pub type FixtureId = u32;

// ============================================================================
// SEASON
// ============================================================================

/// Tier-scoped competition instance
///
/// `current_round` stays within `1..=total_rounds + 1`; `total_rounds + 1`
/// marks a completed season.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Season {
    pub id: SeasonId,
    pub year: i32,
    pub tier: Tier,
    pub current_round: u32,
    pub total_rounds: u32,
    pub is_active: bool,
}

impl Season {
    /// Fresh, active season positioned at round 1
    pub fn new(id: SeasonId, year: i32, tier: Tier, total_rounds: u32) -> Self {
        Self {
            id,
            year,
            tier,
            current_round: 1,
            total_rounds,
            is_active: true,
        }
    }

    pub fn contains_round(&self, round: u32) -> bool {
        (1..=self.total_rounds).contains(&round)
    }

    pub fn is_complete(&self) -> bool {
        self.current_round > self.total_rounds
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

/// Recorded score of a played fixture
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixtureScore {
    pub home_goals: u32,
    pub home_behinds: u32,
    pub away_goals: u32,
    pub away_behinds: u32,
}

impl FixtureScore {
    pub fn new(home_goals: u32, home_behinds: u32, away_goals: u32, away_behinds: u32) -> Self {
        Self {
            home_goals,
            home_behinds,
            away_goals,
            away_behinds,
        }
    }

    pub fn home_score(&self) -> u32 {
        self.home_goals * GOAL_POINTS + self.home_behinds * BEHIND_POINTS
    }

    pub fn away_score(&self) -> u32 {
        self.away_goals * GOAL_POINTS + self.away_behinds * BEHIND_POINTS
    }
}

/// A fixture produced by the scheduler, not yet stored
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledFixture {
    pub round: u32,
    pub home_id: ClubId,
    pub away_id: ClubId,
    pub scheduled_at: NaiveDateTime,
}

impl ScheduledFixture {
    pub fn into_fixture(self, id: FixtureId, season_id: SeasonId) -> Fixture {
        Fixture {
            id,
            season_id,
            round: self.round,
            home_id: self.home_id,
            away_id: self.away_id,
            scheduled_at: self.scheduled_at,
            result: None,
            played_at: None,
        }
    }
}

/// A stored fixture. `result` is set once and never rewritten.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub id: FixtureId,
    pub season_id: SeasonId,
    pub round: u32,
    pub home_id: ClubId,
    pub away_id: ClubId,
    pub scheduled_at: NaiveDateTime,
    #[serde(default)]
    pub result: Option<FixtureScore>,
    /// When the result was recorded
    #[serde(default)]
    pub played_at: Option<NaiveDateTime>,
}

impl Fixture {
    pub fn is_played(&self) -> bool {
        self.result.is_some()
    }

    pub fn involves(&self, club: ClubId) -> bool {
        self.home_id == club || self.away_id == club
    }

    pub fn home_score(&self) -> Option<u32> {
        self.result.map(|s| s.home_score())
    }

    pub fn away_score(&self) -> Option<u32> {
        self.result.map(|s| s.away_score())
    }

    /// (points for, points against) from `club`'s side, if played and involved
    pub fn scores_for(&self, club: ClubId) -> Option<(u32, u32)> {
        let score = self.result?;
        if self.home_id == club {
            Some((score.home_score(), score.away_score()))
        } else if self.away_id == club {
            Some((score.away_score(), score.home_score()))
        } else {
            None
        }
    }
}

// ============================================================================
// MATCH STATS
// ============================================================================

/// One player's box score for a played fixture
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchStat {
    pub fixture_id: FixtureId,
    pub player_id: PlayerId,
    pub club_id: ClubId,
    pub goals: u32,
    pub behinds: u32,
    pub kicks: u32,
    pub handballs: u32,
    pub disposals: u32,
    pub marks: u32,
    pub tackles: u32,
    pub hit_outs: u32,
}

impl MatchStat {
    /// Points this player kicked
    pub fn score(&self) -> u32 {
        self.goals * GOAL_POINTS + self.behinds * BEHIND_POINTS
    }
}
