//! Structured results returned by the season controller

use pennant_core::{
    ClubId, Fixture, FixtureId, KeyPlayer, LadderEntry, MatchReport, PromotionRelegation, Season,
    SeasonId, TeamRatings, Tier,
};
use serde::{Deserialize, Serialize};

/// Seasons created by `create_season` / `create_league_year`
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeasonCreated {
    pub season: Season,
    pub fixtures_generated: bool,
    pub fixture_count: usize,
    /// Why fixtures could not be generated, if asked for and failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixture_error: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LeagueYear {
    pub year: i32,
    pub upper: SeasonCreated,
    pub lower: SeasonCreated,
}

/// A fixture's simulated match
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FixtureResult {
    pub fixture_id: FixtureId,
    pub home_id: ClubId,
    pub away_id: ClubId,
    pub report: MatchReport,
}

/// Outcome of simulating one round
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundReport {
    pub season_id: SeasonId,
    pub round: u32,
    pub matches_played: usize,
    pub results: Vec<FixtureResult>,
    /// Whether this call moved the season's current round
    pub round_advanced: bool,
    pub current_round: u32,
    pub ladder: Vec<LadderEntry>,
    /// Set when the round had nothing left to play
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundSummary {
    pub round: u32,
    pub matches_played: usize,
    pub round_advanced: bool,
}

/// Outcome of simulating the rest of a season
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SeasonReport {
    pub season_id: SeasonId,
    pub rounds_simulated: usize,
    pub rounds: Vec<RoundSummary>,
    pub final_ladder: Vec<LadderEntry>,
}

/// Result of asking a season to move to its next round
///
/// Declining to advance is a normal outcome carrying a reason, not an error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvanceOutcome {
    pub advanced: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_round: Option<u32>,
    pub current_round: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    pub season_complete: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Progress {
    pub fixtures_played: usize,
    pub total_fixtures: usize,
    /// One decimal place
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundStatus {
    pub round: u32,
    pub fixtures_played: usize,
    pub total_fixtures: usize,
    pub complete: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SeasonStatus {
    pub season_id: SeasonId,
    pub year: i32,
    pub tier: Tier,
    pub current_round: u32,
    pub total_rounds: u32,
    pub is_active: bool,
    pub progress: Progress,
    pub current_round_status: RoundStatus,
    pub all_fixtures_played: bool,
    /// `current_round > total_rounds`
    pub season_complete: bool,
}

/// Promotion and relegation zones for a league year
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ZoneReport {
    pub year: i32,
    pub upper_season_id: SeasonId,
    pub lower_season_id: SeasonId,
    #[serde(flatten)]
    pub zones: PromotionRelegation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierMove {
    Promoted,
    Relegated,
}

/// One club's change of tier at season end
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierChange {
    pub club_id: ClubId,
    pub club_name: String,
    pub change: TierMove,
    pub from_tier: Tier,
    pub to_tier: Tier,
    pub final_position: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RolloverReport {
    pub upper_season_id: SeasonId,
    pub lower_season_id: SeasonId,
    pub changes: Vec<TierChange>,
    pub clubs_relegated: usize,
    pub clubs_promoted: usize,
}

/// Fixtures of one round, in id order
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RoundFixtures {
    pub season_id: SeasonId,
    pub round: u32,
    pub fixtures: Vec<Fixture>,
}

// ============================================================================
// GAME STATUS
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    Active,
    NoActiveSeasons,
}

/// What can be done next with the active seasons
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum NextAction {
    GenerateFixtures {
        season_id: SeasonId,
        description: String,
    },
    SimulateRound {
        season_id: SeasonId,
        round: u32,
        description: String,
    },
    AdvanceRound {
        season_id: SeasonId,
        description: String,
    },
    EndSeason {
        season_id: SeasonId,
        description: String,
    },
    ProcessPromotionRelegation {
        upper_season_id: SeasonId,
        lower_season_id: SeasonId,
        description: String,
    },
}

impl NextAction {
    pub fn description(&self) -> &str {
        match self {
            NextAction::GenerateFixtures { description, .. }
            | NextAction::SimulateRound { description, .. }
            | NextAction::AdvanceRound { description, .. }
            | NextAction::EndSeason { description, .. }
            | NextAction::ProcessPromotionRelegation { description, .. } => description,
        }
    }
}

/// Overview of every active season, split by tier
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameStatus {
    pub state: GameState,
    pub total_active_seasons: usize,
    pub upper_seasons: Vec<SeasonStatus>,
    pub lower_seasons: Vec<SeasonStatus>,
    pub next_actions: Vec<NextAction>,
}

// ============================================================================
// CLUB FORM
// ============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchOutcome {
    Win,
    Loss,
    Draw,
}

impl MatchOutcome {
    pub fn from_scores(points_for: u32, points_against: u32) -> Self {
        match points_for.cmp(&points_against) {
            std::cmp::Ordering::Greater => MatchOutcome::Win,
            std::cmp::Ordering::Less => MatchOutcome::Loss,
            std::cmp::Ordering::Equal => MatchOutcome::Draw,
        }
    }

    pub fn letter(self) -> char {
        match self {
            MatchOutcome::Win => 'W',
            MatchOutcome::Loss => 'L',
            MatchOutcome::Draw => 'D',
        }
    }
}

/// A played fixture from one club's side
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentResult {
    pub fixture_id: FixtureId,
    pub season_id: SeasonId,
    pub round: u32,
    pub opponent_id: ClubId,
    pub opponent_name: String,
    pub at_home: bool,
    pub points_for: u32,
    pub points_against: u32,
    pub outcome: MatchOutcome,
}

/// A club's current strength and recent results
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ClubForm {
    pub club_id: ClubId,
    pub club_name: String,
    pub tier: Tier,
    /// Ratings of the lineup the club would field today
    pub ratings: TeamRatings,
    /// Word rating of the overall rating
    pub form_rating: String,
    pub key_players: Vec<KeyPlayer>,
    pub squad_size: usize,
    /// Injured or suspended players
    pub unavailable: usize,
    /// Oldest first
    pub recent_results: Vec<RecentResult>,
    /// One letter per recent result, oldest first
    pub recent_form: String,
    /// Position on the ladder of the club's latest active season in its tier
    pub ladder_position: Option<usize>,
}
