//! Pennant Core - League model and season simulation engine
//!
//! This crate provides the pure, storage-free parts of a two-tier league:
//! - League model (clubs, players, seasons, fixtures)
//! - Fixture scheduling (circle-method round robin plus extra rounds)
//! - Match simulation (quarter-by-quarter, attribute weighted, seedable)
//! - Ladder standings, finals bracket and promotion/relegation zones
//!
//! Nothing here performs I/O. Randomness is always passed in by the caller.

pub mod error;
pub mod club;
pub mod player;
pub mod fixture;
pub mod conditions;
pub mod schedule;
pub mod ratings;
pub mod simulation;
pub mod ladder;

// Re-exports for convenient access
pub use error::{LeagueError, Result};
pub use club::{Club, ClubId, Tier};
pub use player::{Attributes, Player, PlayerId, Position};
pub use fixture::{
    Fixture, FixtureId, FixtureScore, MatchStat, ScheduledFixture, Season, SeasonId,
    BEHIND_POINTS, GOAL_POINTS, LINEUP_SIZE, QUARTERS,
};
pub use conditions::{ConditionEffects, Conditions};
pub use schedule::{generate_fixtures, resolve_rivalries, round_date, ScheduleFormat, ScheduleRequest};
pub use ratings::{form_description, key_players, select_lineup, KeyPlayer, KeyRole, TeamRatings};
pub use simulation::{
    simulate_match, MatchReport, MatchSide, MatchWinner, PlayerPerformance, QuarterSummary,
    TeamSide,
};
pub use ladder::{
    compute_ladder, finals_bracket, promotion_relegation, FinalPairing, FinalsBracket,
    LadderEntry, PromotionRelegation,
};
