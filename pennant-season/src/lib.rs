//! Pennant Season - Season lifecycle over a persistent league
//!
//! This crate drives the pure `pennant-core` engine against stored state:
//! - Season creation and fixture (re)generation
//! - Round and full-season simulation with automatic round progression
//! - Season status, ladders, finals and promotion/relegation zones
//! - End-of-season tier changes
//! - League overview with next actions, club form and player box scores
//!
//! ## Architecture (4-layer granularity)
//!
//! - Level 1: SeasonController (orchestration)
//! - Level 2: simulate_round, end_of_season, generate_fixtures (phases)
//! - Level 3: match jobs, status rollups (steps)
//! - Level 4: store collaborators, configuration, starter league

mod config;
mod controller;
mod demo;
mod outcome;
mod store;

pub use config::{fixture_seed, schedule_seed, LeagueConfig, LOWER_ROUNDS, UPPER_ROUNDS};
pub use controller::SeasonController;
pub use demo::demo_league;
pub use outcome::{
    AdvanceOutcome, ClubForm, FixtureResult, GameState, GameStatus, LeagueYear, MatchOutcome,
    NextAction, Progress, RecentResult, RolloverReport, RoundFixtures, RoundReport, RoundStatus,
    RoundSummary, SeasonCreated, SeasonReport, SeasonStatus, TierChange, TierMove, ZoneReport,
};
pub use store::{FixtureFilter, LeagueStore, MemoryStore, RecordedResult, RosterProvider};
