//! League configuration
//!
//! Level 4 - Utilities and configuration

use pennant_core::schedule::DEFAULT_RIVALRIES;
use pennant_core::{Conditions, ScheduleFormat, Tier};

/// Upper-tier home-and-away season length
pub const UPPER_ROUNDS: u32 = 22;
/// Lower-tier season length
pub const LOWER_ROUNDS: u32 = 20;

/// Configuration for a `SeasonController`
#[derive(Clone, Debug)]
pub struct LeagueConfig {
    /// Rounds in a new upper-tier season
    pub upper_rounds: u32,
    /// Rounds in a new lower-tier season
    pub lower_rounds: u32,
    /// Base random seed (None = drawn once when the controller is built)
    pub seed: Option<u64>,
    /// Simulate the matches of a round in parallel
    pub parallel: bool,
    /// Conditions every simulated match is played in
    pub conditions: Conditions,
    /// Rival pairs by club name, scheduled first in extra rounds
    pub rivalries: Vec<(String, String)>,
}

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            upper_rounds: UPPER_ROUNDS,
            lower_rounds: LOWER_ROUNDS,
            seed: None,
            parallel: true,
            conditions: Conditions::Ideal,
            rivalries: DEFAULT_RIVALRIES
                .iter()
                .map(|&(a, b)| (a.to_string(), b.to_string()))
                .collect(),
        }
    }
}

impl LeagueConfig {
    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_rounds(mut self, upper: u32, lower: u32) -> Self {
        self.upper_rounds = upper;
        self.lower_rounds = lower;
        self
    }

    pub fn with_conditions(mut self, conditions: Conditions) -> Self {
        self.conditions = conditions;
        self
    }

    pub fn with_rivalries(mut self, rivalries: Vec<(String, String)>) -> Self {
        self.rivalries = rivalries;
        self
    }

    /// Run round simulation on the calling thread
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }

    /// Configured season length for a tier
    pub fn rounds_for(&self, tier: Tier) -> u32 {
        match tier {
            Tier::Upper => self.upper_rounds,
            Tier::Lower => self.lower_rounds,
        }
    }

    /// The upper tier pads its cycle with extra rounds, the lower tier repeats it
    pub fn format_for(&self, tier: Tier) -> ScheduleFormat {
        match tier {
            Tier::Upper => ScheduleFormat::CycleWithExtras,
            Tier::Lower => ScheduleFormat::Cycles,
        }
    }
}

/// Seed for the match played in a fixture
pub fn fixture_seed(base: u64, fixture_id: u32) -> u64 {
    base.wrapping_add(fixture_id as u64)
}

/// Seed for a season's schedule
pub fn schedule_seed(base: u64, season_id: u32) -> u64 {
    base.rotate_left(32).wrapping_add(season_id as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = LeagueConfig::default();
        assert_eq!(config.rounds_for(Tier::Upper), 22);
        assert_eq!(config.rounds_for(Tier::Lower), 20);
        assert!(config.parallel);
        assert!(config.seed.is_none());
        assert_eq!(config.rivalries.len(), DEFAULT_RIVALRIES.len());
    }

    #[test]
    fn test_config_builders() {
        let config = LeagueConfig::default()
            .with_seed(7)
            .with_rounds(10, 8)
            .with_conditions(Conditions::Wet)
            .sequential();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.rounds_for(Tier::Upper), 10);
        assert_eq!(config.rounds_for(Tier::Lower), 8);
        assert_eq!(config.conditions, Conditions::Wet);
        assert!(!config.parallel);
    }

    #[test]
    fn test_seeds_differ_per_fixture() {
        assert_ne!(fixture_seed(42, 1), fixture_seed(42, 2));
        assert_eq!(fixture_seed(u64::MAX, 1), 0);
        assert_ne!(schedule_seed(42, 1), fixture_seed(42, 1));
    }
}
