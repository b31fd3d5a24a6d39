//! Players, positions and attribute-based overall rating

use serde::{Deserialize, Serialize};

use crate::club::ClubId;
use crate::error::{LeagueError, Result};

pub type PlayerId = u32;

/// Attribute ceiling (all eleven attributes live in [0, ATTRIBUTE_MAX])
pub const ATTRIBUTE_MAX: u8 = 100;

/// Morale bounds
pub const MORALE_MIN: i8 = -5;
pub const MORALE_MAX: i8 = 5;

/// Potential bounds
pub const POTENTIAL_MIN: u8 = 50;
pub const POTENTIAL_MAX: u8 = 100;

/// On-field role
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    KeyForward,
    SmallForward,
    Midfielder,
    HalfBack,
    KeyBack,
    Ruck,
    Utility,
}

impl Position {
    pub const ALL: [Position; 7] = [
        Position::KeyForward,
        Position::SmallForward,
        Position::Midfielder,
        Position::HalfBack,
        Position::KeyBack,
        Position::Ruck,
        Position::Utility,
    ];

    pub fn is_forward(self) -> bool {
        matches!(self, Position::KeyForward | Position::SmallForward)
    }

    pub fn is_defender(self) -> bool {
        matches!(self, Position::HalfBack | Position::KeyBack)
    }
}

/// The eleven rated attributes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    // Technical
    pub kicking: u8,
    pub handball: u8,
    pub marking: u8,
    pub spoiling: u8,
    pub ruck_work: u8,
    // Physical
    pub speed: u8,
    pub endurance: u8,
    pub strength: u8,
    // Mental
    pub decision_making: u8,
    pub leadership: u8,
    pub composure: u8,
}

impl Attributes {
    /// Every attribute set to the same value
    pub const fn uniform(value: u8) -> Self {
        Self {
            kicking: value,
            handball: value,
            marking: value,
            spoiling: value,
            ruck_work: value,
            speed: value,
            endurance: value,
            strength: value,
            decision_making: value,
            leadership: value,
            composure: value,
        }
    }

    pub fn technical_avg(&self) -> f64 {
        (self.kicking as f64
            + self.handball as f64
            + self.marking as f64
            + self.spoiling as f64
            + self.ruck_work as f64)
            / 5.0
    }

    pub fn physical_avg(&self) -> f64 {
        (self.speed as f64 + self.endurance as f64 + self.strength as f64) / 3.0
    }

    pub fn mental_avg(&self) -> f64 {
        (self.decision_making as f64 + self.leadership as f64 + self.composure as f64) / 3.0
    }

    fn named(&self) -> [(&'static str, u8); 11] {
        [
            ("kicking", self.kicking),
            ("handball", self.handball),
            ("marking", self.marking),
            ("spoiling", self.spoiling),
            ("ruck_work", self.ruck_work),
            ("speed", self.speed),
            ("endurance", self.endurance),
            ("strength", self.strength),
            ("decision_making", self.decision_making),
            ("leadership", self.leadership),
            ("composure", self.composure),
        ]
    }
}

/// A listed player
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub club_id: ClubId,
    pub name: String,
    pub position: Position,
    pub age: u8,
    pub attributes: Attributes,
    /// Hidden growth ceiling, [50, 100]
    pub potential: u8,
    /// [-5, 5]
    #[serde(default)]
    pub morale: i8,
    #[serde(default)]
    pub injured: bool,
    #[serde(default)]
    pub suspended: bool,
}

impl Player {
    /// Available for selection (neither injured nor suspended)
    pub fn is_eligible(&self) -> bool {
        !self.injured && !self.suspended
    }

    /// Overall rating used to rank players for lineup selection
    ///
    /// Technical/physical/mental group averages blended 50/30/20, scaled by
    /// the age curve and by 2% per morale point.
    pub fn overall_rating(&self) -> f64 {
        let a = &self.attributes;
        let base = a.technical_avg() * 0.5 + a.physical_avg() * 0.3 + a.mental_avg() * 0.2;
        base * age_performance_factor(self.age) * morale_factor(self.morale)
    }

    /// Check attribute, morale and potential bounds
    pub fn validate(&self) -> Result<()> {
        for (name, value) in self.attributes.named() {
            if value > ATTRIBUTE_MAX {
                return Err(LeagueError::engine(format!(
                    "player {} ({}) has {} = {} (max {})",
                    self.id, self.name, name, value, ATTRIBUTE_MAX
                )));
            }
        }
        if !(MORALE_MIN..=MORALE_MAX).contains(&self.morale) {
            return Err(LeagueError::engine(format!(
                "player {} ({}) has morale {} outside [{}, {}]",
                self.id, self.name, self.morale, MORALE_MIN, MORALE_MAX
            )));
        }
        if !(POTENTIAL_MIN..=POTENTIAL_MAX).contains(&self.potential) {
            return Err(LeagueError::engine(format!(
                "player {} ({}) has potential {} outside [{}, {}]",
                self.id, self.name, self.potential, POTENTIAL_MIN, POTENTIAL_MAX
            )));
        }
        Ok(())
    }
}

/// Age performance multiplier: sub-peak under 20, peak 25-27, decline after 30
pub fn age_performance_factor(age: u8) -> f64 {
    let age = age as f64;
    let factor = if age <= 20.0 {
        0.85 + (age - 18.0) * 0.05
    } else if age <= 27.0 {
        0.95 + (age - 20.0) * 0.0143
    } else if age <= 30.0 {
        1.05 - (age - 27.0) * 0.02
    } else {
        0.99 - (age - 30.0) * 0.04
    };
    factor.max(0.0)
}

/// +/-2% per morale point
pub fn morale_factor(morale: i8) -> f64 {
    1.0 + morale as f64 * 0.02
}
