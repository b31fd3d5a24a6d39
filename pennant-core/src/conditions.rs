//! Weather and ground conditions
//!
//! Each condition maps to a fixed table of multipliers over attribute
//! categories. The multipliers are applied to every lineup player's
//! attributes before group ratings are rolled up.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::player::Attributes;

/// Match-day conditions
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Conditions {
    #[default]
    Ideal,
    Windy,
    Wet,
    Hot,
    Cold,
}

/// Multipliers over attribute categories
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConditionEffects {
    pub kicking: f64,
    pub marking: f64,
    pub endurance: f64,
    pub speed: f64,
    pub decision_making: f64,
}

const NEUTRAL: ConditionEffects = ConditionEffects {
    kicking: 1.0,
    marking: 1.0,
    endurance: 1.0,
    speed: 1.0,
    decision_making: 1.0,
};

const WINDY: ConditionEffects = ConditionEffects {
    kicking: 0.85,
    marking: 0.9,
    ..NEUTRAL
};

const WET: ConditionEffects = ConditionEffects {
    kicking: 0.8,
    marking: 0.75,
    endurance: 0.95,
    speed: 0.9,
    ..NEUTRAL
};

const HOT: ConditionEffects = ConditionEffects {
    endurance: 0.85,
    speed: 0.95,
    decision_making: 0.9,
    ..NEUTRAL
};

const COLD: ConditionEffects = ConditionEffects {
    endurance: 1.05,
    kicking: 0.95,
    ..NEUTRAL
};

impl Conditions {
    pub const ALL: [Conditions; 5] = [
        Conditions::Ideal,
        Conditions::Windy,
        Conditions::Wet,
        Conditions::Hot,
        Conditions::Cold,
    ];

    pub fn effects(self) -> &'static ConditionEffects {
        match self {
            Conditions::Ideal => &NEUTRAL,
            Conditions::Windy => &WINDY,
            Conditions::Wet => &WET,
            Conditions::Hot => &HOT,
            Conditions::Cold => &COLD,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Conditions::Ideal => "ideal",
            Conditions::Windy => "windy",
            Conditions::Wet => "wet",
            Conditions::Hot => "hot",
            Conditions::Cold => "cold",
        }
    }
}

impl fmt::Display for Conditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Conditions {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Conditions::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown conditions '{}' (expected ideal, windy, wet, hot or cold)", s))
    }
}

/// Attributes after condition multipliers, as floats
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EffectiveAttributes {
    pub kicking: f64,
    pub handball: f64,
    pub marking: f64,
    pub spoiling: f64,
    pub ruck_work: f64,
    pub speed: f64,
    pub endurance: f64,
    pub strength: f64,
    pub decision_making: f64,
    pub leadership: f64,
    pub composure: f64,
}

impl ConditionEffects {
    pub fn apply(&self, a: &Attributes) -> EffectiveAttributes {
        EffectiveAttributes {
            kicking: a.kicking as f64 * self.kicking,
            handball: a.handball as f64,
            marking: a.marking as f64 * self.marking,
            spoiling: a.spoiling as f64,
            ruck_work: a.ruck_work as f64,
            speed: a.speed as f64 * self.speed,
            endurance: a.endurance as f64 * self.endurance,
            strength: a.strength as f64,
            decision_making: a.decision_making as f64 * self.decision_making,
            leadership: a.leadership as f64,
            composure: a.composure as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ideal_is_neutral() {
        let attrs = Attributes::uniform(80);
        let eff = Conditions::Ideal.effects().apply(&attrs);
        assert_eq!(eff.kicking, 80.0);
        assert_eq!(eff.endurance, 80.0);
        assert_eq!(eff.decision_making, 80.0);
    }

    #[test]
    fn test_wet_reduces_kicking_marking_speed() {
        let attrs = Attributes::uniform(80);
        let eff = Conditions::Wet.effects().apply(&attrs);
        assert!(eff.kicking < 80.0);
        assert!(eff.marking < 80.0);
        assert!(eff.speed < 80.0);
        assert_eq!(eff.handball, 80.0);
        assert_eq!(eff.strength, 80.0);
    }

    #[test]
    fn test_hot_reduces_endurance_speed_decisions() {
        let eff = Conditions::Hot.effects();
        assert!(eff.endurance < 1.0);
        assert!(eff.speed < 1.0);
        assert!(eff.decision_making < 1.0);
        assert_eq!(eff.kicking, 1.0);
    }

    #[test]
    fn test_cold_boosts_endurance() {
        assert!(Conditions::Cold.effects().endurance > 1.0);
    }

    #[test]
    fn test_parse_conditions() {
        assert_eq!("wet".parse::<Conditions>(), Ok(Conditions::Wet));
        assert_eq!("WINDY".parse::<Conditions>(), Ok(Conditions::Windy));
        assert!("snow".parse::<Conditions>().is_err());
        assert_eq!(Conditions::Hot.to_string(), "hot");
    }
}
