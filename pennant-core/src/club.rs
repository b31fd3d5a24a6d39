//! Clubs and competition tiers

use serde::{Deserialize, Serialize};

pub type ClubId = u32;

/// Competitive division
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tier {
    /// Top flight
    Upper,
    /// Second flight
    Lower,
}

impl Tier {
    pub fn counterpart(self) -> Self {
        match self {
            Tier::Upper => Tier::Lower,
            Tier::Lower => Tier::Upper,
        }
    }
}

/// A club. Tier is only changed by end-of-season processing.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Club {
    pub id: ClubId,
    pub name: String,
    #[serde(default)]
    pub nickname: String,
    pub tier: Tier,
    #[serde(default)]
    pub primary_colour: String,
    #[serde(default)]
    pub secondary_colour: Option<String>,
}

impl Club {
    pub fn new(id: ClubId, name: &str, tier: Tier) -> Self {
        Self {
            id,
            name: name.to_string(),
            nickname: String::new(),
            tier,
            primary_colour: String::new(),
            secondary_colour: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_counterpart() {
        assert_eq!(Tier::Upper.counterpart(), Tier::Lower);
        assert_eq!(Tier::Lower.counterpart(), Tier::Upper);
    }
}
