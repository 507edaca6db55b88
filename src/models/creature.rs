use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Rarity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

impl Rarity {
    pub const ALL: [Rarity; 4] = [Rarity::Common, Rarity::Rare, Rarity::Epic, Rarity::Legendary];

    pub fn as_str(&self) -> &'static str {
        match self {
            Rarity::Common => "Common",
            Rarity::Rare => "Rare",
            Rarity::Epic => "Epic",
            Rarity::Legendary => "Legendary",
        }
    }

    /// Parse a stored rarity label. Unknown labels yield `None`.
    pub fn from_label(s: &str) -> Option<Self> {
        Rarity::ALL.into_iter().find(|r| r.as_str() == s)
    }

    /// Leaderboard weight: Legendary=4 down to Common=1.
    pub fn weight(&self) -> u8 {
        match self {
            Rarity::Common => 1,
            Rarity::Rare => 2,
            Rarity::Epic => 3,
            Rarity::Legendary => 4,
        }
    }

    /// Scales every stat roll for a creature of this tier.
    pub fn stat_multiplier(&self) -> f64 {
        match self {
            Rarity::Common => 0.8,
            Rarity::Rare => 1.0,
            Rarity::Epic => 1.2,
            Rarity::Legendary => 1.5,
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// CreatureType
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CreatureType {
    Fire,
    Water,
    Electric,
    Psychic,
    Dark,
    Steel,
    Dragon,
    Ghost,
    Grass,
    Ice,
    Rock,
}

impl CreatureType {
    pub const ALL: [CreatureType; 11] = [
        CreatureType::Fire,
        CreatureType::Water,
        CreatureType::Electric,
        CreatureType::Psychic,
        CreatureType::Dark,
        CreatureType::Steel,
        CreatureType::Dragon,
        CreatureType::Ghost,
        CreatureType::Grass,
        CreatureType::Ice,
        CreatureType::Rock,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CreatureType::Fire => "Fire",
            CreatureType::Water => "Water",
            CreatureType::Electric => "Electric",
            CreatureType::Psychic => "Psychic",
            CreatureType::Dark => "Dark",
            CreatureType::Steel => "Steel",
            CreatureType::Dragon => "Dragon",
            CreatureType::Ghost => "Ghost",
            CreatureType::Grass => "Grass",
            CreatureType::Ice => "Ice",
            CreatureType::Rock => "Rock",
        }
    }
}

impl fmt::Display for CreatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Attacker,
    Defender,
    Speedster,
    Strategist,
    Balanced,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Attacker => "Attacker",
            Role::Defender => "Defender",
            Role::Speedster => "Speedster",
            Role::Strategist => "Strategist",
            Role::Balanced => "Balanced",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Generated creature
// ---------------------------------------------------------------------------

/// Five battle stats, each in [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatureStats {
    pub attack: u8,
    pub defense: u8,
    pub speed: u8,
    pub wisdom: u8,
    pub luck: u8,
}

impl CreatureStats {
    pub const MAX: u8 = 100;

    /// False when any stat exceeds [`CreatureStats::MAX`]. Client-supplied
    /// creatures can carry any `u8`.
    pub fn in_range(&self) -> bool {
        [self.attack, self.defense, self.speed, self.wisdom, self.luck]
            .iter()
            .all(|&v| v <= Self::MAX)
    }
}

/// Name and flavor text attached to a creature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lore {
    pub name: String,
    pub flavor_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssignedCreature {
    pub name: String,
    #[serde(rename = "type")]
    pub creature_type: CreatureType,
    pub role: Role,
    pub rarity: Rarity,
    pub stats: CreatureStats,
    pub flavor_text: String,
    pub image_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_range() {
        let mut stats = CreatureStats {
            attack: 100,
            defense: 0,
            speed: 55,
            wisdom: 100,
            luck: 1,
        };
        assert!(stats.in_range());

        stats.luck = 101;
        assert!(!stats.in_range());
    }
}
