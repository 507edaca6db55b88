use serde::Serialize;

use crate::models::{CreatureType, Rarity};

/// Per-type multipliers applied to each stat roll.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StatWeights {
    pub attack: f64,
    pub defense: f64,
    pub speed: f64,
    pub wisdom: f64,
    pub luck: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeEntry {
    #[serde(rename = "type")]
    pub kind: CreatureType,
    pub description: &'static str,
    pub stat_weights: StatWeights,
}

const fn weights(attack: f64, defense: f64, speed: f64, wisdom: f64, luck: f64) -> StatWeights {
    StatWeights {
        attack,
        defense,
        speed,
        wisdom,
        luck,
    }
}

/// Static creature catalog, indexed in `CreatureType::ALL` order.
pub const CATALOG: [TypeEntry; 11] = [
    TypeEntry {
        kind: CreatureType::Fire,
        description: "Bold, aggressive, high attack - for active traders",
        stat_weights: weights(1.5, 0.8, 1.2, 0.7, 1.0),
    },
    TypeEntry {
        kind: CreatureType::Water,
        description: "Adaptive, balanced, defensive - for hodlers",
        stat_weights: weights(1.0, 1.3, 1.0, 1.1, 0.9),
    },
    TypeEntry {
        kind: CreatureType::Electric,
        description: "Fast, energetic, high speed - for frequent transactors",
        stat_weights: weights(1.1, 0.9, 1.6, 0.8, 1.2),
    },
    TypeEntry {
        kind: CreatureType::Psychic,
        description: "Strategic, high wisdom, low speed - for NFT collectors",
        stat_weights: weights(0.8, 1.0, 0.7, 1.6, 1.1),
    },
    TypeEntry {
        kind: CreatureType::Dark,
        description: "Mysterious, balanced power - for DeFi users",
        stat_weights: weights(1.2, 1.1, 1.0, 1.3, 0.8),
    },
    TypeEntry {
        kind: CreatureType::Steel,
        description: "Defensive, resilient - for long-term holders",
        stat_weights: weights(0.9, 1.5, 0.7, 1.2, 1.0),
    },
    TypeEntry {
        kind: CreatureType::Dragon,
        description: "Powerful, legendary - for whales and high-value wallets",
        stat_weights: weights(1.4, 1.3, 1.2, 1.4, 1.5),
    },
    TypeEntry {
        kind: CreatureType::Ghost,
        description: "Elusive, luck-based - for new or inactive wallets",
        stat_weights: weights(0.7, 0.8, 1.1, 0.9, 1.6),
    },
    TypeEntry {
        kind: CreatureType::Grass,
        description: "Growth-oriented, steady - for consistent transactors",
        stat_weights: weights(1.1, 1.2, 0.9, 1.1, 1.0),
    },
    TypeEntry {
        kind: CreatureType::Ice,
        description: "Cold storage, preserved value - for dormant whales",
        stat_weights: weights(1.3, 1.4, 0.8, 1.2, 0.9),
    },
    TypeEntry {
        kind: CreatureType::Rock,
        description: "Solid, unshakeable foundation - for long history wallets",
        stat_weights: weights(1.0, 1.6, 0.6, 1.0, 1.1),
    },
];

/// Minimum power score per tier from the earlier score-driven rarity design.
///
/// Published as reference data only. Generation rolls rarity uniformly at
/// random and never consults this table.
pub const SCORE_RARITY_THRESHOLDS: [(Rarity, i64); 4] = [
    (Rarity::Legendary, 5000),
    (Rarity::Epic, 2000),
    (Rarity::Rare, 500),
    (Rarity::Common, 0),
];

pub fn type_entry(kind: CreatureType) -> &'static TypeEntry {
    &CATALOG[kind as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order_matches_enum() {
        for (i, kind) in CreatureType::ALL.iter().enumerate() {
            assert_eq!(CATALOG[i].kind, *kind);
            assert_eq!(type_entry(*kind).kind, *kind);
        }
    }

    #[test]
    fn test_rock_weights() {
        let rock = type_entry(CreatureType::Rock);
        assert_eq!(rock.stat_weights.defense, 1.6);
        assert_eq!(rock.stat_weights.speed, 0.6);
    }
}
