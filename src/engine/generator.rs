use rand::Rng;

use crate::engine::catalog::type_entry;
use crate::models::{
    AssignedCreature, CreatureStats, CreatureType, Lore, Rarity, Role, TokenBalance, WalletProfile,
};

/// Real-world-asset token symbols that force a Rock creature.
pub const RWA_WATCHLIST: [&str; 5] = ["COLL", "BEEZ", "RWA", "COLLECTOR", "REAL"];

/// Types eligible for the uniform draw. Rock is reserved for RWA holders.
const RANDOM_TYPES: [CreatureType; 10] = [
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
];

/// Stat threshold above which a creature earns a specialist role.
const ROLE_THRESHOLD: u8 = 80;

const ROBOHASH_BASE: &str = "https://robohash.org";

/// Everything about a creature except its name and flavor text.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreatureDraft {
    pub kind: CreatureType,
    pub rarity: Rarity,
    pub stats: CreatureStats,
    pub role: Role,
}

impl CreatureDraft {
    /// Attach lore and derive the image reference.
    pub fn finish(self, lore: Lore) -> AssignedCreature {
        let image_url = image_url(&lore.name);
        AssignedCreature {
            name: lore.name,
            creature_type: self.kind,
            role: self.role,
            rarity: self.rarity,
            stats: self.stats,
            flavor_text: lore.flavor_text,
            image_url,
        }
    }
}

/// Roll rarity, type, stats and role for a wallet.
///
/// Rarity and type are independent of the power score.
pub fn draft_creature<R: Rng + ?Sized>(profile: &WalletProfile, rng: &mut R) -> CreatureDraft {
    let rarity = roll_rarity(rng);
    let kind = select_type(&profile.erc20_balances, rng);
    let stats = roll_stats(kind, rarity, rng);
    let role = derive_role(&stats);

    CreatureDraft {
        kind,
        rarity,
        stats,
        role,
    }
}

// ---------------------------------------------------------------------------
// Rarity
// ---------------------------------------------------------------------------

pub fn roll_rarity<R: Rng + ?Sized>(rng: &mut R) -> Rarity {
    rarity_for_roll(rng.gen::<f64>())
}

/// Map a uniform draw in [0, 1) to a tier: 50% / 30% / 15% / 5%.
pub fn rarity_for_roll(roll: f64) -> Rarity {
    if roll > 0.95 {
        Rarity::Legendary
    } else if roll > 0.80 {
        Rarity::Epic
    } else if roll > 0.50 {
        Rarity::Rare
    } else {
        Rarity::Common
    }
}

// ---------------------------------------------------------------------------
// Type
// ---------------------------------------------------------------------------

pub fn holds_rwa_token(balances: &[TokenBalance]) -> bool {
    balances.iter().any(|token| {
        let symbol = token.symbol.to_uppercase();
        RWA_WATCHLIST.contains(&symbol.as_str())
    })
}

pub fn select_type<R: Rng + ?Sized>(balances: &[TokenBalance], rng: &mut R) -> CreatureType {
    if holds_rwa_token(balances) {
        return CreatureType::Rock;
    }
    RANDOM_TYPES[rng.gen_range(0..RANDOM_TYPES.len())]
}

// ---------------------------------------------------------------------------
// Stats & role
// ---------------------------------------------------------------------------

/// Draw all five stats. Each stat gets its own factor in [0.5, 1.0),
/// drawn in attack, defense, speed, wisdom, luck order.
pub fn roll_stats<R: Rng + ?Sized>(kind: CreatureType, rarity: Rarity, rng: &mut R) -> CreatureStats {
    let w = type_entry(kind).stat_weights;
    let m = rarity.stat_multiplier();

    CreatureStats {
        attack: stat_value(w.attack, rng.gen_range(0.5..1.0), m),
        defense: stat_value(w.defense, rng.gen_range(0.5..1.0), m),
        speed: stat_value(w.speed, rng.gen_range(0.5..1.0), m),
        wisdom: stat_value(w.wisdom, rng.gen_range(0.5..1.0), m),
        luck: stat_value(w.luck, rng.gen_range(0.5..1.0), m),
    }
}

/// `clamp(0, 100, floor(weight * factor * multiplier * 50))`
pub fn stat_value(weight: f64, factor: f64, multiplier: f64) -> u8 {
    (weight * factor * multiplier * 50.0).floor().clamp(0.0, 100.0) as u8
}

/// First stat above the threshold wins, checked attack → defense → speed → wisdom.
pub fn derive_role(stats: &CreatureStats) -> Role {
    if stats.attack > ROLE_THRESHOLD {
        Role::Attacker
    } else if stats.defense > ROLE_THRESHOLD {
        Role::Defender
    } else if stats.speed > ROLE_THRESHOLD {
        Role::Speedster
    } else if stats.wisdom > ROLE_THRESHOLD {
        Role::Strategist
    } else {
        Role::Balanced
    }
}

// ---------------------------------------------------------------------------
// Deterministic lore & image
// ---------------------------------------------------------------------------

pub fn fallback_name(rarity: Rarity, kind: CreatureType) -> String {
    format!("{rarity} {kind}mon")
}

pub fn fallback_lore(rarity: Rarity, kind: CreatureType, chain: &str) -> Lore {
    Lore {
        name: fallback_name(rarity, kind),
        flavor_text: format!(
            "A {}-type creature from the {chain} realm.",
            rarity_type_phrase(rarity, kind)
        ),
    }
}

/// Flavor used when generated lore carries a name but no description.
pub fn short_flavor(rarity: Rarity, kind: CreatureType) -> String {
    format!("A {}-type creature.", rarity_type_phrase(rarity, kind))
}

fn rarity_type_phrase(rarity: Rarity, kind: CreatureType) -> String {
    format!(
        "{} {}",
        rarity.as_str().to_lowercase(),
        kind.as_str().to_lowercase()
    )
}

/// Avatar URL derived purely from the creature name.
pub fn image_url(name: &str) -> String {
    format!(
        "{ROBOHASH_BASE}/{}?set=set4&bgset=bg1",
        urlencoding::encode(name)
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn profile_with_tokens(symbols: &[&str]) -> WalletProfile {
        WalletProfile {
            wallet_address: "0xabc".into(),
            chain: "base".into(),
            resolved_name: None,
            native_balance: "0.0".into(),
            native_balance_usd: 0.0,
            token_value_usd: 0.0,
            nft_count: 0,
            tx_count: 0,
            erc20_balances: symbols
                .iter()
                .map(|s| TokenBalance {
                    symbol: s.to_string(),
                    balance: "1.0".into(),
                    value_usd: 10.0,
                })
                .collect(),
            power_score: 0,
            last_active_timestamp: 0,
        }
    }

    fn stats(attack: u8, defense: u8, speed: u8, wisdom: u8, luck: u8) -> CreatureStats {
        CreatureStats {
            attack,
            defense,
            speed,
            wisdom,
            luck,
        }
    }

    #[test]
    fn test_rarity_partition_boundaries() {
        assert_eq!(rarity_for_roll(0.0), Rarity::Common);
        assert_eq!(rarity_for_roll(0.50), Rarity::Common);
        assert_eq!(rarity_for_roll(0.51), Rarity::Rare);
        assert_eq!(rarity_for_roll(0.80), Rarity::Rare);
        assert_eq!(rarity_for_roll(0.81), Rarity::Epic);
        assert_eq!(rarity_for_roll(0.95), Rarity::Epic);
        assert_eq!(rarity_for_roll(0.951), Rarity::Legendary);
    }

    #[test]
    fn test_rarity_distribution() {
        let mut rng = StdRng::seed_from_u64(7);
        let trials = 100_000;
        let mut counts = [0usize; 4];
        for _ in 0..trials {
            let idx = match roll_rarity(&mut rng) {
                Rarity::Common => 0,
                Rarity::Rare => 1,
                Rarity::Epic => 2,
                Rarity::Legendary => 3,
            };
            counts[idx] += 1;
        }

        let expected = [0.50, 0.30, 0.15, 0.05];
        for (count, want) in counts.iter().zip(expected) {
            let share = *count as f64 / trials as f64;
            assert!((share - want).abs() < 0.01, "share {share} vs {want}");
        }
    }

    #[test]
    fn test_rwa_holder_is_always_rock() {
        let profile = profile_with_tokens(&["USDC", "beez"]);
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            assert_eq!(draft_creature(&profile, &mut rng).kind, CreatureType::Rock);
        }
    }

    #[test]
    fn test_every_watchlist_symbol_forces_rock() {
        let mut rng = StdRng::seed_from_u64(3);
        for symbol in RWA_WATCHLIST {
            let profile = profile_with_tokens(&[&symbol.to_lowercase()]);
            assert_eq!(select_type(&profile.erc20_balances, &mut rng), CreatureType::Rock);
        }
    }

    #[test]
    fn test_non_holder_never_rock() {
        let profile = profile_with_tokens(&["USDC", "WETH", "COLLX"]);
        let mut rng = StdRng::seed_from_u64(2);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..2_000 {
            let kind = select_type(&profile.erc20_balances, &mut rng);
            assert_ne!(kind, CreatureType::Rock);
            seen.insert(kind);
        }
        // Uniform over the ten remaining types
        assert_eq!(seen.len(), 10);
    }

    #[test]
    fn test_stats_always_within_bounds() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut hit_cap = false;
        for kind in CreatureType::ALL {
            for rarity in Rarity::ALL {
                for _ in 0..200 {
                    let s = roll_stats(kind, rarity, &mut rng);
                    for v in [s.attack, s.defense, s.speed, s.wisdom, s.luck] {
                        assert!(v <= 100);
                        hit_cap |= v == 100;
                    }
                }
            }
        }
        // Legendary Dragon luck (1.5 * 1.5 * 50 * f) passes 100 once f > 0.89
        assert!(hit_cap);
    }

    #[test]
    fn test_stat_value_formula() {
        // 1.5 * 0.75 * 1.2 * 50 = 67.5
        assert_eq!(stat_value(1.5, 0.75, 1.2), 67);
        assert_eq!(stat_value(1.6, 0.99, 1.5), 100);
        assert_eq!(stat_value(0.0, 0.5, 0.8), 0);
    }

    #[test]
    fn test_role_priority() {
        assert_eq!(derive_role(&stats(85, 90, 10, 10, 10)), Role::Attacker);
        assert_eq!(derive_role(&stats(80, 81, 95, 10, 10)), Role::Defender);
        assert_eq!(derive_role(&stats(10, 10, 81, 99, 10)), Role::Speedster);
        assert_eq!(derive_role(&stats(10, 10, 10, 81, 100)), Role::Strategist);
        assert_eq!(derive_role(&stats(80, 80, 80, 80, 100)), Role::Balanced);
    }

    #[test]
    fn test_fallback_lore_format() {
        let lore = fallback_lore(Rarity::Epic, CreatureType::Fire, "base");
        assert_eq!(lore.name, "Epic Firemon");
        assert_eq!(lore.flavor_text, "A epic fire-type creature from the base realm.");
        assert_eq!(
            short_flavor(Rarity::Legendary, CreatureType::Ice),
            "A legendary ice-type creature."
        );
    }

    #[test]
    fn test_image_url_is_pure_function_of_name() {
        assert_eq!(
            image_url("Epic Firemon"),
            "https://robohash.org/Epic%20Firemon?set=set4&bgset=bg1"
        );
        assert_eq!(image_url("Epic Firemon"), image_url("Epic Firemon"));
    }

    #[test]
    fn test_finish_attaches_lore() {
        let draft = CreatureDraft {
            kind: CreatureType::Water,
            rarity: Rarity::Rare,
            stats: stats(40, 50, 40, 45, 35),
            role: Role::Balanced,
        };
        let creature = draft.finish(Lore {
            name: "Tide Warden".into(),
            flavor_text: "Holds steady.".into(),
        });
        assert_eq!(creature.name, "Tide Warden");
        assert_eq!(creature.creature_type, CreatureType::Water);
        assert_eq!(creature.image_url, image_url("Tide Warden"));
    }
}
