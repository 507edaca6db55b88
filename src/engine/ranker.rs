use std::cmp::Ordering;

use crate::models::{LeaderboardEntry, Rarity};

/// Anything that can be placed on the leaderboard.
pub trait Ranked {
    /// Rarity of the latest creature, `None` when the trainer has none.
    fn rarity(&self) -> Option<Rarity>;
    fn power_score(&self) -> i64;
}

impl Ranked for LeaderboardEntry {
    fn rarity(&self) -> Option<Rarity> {
        self.latest_creature
            .as_ref()
            .and_then(|c| Rarity::from_label(&c.rarity))
    }

    fn power_score(&self) -> i64 {
        self.power_score
    }
}

/// 0 for trainers without a (recognised) creature.
pub fn rarity_weight(rarity: Option<Rarity>) -> u8 {
    rarity.map_or(0, |r| r.weight())
}

fn compare<T: Ranked>(a: &T, b: &T) -> Ordering {
    rarity_weight(b.rarity())
        .cmp(&rarity_weight(a.rarity()))
        .then_with(|| b.power_score().cmp(&a.power_score()))
}

/// Sort by rarity weight desc, then power score desc.
///
/// The sort is stable: entries equal on both keys keep their input order.
pub fn rank<T: Ranked>(entries: &mut [T]) {
    entries.sort_by(compare);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        tag: &'static str,
        rarity: Option<Rarity>,
        score: i64,
    }

    impl Ranked for Row {
        fn rarity(&self) -> Option<Rarity> {
            self.rarity
        }

        fn power_score(&self) -> i64 {
            self.score
        }
    }

    fn row(tag: &'static str, rarity: Option<Rarity>, score: i64) -> Row {
        Row { tag, rarity, score }
    }

    fn tags(rows: &[Row]) -> Vec<&'static str> {
        rows.iter().map(|r| r.tag).collect()
    }

    #[test]
    fn test_rarity_beats_score() {
        let mut rows = vec![
            row("common", Some(Rarity::Common), 9999),
            row("rare", Some(Rarity::Rare), 900),
        ];
        rank(&mut rows);
        assert_eq!(tags(&rows), vec!["rare", "common"]);
    }

    #[test]
    fn test_score_breaks_rarity_ties() {
        let mut rows = vec![
            row("low", Some(Rarity::Epic), 100),
            row("high", Some(Rarity::Epic), 500),
            row("legend", Some(Rarity::Legendary), 1),
        ];
        rank(&mut rows);
        assert_eq!(tags(&rows), vec!["legend", "high", "low"]);
    }

    #[test]
    fn test_no_creature_ranks_last() {
        let mut rows = vec![
            row("none", None, 50_000),
            row("common", Some(Rarity::Common), 0),
        ];
        rank(&mut rows);
        assert_eq!(tags(&rows), vec!["common", "none"]);
    }

    #[test]
    fn test_full_ties_keep_input_order() {
        let mut rows = vec![
            row("a", Some(Rarity::Rare), 300),
            row("b", Some(Rarity::Rare), 300),
            row("c", Some(Rarity::Rare), 300),
        ];
        rank(&mut rows);
        assert_eq!(tags(&rows), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_unknown_stored_rarity_weighs_zero() {
        use crate::models::CreatureSummary;
        use uuid::Uuid;

        let entry = LeaderboardEntry {
            id: Uuid::new_v4(),
            wallet_address: "0xabc".into(),
            resolved_name: None,
            power_score: 10,
            nft_count: 0,
            tx_count: 5,
            chain: "base".into(),
            latest_creature: Some(CreatureSummary {
                name: "Odd".into(),
                rarity: "Mythic".into(),
                creature_type: "Fire".into(),
                image_url: String::new(),
            }),
        };
        assert_eq!(rarity_weight(entry.rarity()), 0);
    }
}
