pub mod creature;
pub mod trainer;
pub mod wallet;

pub use creature::{AssignedCreature, CreatureStats, CreatureType, Lore, Rarity, Role};
pub use trainer::{
    Creature, CreatureSummary, CreatureWithOwner, LeaderboardEntry, LeaderboardRow, Trainer,
    TrainerProfile, TrainerUpsert,
};
pub use wallet::{TokenBalance, WalletProfile};
