pub mod catalog;
pub mod generator;
pub mod ranker;
pub mod scorer;

pub use catalog::{type_entry, StatWeights, TypeEntry, CATALOG, SCORE_RARITY_THRESHOLDS};
pub use generator::{draft_creature, CreatureDraft};
pub use ranker::{rank, Ranked};
pub use scorer::{power_score, ScoreInputs};
