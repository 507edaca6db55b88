use metrics::counter;
use sqlx::PgPool;

use crate::db::{creature_repo, trainer_repo};
use crate::engine::{draft_creature, CreatureDraft};
use crate::lore::{LoreWriter, TextGenerator};
use crate::models::{AssignedCreature, Creature, Trainer, TrainerUpsert, WalletProfile};

/// Roll a draft with the thread-local RNG. Kept synchronous so the RNG
/// never lives across an await point.
pub fn roll_draft(profile: &WalletProfile) -> CreatureDraft {
    let mut rng = rand::thread_rng();
    draft_creature(profile, &mut rng)
}

/// Generate a complete creature for a wallet profile.
///
/// Lore generation never fails the call; it degrades to deterministic lore.
pub async fn assign_creature<G: TextGenerator>(
    profile: &WalletProfile,
    lore: &LoreWriter<G>,
) -> AssignedCreature {
    let draft = roll_draft(profile);
    let outcome = lore.write(profile, &draft).await;

    if let Some(reason) = outcome.fallback_reason() {
        counter!("lore_fallbacks_total", "reason" => reason.as_str()).increment(1);
    }
    counter!("creatures_generated_total", "rarity" => draft.rarity.as_str()).increment(1);

    let creature = draft.finish(outcome.into_lore());
    tracing::info!(
        wallet = %profile.wallet_address,
        name = %creature.name,
        rarity = %creature.rarity,
        creature_type = %creature.creature_type,
        role = %creature.role,
        "Creature assigned"
    );
    creature
}

/// Upsert the trainer and append the creature in one transaction.
pub async fn persist_assignment(
    pool: &PgPool,
    trainer: &TrainerUpsert,
    creature: &AssignedCreature,
) -> anyhow::Result<(Trainer, Creature)> {
    let mut tx = pool.begin().await?;

    let trainer = trainer_repo::upsert_trainer(&mut *tx, trainer).await?;
    let creature = creature_repo::insert_creature(&mut *tx, trainer.id, creature).await?;

    tx.commit().await?;
    Ok((trainer, creature))
}
