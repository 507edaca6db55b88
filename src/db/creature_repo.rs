use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::models::{AssignedCreature, Creature, CreatureWithOwner};

/// Append a generated creature to a trainer's history.
pub async fn insert_creature<'e, E: PgExecutor<'e>>(
    executor: E,
    trainer_id: Uuid,
    creature: &AssignedCreature,
) -> anyhow::Result<Creature> {
    let row = sqlx::query_as::<_, Creature>(
        r#"
        INSERT INTO creatures
            (trainer_id, name, creature_type, role, rarity,
             attack, defense, speed, wisdom, luck, flavor_text, image_url)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING *
        "#,
    )
    .bind(trainer_id)
    .bind(&creature.name)
    .bind(creature.creature_type.as_str())
    .bind(creature.role.as_str())
    .bind(creature.rarity.as_str())
    .bind(i32::from(creature.stats.attack))
    .bind(i32::from(creature.stats.defense))
    .bind(i32::from(creature.stats.speed))
    .bind(i32::from(creature.stats.wisdom))
    .bind(i32::from(creature.stats.luck))
    .bind(&creature.flavor_text)
    .bind(&creature.image_url)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

/// A trainer's creatures, newest first.
pub async fn get_creatures_by_trainer(pool: &PgPool, trainer_id: Uuid) -> anyhow::Result<Vec<Creature>> {
    let rows = sqlx::query_as::<_, Creature>(
        "SELECT * FROM creatures WHERE trainer_id = $1 ORDER BY created_at DESC, id DESC",
    )
    .bind(trainer_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

pub async fn get_creature_with_owner(pool: &PgPool, id: i64) -> anyhow::Result<Option<CreatureWithOwner>> {
    let row = sqlx::query_as::<_, CreatureWithOwner>(
        r#"
        SELECT c.*,
               t.wallet_address AS owner_wallet_address,
               t.resolved_name AS owner_resolved_name,
               t.power_score AS owner_power_score,
               t.chain AS owner_chain
        FROM creatures c
        JOIN trainers t ON t.id = c.trainer_id
        WHERE c.id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

/// Record the on-chain token id for a creature that has not been minted yet.
///
/// Returns `None` when the creature does not exist or already carries a token id.
pub async fn record_mint(pool: &PgPool, id: i64, token_id: &str) -> anyhow::Result<Option<Creature>> {
    let row = sqlx::query_as::<_, Creature>(
        r#"
        UPDATE creatures
        SET on_chain_token_id = $2, minted_at = NOW()
        WHERE id = $1 AND on_chain_token_id IS NULL
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(token_id)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
