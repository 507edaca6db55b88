use sqlx::{PgExecutor, PgPool};

use crate::models::{LeaderboardRow, Trainer, TrainerUpsert};

/// Trainer columns plus the newest creature via a lateral join.
const TRAINERS_WITH_LATEST_CREATURE: &str = r#"
    SELECT t.id, t.wallet_address, t.resolved_name, t.power_score,
           t.nft_count, t.tx_count, t.chain,
           c.name AS creature_name,
           c.rarity AS creature_rarity,
           c.creature_type AS creature_type,
           c.image_url AS creature_image_url
    FROM trainers t
    LEFT JOIN LATERAL (
        SELECT name, rarity, creature_type, image_url
        FROM creatures
        WHERE trainer_id = t.id
        ORDER BY created_at DESC, id DESC
        LIMIT 1
    ) c ON true
"#;

/// Insert a trainer or overwrite its wallet snapshot, keyed by address.
pub async fn upsert_trainer<'e, E: PgExecutor<'e>>(
    executor: E,
    trainer: &TrainerUpsert,
) -> anyhow::Result<Trainer> {
    let row = sqlx::query_as::<_, Trainer>(
        r#"
        INSERT INTO trainers
            (wallet_address, chain, resolved_name, native_balance_usd,
             token_value_usd, nft_count, tx_count, power_score)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (wallet_address) DO UPDATE
            SET chain = $2,
                resolved_name = $3,
                native_balance_usd = $4,
                token_value_usd = $5,
                nft_count = $6,
                tx_count = $7,
                power_score = $8,
                updated_at = NOW()
        RETURNING *
        "#,
    )
    .bind(trainer.wallet_address.to_lowercase())
    .bind(&trainer.chain)
    .bind(&trainer.resolved_name)
    .bind(trainer.native_balance_usd)
    .bind(trainer.token_value_usd)
    .bind(trainer.nft_count)
    .bind(trainer.tx_count)
    .bind(trainer.power_score)
    .fetch_one(executor)
    .await?;

    Ok(row)
}

/// Fetch a trainer by wallet address (case-insensitive).
pub async fn get_trainer_by_address(pool: &PgPool, address: &str) -> anyhow::Result<Option<Trainer>> {
    let trainer = sqlx::query_as::<_, Trainer>("SELECT * FROM trainers WHERE wallet_address = $1")
        .bind(address.to_lowercase())
        .fetch_optional(pool)
        .await?;

    Ok(trainer)
}

/// All trainers with their latest creature, in registration order.
pub async fn list_with_latest_creature(pool: &PgPool) -> anyhow::Result<Vec<LeaderboardRow>> {
    let sql = format!("{TRAINERS_WITH_LATEST_CREATURE} ORDER BY t.created_at ASC, t.id ASC");
    let rows = sqlx::query_as::<_, LeaderboardRow>(&sql).fetch_all(pool).await?;

    Ok(rows)
}

/// All trainers with their latest creature, highest power score first.
pub async fn list_by_power_score(pool: &PgPool) -> anyhow::Result<Vec<LeaderboardRow>> {
    let sql = format!("{TRAINERS_WITH_LATEST_CREATURE} ORDER BY t.power_score DESC, t.id ASC");
    let rows = sqlx::query_as::<_, LeaderboardRow>(&sql).fetch_all(pool).await?;

    Ok(rows)
}
