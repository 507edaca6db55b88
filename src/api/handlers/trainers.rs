use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::Json;
use metrics::counter;
use serde::{Deserialize, Serialize};

use crate::chain::{normalize_address, Chain};
use crate::db::{creature_repo, trainer_repo};
use crate::errors::AppError;
use crate::models::{AssignedCreature, Creature, LeaderboardEntry, Trainer, TrainerProfile, TrainerUpsert};
use crate::services::assign::persist_assignment;
use crate::AppState;

use super::wallet::DEFAULT_CHAIN;
use super::{json_body, required, ApiResponse};

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Flattened wallet snapshot plus the creature to append.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveUserRequest {
    pub wallet_address: Option<String>,
    pub chain: Option<String>,
    pub resolved_name: Option<String>,
    #[serde(rename = "nativeBalanceUSD")]
    pub native_balance_usd: Option<f64>,
    #[serde(rename = "tokenValueUSD")]
    pub token_value_usd: Option<f64>,
    pub nft_count: Option<i64>,
    pub tx_count: Option<i64>,
    pub power_score: Option<i64>,
    pub creature: Option<AssignedCreature>,
}

#[derive(Serialize)]
pub struct SavedUser {
    pub trainer: Trainer,
    pub creature: Creature,
}

#[derive(Deserialize)]
pub struct UserQuery {
    pub address: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/save-user — upsert the trainer and append a creature
pub async fn save_user(
    State(state): State<AppState>,
    payload: Result<Json<SaveUserRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<SavedUser>>, AppError> {
    let req = json_body(payload)?;
    let address = normalize_address(&required(req.wallet_address, "wallet address")?)?;
    let power_score = req
        .power_score
        .ok_or_else(|| AppError::BadRequest("Missing power score".into()))?;
    let creature = req
        .creature
        .ok_or_else(|| AppError::BadRequest("Missing creature".into()))?;
    if !creature.stats.in_range() {
        return Err(AppError::BadRequest("Creature stats must be within 0-100".into()));
    }
    let chain: Chain = req.chain.as_deref().unwrap_or(DEFAULT_CHAIN).parse()?;

    let upsert = TrainerUpsert {
        wallet_address: address,
        chain: chain.as_str().to_string(),
        resolved_name: req.resolved_name,
        native_balance_usd: req.native_balance_usd.unwrap_or_default(),
        token_value_usd: req.token_value_usd.unwrap_or_default(),
        nft_count: req.nft_count.unwrap_or_default(),
        tx_count: req.tx_count.unwrap_or_default(),
        power_score,
    };

    let (trainer, creature) = persist_assignment(&state.db, &upsert, &creature).await?;
    counter!("creatures_saved_total").increment(1);
    tracing::info!(
        wallet = %trainer.wallet_address,
        creature_id = creature.id,
        "Trainer saved"
    );

    Ok(ApiResponse::ok(SavedUser { trainer, creature }))
}

/// GET /api/user?address= — trainer with full creature history
pub async fn get_user(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<ApiResponse<TrainerProfile>>, AppError> {
    let address = required(query.address, "wallet address")?;

    let trainer = trainer_repo::get_trainer_by_address(&state.db, &address)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".into()))?;
    let creatures = creature_repo::get_creatures_by_trainer(&state.db, trainer.id).await?;

    Ok(ApiResponse::ok(TrainerProfile { trainer, creatures }))
}

/// GET /api/users — all trainers by power score
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LeaderboardEntry>>>, AppError> {
    let rows = trainer_repo::list_by_power_score(&state.db).await?;

    Ok(ApiResponse::ok(rows.into_iter().map(LeaderboardEntry::from).collect()))
}
