use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use metrics::counter;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::chain::Chain;
use crate::errors::AppError;
use crate::models::{AssignedCreature, TrainerUpsert, WalletProfile};
use crate::services::assign::{assign_creature, persist_assignment};
use crate::AppState;

use super::wallet::DEFAULT_CHAIN;
use super::{json_body, required, ApiResponse};

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
pub struct ScanRequest {
    pub address: Option<String>,
    pub chain: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanResult {
    pub profile: WalletProfile,
    pub creature: AssignedCreature,
    pub creature_id: i64,
    pub trainer_id: Uuid,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/assign-creature — generate a creature for a supplied profile
pub async fn assign(
    State(state): State<AppState>,
    payload: Result<Json<WalletProfile>, JsonRejection>,
) -> Result<Json<ApiResponse<AssignedCreature>>, AppError> {
    let profile = json_body(payload)?;
    if profile.wallet_address.trim().is_empty() {
        return Err(AppError::BadRequest("Missing wallet address".into()));
    }

    let creature = assign_creature(&profile, state.lore.as_ref()).await;

    Ok(ApiResponse::ok(creature))
}

/// POST /api/scan — fetch a wallet, generate its creature and persist both
///
/// A failed fetch aborts before anything is generated or written.
pub async fn scan(
    State(state): State<AppState>,
    payload: Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<ScanResult>>, AppError> {
    let req = json_body(payload)?;
    let address = required(req.address, "wallet address")?;
    let chain: Chain = req.chain.as_deref().unwrap_or(DEFAULT_CHAIN).parse()?;

    let profile = state.scanner.fetch(&address, chain).await?;
    let creature = assign_creature(&profile, state.lore.as_ref()).await;

    let (trainer, saved) =
        persist_assignment(&state.db, &TrainerUpsert::from(&profile), &creature).await?;
    counter!("creatures_saved_total").increment(1);

    tracing::info!(
        trainer_id = %trainer.id,
        creature_id = saved.id,
        rarity = %creature.rarity,
        "Scan persisted"
    );

    Ok(ApiResponse::ok(ScanResult {
        profile,
        creature,
        creature_id: saved.id,
        trainer_id: trainer.id,
    }))
}
