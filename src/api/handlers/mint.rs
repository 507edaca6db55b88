use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use metrics::counter;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::db::creature_repo;
use crate::errors::AppError;
use crate::models::Creature;
use crate::AppState;

use super::{json_body, required, ApiResponse};

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MintProfileRequest {
    pub wallet_address: Option<String>,
    pub creature_id: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MintPreparation {
    pub contract_address: String,
    #[serde(rename = "metadataURI")]
    pub metadata_uri: String,
    pub mint_fee: Decimal,
    pub creature: MintCreature,
}

#[derive(Serialize)]
pub struct MintCreature {
    pub name: String,
    #[serde(rename = "type")]
    pub creature_type: String,
    pub rarity: String,
}

/// Token ids arrive as JSON numbers or decimal strings.
#[derive(Deserialize)]
#[serde(untagged)]
pub enum TokenId {
    Number(u64),
    Text(String),
}

impl TokenId {
    fn into_string(self) -> String {
        match self {
            TokenId::Number(n) => n.to_string(),
            TokenId::Text(s) => s.trim().to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTokenIdRequest {
    pub creature_id: Option<i64>,
    pub token_id: Option<TokenId>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/mint-profile — check ownership and return the mint parameters
pub async fn prepare_mint(
    State(state): State<AppState>,
    payload: Result<Json<MintProfileRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<MintPreparation>>, AppError> {
    let req = json_body(payload)?;
    let wallet = required(req.wallet_address, "wallet address")?;
    let creature_id = req
        .creature_id
        .ok_or_else(|| AppError::BadRequest("Missing creature ID".into()))?;

    let record = creature_repo::get_creature_with_owner(&state.db, creature_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Creature not found".into()))?;

    if !record.owner_wallet_address.eq_ignore_ascii_case(&wallet) {
        return Err(AppError::Forbidden(
            "Wallet address does not match creature owner".into(),
        ));
    }

    if let Some(token_id) = &record.creature.on_chain_token_id {
        return Err(AppError::Conflict(format!(
            "This profile has already been minted (token {token_id})"
        )));
    }

    let contract_address = state
        .config
        .trainer_profile_contract_address
        .clone()
        .ok_or_else(|| AppError::Misconfigured("Contract not deployed".into()))?;

    let Creature {
        id,
        name,
        creature_type,
        rarity,
        ..
    } = record.creature;

    Ok(ApiResponse::ok(MintPreparation {
        contract_address,
        metadata_uri: id.to_string(),
        mint_fee: state.config.mint_fee_eth,
        creature: MintCreature {
            name,
            creature_type,
            rarity,
        },
    }))
}

/// POST /api/update-token-id — record the minted token id, once
pub async fn update_token_id(
    State(state): State<AppState>,
    payload: Result<Json<UpdateTokenIdRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<Creature>>, AppError> {
    let req = json_body(payload)?;
    let (Some(creature_id), Some(token_id)) = (req.creature_id, req.token_id) else {
        return Err(AppError::BadRequest(
            "Creature ID and token ID are required".into(),
        ));
    };
    let token_id = token_id.into_string();
    if token_id.is_empty() {
        return Err(AppError::BadRequest("Token ID must not be empty".into()));
    }

    match creature_repo::record_mint(&state.db, creature_id, &token_id).await? {
        Some(creature) => {
            counter!("profiles_minted_total").increment(1);
            tracing::info!(creature_id, token_id = %token_id, "Profile minted");
            Ok(ApiResponse::ok(creature))
        }
        None => {
            let exists = creature_repo::get_creature_with_owner(&state.db, creature_id)
                .await?
                .is_some();
            if exists {
                Err(AppError::Conflict("Token ID already recorded".into()))
            } else {
                Err(AppError::NotFound("Creature not found".into()))
            }
        }
    }
}
