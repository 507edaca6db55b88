use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use crate::chain::Chain;
use crate::errors::AppError;
use crate::models::WalletProfile;
use crate::AppState;

use super::{required, ApiResponse};

pub const DEFAULT_CHAIN: &str = "base";

#[derive(Deserialize)]
pub struct FetchWalletQuery {
    pub address: Option<String>,
    pub chain: Option<String>,
}

/// GET /api/fetch-wallet?address=&chain= — cached wallet snapshot
pub async fn fetch_wallet(
    State(state): State<AppState>,
    Query(query): Query<FetchWalletQuery>,
) -> Result<Json<ApiResponse<WalletProfile>>, AppError> {
    let address = required(query.address, "wallet address")?;
    let chain: Chain = query.chain.as_deref().unwrap_or(DEFAULT_CHAIN).parse()?;

    let profile = state.scanner.fetch(&address, chain).await?;

    Ok(ApiResponse::ok(profile))
}
