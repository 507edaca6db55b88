use axum::Json;
use serde::Serialize;

use crate::engine::{TypeEntry, CATALOG, SCORE_RARITY_THRESHOLDS};
use crate::models::Rarity;

use super::ApiResponse;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RarityThreshold {
    pub rarity: Rarity,
    pub min_score: i64,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatureTypes {
    pub types: &'static [TypeEntry],
    pub score_rarity_thresholds: Vec<RarityThreshold>,
}

/// GET /api/creature-types
pub async fn list() -> Json<ApiResponse<CreatureTypes>> {
    let thresholds = SCORE_RARITY_THRESHOLDS
        .iter()
        .map(|&(rarity, min_score)| RarityThreshold { rarity, min_score })
        .collect();

    ApiResponse::ok(CreatureTypes {
        types: &CATALOG,
        score_rarity_thresholds: thresholds,
    })
}
