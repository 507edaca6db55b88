use axum::extract::{Path, State};
use axum::http::header::CACHE_CONTROL;
use axum::response::IntoResponse;
use axum::Json;

use crate::db::creature_repo;
use crate::errors::AppError;
use crate::services::metadata::build_metadata;
use crate::AppState;

/// GET /api/metadata/{id} — ERC-721 metadata, returned without the API envelope
pub async fn get_metadata(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id: i64 = id
        .parse()
        .map_err(|_| AppError::BadRequest("Invalid creature ID".into()))?;

    let record = creature_repo::get_creature_with_owner(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound("Creature not found".into()))?;

    let doc = build_metadata(&record, &state.config.public_base_url);

    Ok(([(CACHE_CONTROL, "public, max-age=3600")], Json(doc)))
}
