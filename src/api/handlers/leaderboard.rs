use axum::extract::State;
use axum::Json;

use crate::db::trainer_repo;
use crate::engine::rank;
use crate::errors::AppError;
use crate::models::LeaderboardEntry;
use crate::AppState;

use super::ApiResponse;

/// GET /api/leaderboard — rarity of the latest creature first, then power score
pub async fn list(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<LeaderboardEntry>>>, AppError> {
    let rows = trainer_repo::list_with_latest_creature(&state.db).await?;

    let mut entries: Vec<LeaderboardEntry> = rows.into_iter().map(Into::into).collect();
    rank(&mut entries);
    entries.truncate(state.config.leaderboard_limit);

    Ok(ApiResponse::ok(entries))
}
