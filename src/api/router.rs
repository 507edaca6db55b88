use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    let ops = Router::new()
        .route("/health", get(handlers::ops::health_check))
        .route("/metrics", get(handlers::ops::metrics));

    let api = Router::new()
        // Wallets and creature generation
        .route("/api/fetch-wallet", get(handlers::wallet::fetch_wallet))
        .route("/api/assign-creature", post(handlers::creatures::assign))
        .route("/api/scan", post(handlers::creatures::scan))
        .route("/api/creature-types", get(handlers::catalog::list))
        // Trainers
        .route("/api/save-user", post(handlers::trainers::save_user))
        .route("/api/user", get(handlers::trainers::get_user))
        .route("/api/users", get(handlers::trainers::list_users))
        .route("/api/leaderboard", get(handlers::leaderboard::list))
        // Minting
        .route("/api/mint-profile", post(handlers::mint::prepare_mint))
        .route("/api/update-token-id", post(handlers::mint::update_token_id))
        .route("/api/metadata/:id", get(handlers::metadata::get_metadata));

    // Marketplaces and the card frontend fetch from other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    ops.merge(api)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
