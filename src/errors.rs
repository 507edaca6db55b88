use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::chain::ChainError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    /// A chain data provider failed or returned garbage.
    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Misconfigured: {0}")]
    Misconfigured(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    success: bool,
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Upstream(msg) => {
                tracing::warn!("Upstream error: {msg}");
                (StatusCode::BAD_GATEWAY, msg.clone())
            }
            AppError::Misconfigured(msg) => {
                tracing::error!("Misconfigured: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
            }
        };

        (
            status,
            Json(ErrorBody {
                success: false,
                error: message,
            }),
        )
            .into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        AppError::Internal(e.into())
    }
}

impl From<ChainError> for AppError {
    fn from(e: ChainError) -> Self {
        match e {
            ChainError::UnsupportedChain(_) | ChainError::InvalidAddress(_) => {
                AppError::BadRequest(e.to_string())
            }
            ChainError::MissingApiKey => AppError::Misconfigured(e.to_string()),
            ChainError::Http(_) | ChainError::Rpc(_) | ChainError::Malformed(_) => {
                AppError::Upstream(format!("Failed to fetch wallet data: {e}"))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_error_status_mapping() {
        let cases = [
            (ChainError::UnsupportedChain("solana".into()), StatusCode::BAD_REQUEST),
            (ChainError::InvalidAddress("0x12".into()), StatusCode::BAD_REQUEST),
            (ChainError::MissingApiKey, StatusCode::INTERNAL_SERVER_ERROR),
            (ChainError::Rpc("execution reverted".into()), StatusCode::BAD_GATEWAY),
            (ChainError::Malformed("bad hex".into()), StatusCode::BAD_GATEWAY),
        ];

        for (err, expected) in cases {
            let resp = AppError::from(err).into_response();
            assert_eq!(resp.status(), expected);
        }
    }

    #[test]
    fn test_internal_hides_detail() {
        let err = AppError::Internal(anyhow::anyhow!("connection refused on 5432"));
        assert_eq!(err.into_response().status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
