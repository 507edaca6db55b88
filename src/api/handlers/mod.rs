pub mod catalog;
pub mod creatures;
pub mod leaderboard;
pub mod metadata;
pub mod mint;
pub mod ops;
pub mod trainers;
pub mod wallet;

use axum::extract::rejection::JsonRejection;
use axum::Json;
use serde::Serialize;

use crate::errors::AppError;

#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
        })
    }
}

/// Unwrap a JSON body, reporting any rejection as a 400.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::BadRequest(format!("Invalid request body: {}", rejection.body_text())))
}

/// Trimmed, non-empty string or a 400 naming the missing field.
pub(crate) fn required(value: Option<String>, field: &str) -> Result<String, AppError> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| AppError::BadRequest(format!("Missing {field}")))
}
