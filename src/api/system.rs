use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use super::{ApiError, AppState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// `GET /api/health`: ok only when the store answers a ping.
pub async fn get_health(
    State(state): State<Arc<AppState>>,
) -> Result<Json<HealthResponse>, ApiError> {
    state
        .analytics()
        .health()
        .await
        .map_err(ApiError::analytics("Data store unavailable"))?;
    Ok(Json(HealthResponse { status: "ok" }))
}

pub async fn not_found() -> ApiError {
    ApiError::not_found()
}
