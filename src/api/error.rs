use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::fmt;

use crate::services::AnalyticsError;

/// Body of every non-2xx response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    /// `message` is returned to the client; `detail` is only logged.
    Internal { message: String, detail: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Internal { message, detail } => write!(f, "{message}: {detail}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            Self::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            Self::Internal { message, detail } => {
                tracing::error!(detail = %detail, "{message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorBody { error })).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal("An internal error occurred", err)
    }
}

impl ApiError {
    pub fn internal(message: impl Into<String>, detail: impl fmt::Display) -> Self {
        Self::Internal {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    /// Wraps an analytics failure behind a generic per-endpoint message.
    pub fn analytics(message: &'static str) -> impl FnOnce(AnalyticsError) -> Self {
        move |err| Self::internal(message, err)
    }

    #[must_use]
    pub fn not_found() -> Self {
        Self::NotFound("Not found".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    #[tokio::test]
    async fn internal_error_hides_detail() {
        let err = ApiError::analytics("Failed to fetch summary data")(
            AnalyticsError::StoreUnavailable("disk I/O error".into()),
        );
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Failed to fetch summary data");
        assert!(!String::from_utf8_lossy(&body).contains("disk"));
    }
}
