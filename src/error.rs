use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Degenerate route: {0}")]
    DegenerateRoute(String),

    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    #[error("Tracker state error: {0}")]
    TrackerState(String),

    #[error("Projection failed: {0}")]
    Projection(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::DegenerateRoute(ref e) => {
                tracing::warn!("Degenerate route rejected: {}", e);
                (StatusCode::BAD_REQUEST, e.as_str())
            }
            AppError::InvalidRoute(ref e) => (StatusCode::BAD_REQUEST, e.as_str()),
            AppError::TrackerState(ref e) => (StatusCode::CONFLICT, e.as_str()),
            AppError::Projection(ref e) => {
                tracing::error!("Projection error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal projection error")
            }
            AppError::InvalidRequest(ref e) => (StatusCode::BAD_REQUEST, e.as_str()),
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
