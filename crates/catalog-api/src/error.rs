//! # API Error Types
//!
//! Unified error handling for the REST layer.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use catalog_persistence::{LeaderboardError, PersistenceError};

/// API-level errors
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Leaderboard error: {0}")]
    Leaderboard(#[from] LeaderboardError),

    #[error("Persistence error: {0}")]
    Persistence(#[from] PersistenceError),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Leaderboard(LeaderboardError::CacheUnavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
            Self::Leaderboard(LeaderboardError::ComputationFailed(_)) | Self::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get stable machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::InvalidInput(_) => "INVALID_INPUT",
            Self::Leaderboard(LeaderboardError::CacheUnavailable(_)) => "CACHE_UNAVAILABLE",
            Self::Leaderboard(LeaderboardError::ComputationFailed(_)) => "COMPUTATION_FAILED",
            Self::Persistence(_) => "PERSISTENCE_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = serde_json::json!({
            "error": {
                "message": self.to_string(),
                "code": self.error_code(),
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;
