use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use sqlx::Error as SqlxError;
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum DartsError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("darts with id {0} not found")]
    NotFound(i64),

    #[error("Database error: {0}")]
    Store(#[from] SqlxError),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl DartsError {
    pub fn status(&self) -> StatusCode {
        match self {
            DartsError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            DartsError::NotFound(_) => StatusCode::NOT_FOUND,
            DartsError::Store(_) | DartsError::Config(_) | DartsError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for DartsError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        let error_body = match self {
            DartsError::Validation(reason) => ApiErrorBody {
                code: "VALIDATION_ERROR".to_string(),
                message: reason,
            },
            DartsError::NotFound(_) => ApiErrorBody {
                code: "NOT_FOUND".to_string(),
                message: self.to_string(),
            },
            DartsError::Store(_) | DartsError::Config(_) | DartsError::Io(_) => {
                error!(error = %self, "request failed");
                ApiErrorBody {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred.".to_string(),
                }
            }
        };
        (status, Json(ApiErrorResponse { error: error_body })).into_response()
    }
}

/// Standardized API error response body
#[derive(Serialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}
