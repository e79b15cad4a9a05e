use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("{context}: {detail}")]
    Rejected { context: &'static str, detail: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Demote a persistence failure to a client error carrying `context` as its message.
    pub fn rejected(self, context: &'static str) -> Self {
        match self {
            AppError::NotFound(_) | AppError::Upload(_) | AppError::Validation(_) => self,
            AppError::Rejected { detail, .. } => AppError::Rejected { context, detail },
            other => AppError::Rejected {
                context,
                detail: other.to_string(),
            },
        }
    }
}

/// Error body returned for every failed request
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Plain confirmation body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, error) = match &self {
            AppError::Database(e) => {
                tracing::error!("Database error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Database error".to_string(),
                    Some(e.to_string()),
                )
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone(), None),
            AppError::Upload(detail) => (
                StatusCode::BAD_REQUEST,
                "Error uploading file".to_string(),
                Some(detail.clone()),
            ),
            AppError::Validation(detail) => (
                StatusCode::BAD_REQUEST,
                "Invalid employee data".to_string(),
                Some(detail.clone()),
            ),
            AppError::Rejected { context, detail } => (
                StatusCode::BAD_REQUEST,
                context.to_string(),
                Some(detail.clone()),
            ),
            AppError::Unavailable(msg) => {
                tracing::error!("Store unavailable: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Store unavailable".to_string(),
                    Some(msg.clone()),
                )
            }
            AppError::Storage(msg) => {
                tracing::error!("Storage error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone(), None)
            }
            AppError::Io(e) => {
                tracing::error!("IO error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "IO error".to_string(), None)
            }
        };

        let body = Json(ErrorResponse { message, error });
        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
