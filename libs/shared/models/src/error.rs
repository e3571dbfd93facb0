use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not Found: {0}")]
    NotFound(String),

    /// A rejection tied to one input field, e.g. the requested timestamp.
    #[error("Invalid {field}: {message}")]
    InvalidField { field: String, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Internal Server Error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl AppError {
    pub fn invalid_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        AppError::InvalidField {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InvalidField { .. } => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match &self {
            AppError::InvalidField { field, message } => {
                tracing::error!("Error: {}: {} ({})", status, message, field);
                json!({
                    "error": message,
                    "field": field
                })
            }
            AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Unprocessable(msg)
            | AppError::Internal(msg)
            | AppError::Database(msg) => {
                tracing::error!("Error: {}: {}", status, msg);
                json!({
                    "error": msg
                })
            }
        };

        (status, Json(body)).into_response()
    }
}
