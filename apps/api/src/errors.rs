use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::sheets::SheetsError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
/// Every variant reduces to one human-readable string for the form.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    Sheets(#[from] SheetsError),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Sheets(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The single message shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Sheets(e) => e.to_string(),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(msg) => tracing::debug!("Rejected request: {msg}"),
            AppError::Sheets(e) => tracing::error!("Error adding job: {e}"),
        }

        let body = Json(json!({
            "ok": false,
            "error": self.user_message(),
        }));

        (self.status_code(), body).into_response()
    }
}
