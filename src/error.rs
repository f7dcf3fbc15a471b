//! Application error type and its HTTP representation.
//!
//! Every service operation returns [`AppError`]. Handlers propagate it with `?`
//! and axum renders it through [`IntoResponse`] as a `{ "error", "message" }` body.

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use validator::ValidationErrors;

use crate::utils::db_error::is_unique_violation;

/// Structured error body returned to API clients.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub error: &'static str,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Request body or path parameter is missing, blank or malformed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid URL format")]
    InvalidUrl,

    /// The reason names the specific rule the custom code broke.
    #[error("invalid custom code format: {0}")]
    InvalidCustomCode(String),

    #[error("code already exists: {0}")]
    CodeAlreadyExists(String),

    /// Custom-code requests only: the URL already has a different short code.
    #[error("URL already exists with code: {existing_code}")]
    UrlAlreadyShortened { existing_code: String },

    #[error("failed to generate unique code")]
    CodeGenerationFailed,

    /// The random source itself failed.
    #[error("failed to generate code: {0}")]
    Generation(String),

    #[error("URL not found")]
    UrlNotFound,

    #[error("database error: {0}")]
    Store(String),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidInput(_) | AppError::InvalidUrl | AppError::InvalidCustomCode(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::CodeAlreadyExists(_) | AppError::UrlAlreadyShortened { .. } => {
                StatusCode::CONFLICT
            }
            AppError::UrlNotFound => StatusCode::NOT_FOUND,
            AppError::CodeGenerationFailed | AppError::Generation(_) | AppError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Converts the error into the client-facing body.
    ///
    /// Store and random-source details stay in the logs.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (error, message) = match self {
            AppError::InvalidInput(reason) => ("Invalid input", reason.clone()),
            AppError::InvalidUrl => ("Invalid URL", "Please provide a valid URL format".into()),
            AppError::InvalidCustomCode(_) => ("Invalid custom code", self.to_string()),
            AppError::CodeAlreadyExists(code) if code.is_empty() => (
                "Code already exists",
                "The short code is already in use".into(),
            ),
            AppError::CodeAlreadyExists(code) => (
                "Code already exists",
                format!(
                    "The custom code '{code}' is already in use. Please choose a different code."
                ),
            ),
            AppError::UrlAlreadyShortened { .. } => ("URL already shortened", self.to_string()),
            AppError::CodeGenerationFailed => (
                "Service temporarily unavailable",
                "Failed to generate unique code, please try again".into(),
            ),
            AppError::Generation(_) => (
                "Internal server error",
                "Failed to create short URL".into(),
            ),
            AppError::UrlNotFound => ("Not found", "Short URL not found".into()),
            AppError::Store(_) => ("Internal server error", "Database operation failed".into()),
        };

        ErrorInfo { error, message }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        (status, Json(self.to_error_info())).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        if is_unique_violation(&e) {
            return AppError::CodeAlreadyExists(String::new());
        }

        AppError::Store(e.to_string())
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let message = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{field} is invalid"),
                })
            })
            .collect::<Vec<_>>()
            .join(", ");

        AppError::InvalidInput(message)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidInput(rejection.body_text())
    }
}
