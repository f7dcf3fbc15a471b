//! Handler for short URL deletion.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use super::require_code;
use crate::api::dto::delete::MessageResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Permanently deletes a short code.
///
/// # Endpoint
///
/// `DELETE /delete/{code}`
///
/// # Errors
///
/// - 400 if the code is blank or not valid UTF-8
/// - 404 if the code doesn't exist (including a second delete)
/// - 500 on database errors
pub async fn delete_handler(
    code: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, AppError> {
    let Path(code) = code?;
    let code = require_code(&code)?;

    state.url_service.delete_url(code).await?;

    Ok(Json(MessageResponse {
        message: "Short URL deleted successfully".to_string(),
    }))
}
