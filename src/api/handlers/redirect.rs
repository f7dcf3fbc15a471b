//! Handler for short URL redirect.

use axum::{
    extract::{Path, State, rejection::PathRejection},
    http::{StatusCode, header},
    response::IntoResponse,
};

use super::require_code;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// The click is counted in the background; the redirect is sent without
/// waiting for that write.
///
/// # Errors
///
/// - 400 if the code is blank or not valid UTF-8
/// - 404 if the code doesn't exist
/// - 500 on database errors
pub async fn redirect_handler(
    code: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let Path(code) = code?;
    let code = require_code(&code)?;

    let original_url = state.url_service.get_original_url(code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, original_url)]))
}
