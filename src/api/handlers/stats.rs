//! Handler for short URL statistics.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
};

use super::require_code;
use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns click statistics for a short code.
///
/// # Endpoint
///
/// `GET /stats/{code}`
///
/// # Response
///
/// ```json
/// {
///   "short_code": "aZ3kQ9",
///   "original_url": "https://example.com",
///   "created_at": "2026-01-01T12:00:00Z",
///   "click_count": 3,
///   "last_accessed": "2026-01-02T08:15:00Z"
/// }
/// ```
///
/// Click counts are eventually consistent with recent redirects.
///
/// # Errors
///
/// - 400 if the code is blank or not valid UTF-8
/// - 404 if the code doesn't exist
/// - 500 on database errors
pub async fn stats_handler(
    code: Result<Path<String>, PathRejection>,
    State(state): State<AppState>,
) -> Result<Json<StatsResponse>, AppError> {
    let Path(code) = code?;
    let code = require_code(&code)?;

    let stats = state.url_service.get_url_stats(code).await?;

    Ok(Json(stats.into()))
}
