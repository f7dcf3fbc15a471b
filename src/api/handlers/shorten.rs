//! Handlers for link shortening endpoints.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::{CustomShortenRequest, ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL with a generated code.
///
/// # Endpoint
///
/// `POST /shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "example.com/some/page" }
/// ```
///
/// # Response
///
/// `201 Created`. Shortening the same URL again returns the existing code.
/// `original_url` echoes the trimmed input; the stored form carries a scheme.
///
/// ```json
/// {
///   "short_url": "http://localhost:8080/aZ3kQ9",
///   "original_url": "example.com/some/page",
///   "code": "aZ3kQ9"
/// }
/// ```
///
/// # Errors
///
/// - 400 if the body is malformed, the URL is blank or invalid
/// - 500 if no unique code could be generated or the database fails
pub async fn shorten_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    let payload = payload.trimmed();
    payload.validate()?;

    let code = state.url_service.create_short_url(&payload.url).await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url: state.url_service.short_url(&code),
            original_url: payload.url,
            code,
        }),
    ))
}

/// Creates a short URL under a caller-chosen code.
///
/// # Endpoint
///
/// `POST /shorten/custom`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com", "custom_code": "my-promo" }
/// ```
///
/// # Errors
///
/// - 400 if the body is malformed, a field is blank, the URL is invalid,
///   or the custom code breaks a format rule (the message names the rule)
/// - 409 if the code is taken or the URL already has another code
/// - 500 on database errors
pub async fn shorten_custom_handler(
    State(state): State<AppState>,
    payload: Result<Json<CustomShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(payload) = payload?;
    let payload = payload.trimmed();
    payload.validate()?;

    let code = state
        .url_service
        .create_short_url_with_custom_code(&payload.url, &payload.custom_code)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url: state.url_service.short_url(&code),
            original_url: payload.url,
            code,
        }),
    ))
}
