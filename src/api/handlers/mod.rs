//! HTTP request handlers for API endpoints.
//!
//! Each handler trims and checks its input, calls one [`crate::application::services::UrlService`]
//! operation, and lets [`crate::error::AppError`] map failures to status codes.

pub mod delete;
pub mod health;
pub mod redirect;
pub mod shorten;
pub mod stats;

pub use delete::delete_handler;
pub use health::health_handler;
pub use redirect::redirect_handler;
pub use shorten::{shorten_custom_handler, shorten_handler};
pub use stats::stats_handler;

use crate::error::AppError;

/// Trims a short code path parameter and rejects it when blank.
pub(crate) fn require_code(code: &str) -> Result<&str, AppError> {
    let code = code.trim();
    if code.is_empty() {
        return Err(AppError::InvalidInput("Short code is required".to_string()));
    }
    Ok(code)
}
