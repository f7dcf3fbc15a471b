//! API route configuration.

use crate::api::handlers::{
    delete_handler, shorten_custom_handler, shorten_handler, stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get, post},
};

/// Link management routes.
///
/// # Endpoints
///
/// - `POST   /shorten`         - Shorten a URL with a generated code
/// - `POST   /shorten/custom`  - Shorten a URL with a custom code
/// - `GET    /stats/{code}`    - Click statistics for a code
/// - `DELETE /delete/{code}`   - Delete a code
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/shorten/custom", post(shorten_custom_handler))
        .route("/stats/{code}", get(stats_handler))
        .route("/delete/{code}", delete(delete_handler))
}
