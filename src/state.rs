//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::UrlService;

/// Application state cloned into each request.
///
/// Immutable after construction; the only shared resource underneath is the
/// database pool, which is safe for concurrent use.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService>,
}

impl AppState {
    /// Creates the application state.
    pub fn new(url_service: Arc<UrlService>) -> Self {
        Self { url_service }
    }
}
