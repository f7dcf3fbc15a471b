//! DTO for the delete endpoint.

use serde::Serialize;

/// Confirmation body returned after a successful delete.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}
