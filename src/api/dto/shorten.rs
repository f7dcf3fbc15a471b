//! DTOs for link shortening endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Request to shorten a URL with a generated code.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(length(min = 1, message = "URL cannot be empty"))]
    pub url: String,
}

impl ShortenRequest {
    /// Returns the request with surrounding whitespace removed.
    pub fn trimmed(self) -> Self {
        Self {
            url: self.url.trim().to_string(),
        }
    }
}

/// Request to shorten a URL under a caller-chosen code.
#[derive(Debug, Deserialize, Validate)]
pub struct CustomShortenRequest {
    #[validate(length(min = 1, message = "URL cannot be empty"))]
    pub url: String,

    #[validate(length(min = 1, message = "Custom code cannot be empty"))]
    pub custom_code: String,
}

impl CustomShortenRequest {
    /// Returns the request with surrounding whitespace removed from both fields.
    pub fn trimmed(self) -> Self {
        Self {
            url: self.url.trim().to_string(),
            custom_code: self.custom_code.trim().to_string(),
        }
    }
}

/// Response for a created (or reused) short URL.
#[derive(Debug, Serialize)]
pub struct ShortenResponse {
    pub short_url: String,
    pub original_url: String,
    pub code: String,
}
