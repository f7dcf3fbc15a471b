//! URL validation and normalization.
//!
//! The canonical stored form of a URL is the raw input with an explicit
//! scheme. Inputs without `http://` or `https://` get `https://` prepended;
//! nothing else about the string is rewritten.

use url::Url;

const HTTP_PREFIX: &str = "http://";
const HTTPS_PREFIX: &str = "https://";

/// Errors that can occur during URL validation.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("URL has no host")]
    MissingHost,
}

/// Returns true if the input starts with an `http://` or `https://` prefix.
fn has_http_scheme(raw: &str) -> bool {
    raw.starts_with(HTTP_PREFIX) || raw.starts_with(HTTPS_PREFIX)
}

/// Prepends `https://` when the input has no HTTP scheme prefix.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(normalize_url("example.com/a"), "https://example.com/a");
/// assert_eq!(normalize_url("http://example.com"), "http://example.com");
/// ```
pub fn normalize_url(raw: &str) -> String {
    if has_http_scheme(raw) {
        raw.to_string()
    } else {
        format!("{HTTPS_PREFIX}{raw}")
    }
}

/// Validates that the input is an absolute URL with a non-empty host.
///
/// Validation runs against the normalized form, so `example.com` is accepted.
///
/// # Errors
///
/// - [`UrlValidationError::Empty`] for an empty string
/// - [`UrlValidationError::InvalidFormat`] if the normalized form does not parse
/// - [`UrlValidationError::MissingHost`] if the parsed host is empty
pub fn validate_url(raw: &str) -> Result<(), UrlValidationError> {
    if raw.is_empty() {
        return Err(UrlValidationError::Empty);
    }

    let parsed = Url::parse(&normalize_url(raw))
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match parsed.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
