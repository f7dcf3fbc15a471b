//! Short code generation and validation utilities.
//!
//! Provides cryptographically secure random code generation and validation
//! for custom user-provided codes.

use regex::Regex;
use std::sync::LazyLock;

/// Length of generated short codes.
pub const CODE_LENGTH: usize = 6;

/// Minimum length of a custom code.
pub const MIN_CUSTOM_CODE_LEN: usize = 3;

/// Maximum length of a custom code.
pub const MAX_CUSTOM_CODE_LEN: usize = 50;

/// Characters used for generated codes.
const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Reserved codes that cannot be used as custom short links.
///
/// Compared case-insensitively.
const RESERVED_CODES: &[&str] = &["api", "admin", "www", "app", "mail", "ftp", "localhost"];

static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("valid custom code regex"));

/// The operating system random source failed.
#[derive(Debug, thiserror::Error)]
#[error("failed to generate random bytes: {0}")]
pub struct GenerationError(String);

/// Reasons a custom code is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CustomCodeError {
    #[error("length must be between {MIN_CUSTOM_CODE_LEN} and {MAX_CUSTOM_CODE_LEN} characters")]
    Length,

    #[error("only alphanumeric characters, hyphens, and underscores allowed")]
    Characters,

    #[error("'{0}' is a reserved word")]
    Reserved(String),
}

/// Generates a random short code of `length` characters.
///
/// Each byte drawn from the OS random source is mapped onto the 62-character
/// alphanumeric alphabet by modulo.
///
/// # Errors
///
/// Returns [`GenerationError`] if the system random number generator fails.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(6)?;
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> Result<String, GenerationError> {
    let mut buffer = vec![0u8; length];

    getrandom::fill(&mut buffer).map_err(|e| GenerationError(e.to_string()))?;

    Ok(buffer
        .into_iter()
        .map(|b| ALPHABET[b as usize % ALPHABET.len()] as char)
        .collect())
}

/// Validates a user-provided custom short code.
///
/// # Rules
///
/// - Length: 3-50 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
/// - Cannot be a reserved word (case-insensitive)
///
/// # Errors
///
/// Returns the first [`CustomCodeError`] rule violated.
///
/// # Examples
///
/// ```ignore
/// assert!(validate_custom_code("my-code_1").is_ok());
/// assert!(validate_custom_code("ab").is_err());      // Too short
/// assert!(validate_custom_code("abc$de").is_err());  // Bad character
/// assert!(validate_custom_code("Admin").is_err());   // Reserved
/// ```
pub fn validate_custom_code(code: &str) -> Result<(), CustomCodeError> {
    if code.len() < MIN_CUSTOM_CODE_LEN || code.len() > MAX_CUSTOM_CODE_LEN {
        return Err(CustomCodeError::Length);
    }

    if !CUSTOM_CODE_REGEX.is_match(code) {
        return Err(CustomCodeError::Characters);
    }

    if RESERVED_CODES.iter().any(|r| r.eq_ignore_ascii_case(code)) {
        return Err(CustomCodeError::Reserved(code.to_string()));
    }

    Ok(())
}
