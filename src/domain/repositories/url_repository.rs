//! Repository trait for URL record data access.

use crate::domain::entities::{NewUrl, UrlRecord};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Persistence gateway for URL records.
///
/// Lookups return `Ok(None)` for a missing record; every other store failure
/// surfaces as [`AppError::Store`].
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Returns true if a record with this short code exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn code_exists(&self, code: &str) -> Result<bool, AppError>;

    /// Finds a record by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError>;

    /// Finds a record by its normalized original URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn find_by_original_url(&self, original_url: &str)
    -> Result<Option<UrlRecord>, AppError>;

    /// Inserts a new record with `click_count = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeAlreadyExists`] if the short code is already
    /// taken (unique constraint violation).
    /// Returns [`AppError::Store`] on other database errors.
    async fn insert(&self, new_url: NewUrl) -> Result<UrlRecord, AppError>;

    /// Increments the click count and sets `last_accessed`.
    ///
    /// Updating a record that no longer exists is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn record_access(&self, id: i64, accessed_at: DateTime<Utc>) -> Result<(), AppError>;

    /// Deletes a record by short code.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError>;

    /// Counts all stored records.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    async fn count(&self) -> Result<i64, AppError>;
}
