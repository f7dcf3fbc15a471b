//! Helpers for classifying database errors.

/// Returns true if the error is a Postgres unique constraint violation.
///
/// Raised when a concurrent insert wins the race for the same short code
/// or original URL.
pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    db_err.is_unique_violation()
}
