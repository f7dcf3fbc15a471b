//! URL record entity representing a short code mapping.

use chrono::{DateTime, Utc};

/// A stored mapping from short code to original URL.
///
/// `original_url` is always the normalized form (explicit scheme).
#[derive(Debug, Clone)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
    pub last_accessed: Option<DateTime<Utc>>,
    pub click_count: i64,
}

impl UrlRecord {
    /// Creates a new UrlRecord instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        created_at: DateTime<Utc>,
        last_accessed: Option<DateTime<Utc>>,
        click_count: i64,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            created_at,
            last_accessed,
            click_count,
        }
    }
}

/// Input data for inserting a new URL record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrl {
    pub original_url: String,
    pub short_code: String,
}

/// Usage statistics for a single short code.
#[derive(Debug, Clone)]
pub struct UrlStats {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl From<UrlRecord> for UrlStats {
    fn from(record: UrlRecord) -> Self {
        Self {
            short_code: record.short_code,
            original_url: record.original_url,
            created_at: record.created_at,
            click_count: record.click_count,
            last_accessed: record.last_accessed,
        }
    }
}
