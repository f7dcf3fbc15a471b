//! DTOs for short URL statistics.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::domain::entities::UrlStats;

/// Usage statistics for a single short code.
///
/// `last_accessed` is omitted until the link has been followed.
#[skip_serializing_none]
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub short_code: String,
    pub original_url: String,
    pub created_at: DateTime<Utc>,
    pub click_count: i64,
    pub last_accessed: Option<DateTime<Utc>>,
}

impl From<UrlStats> for StatsResponse {
    fn from(stats: UrlStats) -> Self {
        Self {
            short_code: stats.short_code,
            original_url: stats.original_url,
            created_at: stats.created_at,
            click_count: stats.click_count,
            last_accessed: stats.last_accessed,
        }
    }
}
