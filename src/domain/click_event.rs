//! Click event model for asynchronous click tracking.

use chrono::{DateTime, Utc};

/// A request to bump the click statistics of one URL record.
///
/// Sent from [`crate::application::services::UrlService::get_original_url`]
/// to the background worker over a bounded channel, so the redirect reply
/// never waits on the statistics write.
///
/// Delivery is at-most-once: events are dropped when the queue is full
/// and failed writes are not retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickEvent {
    pub url_id: i64,
    pub clicked_at: DateTime<Utc>,
}

impl ClickEvent {
    /// Creates a click event for the given record, stamped with the current time.
    pub fn new(url_id: i64) -> Self {
        Self {
            url_id,
            clicked_at: Utc::now(),
        }
    }
}
