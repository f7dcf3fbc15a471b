//! Core domain entities representing the business data model.
//!
//! - [`UrlRecord`] - A stored short code mapping
//! - [`NewUrl`] - Input for creating a record
//! - [`UrlStats`] - Usage statistics view of a record

pub mod url_record;

pub use url_record::{NewUrl, UrlRecord, UrlStats};
