//! PostgreSQL repository implementations.
//!
//! Concrete implementations of domain repository traits using SQLx with
//! parameterized, runtime-checked queries.
//!
//! - [`PgUrlRepository`] - URL record storage, lookup and click statistics
//! - [`connect_pool`] - Pool construction with startup retries

pub mod pg_url_repository;
pub mod pool;

pub use pg_url_repository::PgUrlRepository;
pub use pool::connect_pool;
