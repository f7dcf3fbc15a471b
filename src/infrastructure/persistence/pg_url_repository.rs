//! PostgreSQL implementation of URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};
use std::sync::Arc;

use crate::domain::entities::{NewUrl, UrlRecord};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::db_error::is_unique_violation;

/// Row shape shared by every `SELECT` on `urls`.
#[derive(Debug, FromRow)]
struct UrlRow {
    id: i64,
    original_url: String,
    short_code: String,
    created_at: DateTime<Utc>,
    last_accessed: Option<DateTime<Utc>>,
    click_count: i64,
}

impl From<UrlRow> for UrlRecord {
    fn from(r: UrlRow) -> Self {
        UrlRecord::new(
            r.id,
            r.original_url,
            r.short_code,
            r.created_at,
            r.last_accessed,
            r.click_count,
        )
    }
}

const SELECT_COLUMNS: &str =
    "id, original_url, short_code, created_at, last_accessed, COALESCE(click_count, 0) AS click_count";

/// PostgreSQL repository for URL records.
///
/// All queries are parameterized; the pool is shared with the click worker.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM urls WHERE short_code = $1)")
                .bind(code)
                .fetch_one(self.pool.as_ref())
                .await?;

        Ok(exists)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM urls WHERE short_code = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(&format!(
            "SELECT {SELECT_COLUMNS} FROM urls WHERE original_url = $1 LIMIT 1"
        ))
        .bind(original_url)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(UrlRecord::from))
    }

    async fn insert(&self, new_url: NewUrl) -> Result<UrlRecord, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(&format!(
            r#"
            INSERT INTO urls (original_url, short_code, created_at, click_count)
            VALUES ($1, $2, NOW(), 0)
            RETURNING {SELECT_COLUMNS}
            "#
        ))
        .bind(&new_url.original_url)
        .bind(&new_url.short_code)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::CodeAlreadyExists(new_url.short_code.clone())
            } else {
                AppError::from(e)
            }
        })?;

        Ok(row.into())
    }

    async fn record_access(&self, id: i64, accessed_at: DateTime<Utc>) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE urls
            SET last_accessed = $2, click_count = COALESCE(click_count, 0) + 1
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(accessed_at)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM urls WHERE short_code = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
