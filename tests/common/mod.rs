#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::Request;
use axum::routing::IntoMakeService;
use axum::{Router, ServiceExt};
use chrono::{DateTime, Utc};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use shortener::application::services::UrlService;
use shortener::domain::click_event::ClickEvent;
use shortener::domain::entities::{NewUrl, UrlRecord};
use shortener::domain::repositories::UrlRepository;
use shortener::error::AppError;
use shortener::routes::app_router;
use shortener::state::AppState;
use tower_http::normalize_path::NormalizePath;

pub const BASE_URL: &str = "http://sho.rt";

/// In-memory repository with the same uniqueness rules as the `urls` table.
#[derive(Default)]
pub struct InMemoryUrlRepository {
    records: Mutex<Vec<UrlRecord>>,
    next_id: Mutex<i64>,
    /// Every code is reported as taken.
    always_collide: bool,
    /// Every call fails with a store error.
    failing: bool,
    /// Every insert loses a uniqueness race.
    racing: bool,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn colliding() -> Self {
        Self {
            always_collide: true,
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::default()
        }
    }

    pub fn racing() -> Self {
        Self {
            racing: true,
            ..Self::default()
        }
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn get(&self, code: &str) -> Option<UrlRecord> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.short_code == code)
            .cloned()
    }

    fn check(&self) -> Result<(), AppError> {
        if self.failing {
            return Err(AppError::Store("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn code_exists(&self, code: &str) -> Result<bool, AppError> {
        self.check()?;
        Ok(self.always_collide || self.get(code).is_some())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<UrlRecord>, AppError> {
        self.check()?;
        Ok(self.get(code))
    }

    async fn find_by_original_url(
        &self,
        original_url: &str,
    ) -> Result<Option<UrlRecord>, AppError> {
        self.check()?;
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.original_url == original_url)
            .cloned())
    }

    async fn insert(&self, new_url: NewUrl) -> Result<UrlRecord, AppError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        if self.racing
            || records.iter().any(|r| {
                r.short_code == new_url.short_code || r.original_url == new_url.original_url
            })
        {
            return Err(AppError::CodeAlreadyExists(new_url.short_code));
        }

        let mut next_id = self.next_id.lock().unwrap();
        *next_id += 1;

        let record = UrlRecord::new(
            *next_id,
            new_url.original_url,
            new_url.short_code,
            Utc::now(),
            None,
            0,
        );
        records.push(record.clone());
        Ok(record)
    }

    async fn record_access(&self, id: i64, accessed_at: DateTime<Utc>) -> Result<(), AppError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        if let Some(record) = records.iter_mut().find(|r| r.id == id) {
            record.click_count += 1;
            record.last_accessed = Some(accessed_at);
        }
        Ok(())
    }

    async fn delete_by_code(&self, code: &str) -> Result<bool, AppError> {
        self.check()?;
        let mut records = self.records.lock().unwrap();
        let before = records.len();
        records.retain(|r| r.short_code != code);
        Ok(records.len() < before)
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.check()?;
        Ok(self.len() as i64)
    }
}

pub fn create_test_state(
    repository: Arc<InMemoryUrlRepository>,
) -> (AppState, mpsc::Receiver<ClickEvent>) {
    let (tx, rx) = mpsc::channel(100);
    let service = UrlService::new(repository, tx, format!("{BASE_URL}/"));
    (AppState::new(Arc::new(service)), rx)
}

/// The production router, middleware included, ready for `TestServer::new`.
pub fn test_app(state: AppState) -> IntoMakeService<NormalizePath<Router>> {
    ServiceExt::<Request>::into_make_service(app_router(state))
}

/// Inserts a record directly, bypassing the service.
pub async fn seed(repository: &InMemoryUrlRepository, code: &str, url: &str) -> UrlRecord {
    repository
        .insert(NewUrl {
            original_url: url.to_string(),
            short_code: code.to_string(),
        })
        .await
        .unwrap()
}
