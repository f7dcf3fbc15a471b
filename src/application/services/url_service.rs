//! Short URL creation, lookup, statistics and deletion.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::{NewUrl, UrlStats};
use crate::domain::repositories::UrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::{CODE_LENGTH, generate_code, validate_custom_code};
use crate::utils::url_normalizer::{normalize_url, validate_url};

/// Number of random candidates tried before giving up on a unique code.
pub const MAX_GENERATION_ATTEMPTS: usize = 5;

/// Service orchestrating the lifecycle of short URLs.
///
/// Validates input, enforces code uniqueness through the repository, and
/// hands click statistics off to the background worker so lookups never
/// wait on a write.
pub struct UrlService {
    repository: Arc<dyn UrlRepository>,
    click_sender: mpsc::Sender<ClickEvent>,
    base_url: String,
}

impl UrlService {
    /// Creates a new URL service.
    ///
    /// A trailing slash on `base_url` is stripped.
    pub fn new(
        repository: Arc<dyn UrlRepository>,
        click_sender: mpsc::Sender<ClickEvent>,
        base_url: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            repository,
            click_sender,
            base_url,
        }
    }

    /// Creates a short code for a URL, reusing an existing one if present.
    ///
    /// The URL is normalized before lookup and storage, so `example.com` and
    /// `https://example.com` share a code.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the URL fails validation
    /// - [`AppError::CodeGenerationFailed`] if every candidate collided
    /// - [`AppError::CodeAlreadyExists`] if a concurrent insert won the race
    /// - [`AppError::Store`] on database errors
    pub async fn create_short_url(&self, original_url: &str) -> Result<String, AppError> {
        validate_url(original_url).map_err(|_| AppError::InvalidUrl)?;
        let normalized_url = normalize_url(original_url);

        if let Some(existing) = self
            .repository
            .find_by_original_url(&normalized_url)
            .await?
        {
            tracing::debug!(code = %existing.short_code, "URL already shortened, reusing code");
            return Ok(existing.short_code);
        }

        let code = self.generate_unique_code().await?;

        let record = self
            .repository
            .insert(NewUrl {
                original_url: normalized_url,
                short_code: code,
            })
            .await
            .map_err(|e| match e {
                // Generated codes are not reported back to the caller
                AppError::CodeAlreadyExists(_) => AppError::CodeAlreadyExists(String::new()),
                other => other,
            })?;

        tracing::info!(code = %record.short_code, "Short URL created");
        Ok(record.short_code)
    }

    /// Creates a short URL under a caller-chosen code.
    ///
    /// Unlike [`Self::create_short_url`], a URL that is already shortened is
    /// a conflict here rather than a reuse.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] if the URL fails validation
    /// - [`AppError::InvalidCustomCode`] naming the broken rule
    /// - [`AppError::CodeAlreadyExists`] if the code is taken
    /// - [`AppError::UrlAlreadyShortened`] if the URL has another code
    /// - [`AppError::Store`] on database errors
    pub async fn create_short_url_with_custom_code(
        &self,
        original_url: &str,
        custom_code: &str,
    ) -> Result<String, AppError> {
        validate_url(original_url).map_err(|_| AppError::InvalidUrl)?;
        validate_custom_code(custom_code)
            .map_err(|e| AppError::InvalidCustomCode(e.to_string()))?;

        let normalized_url = normalize_url(original_url);

        if self.repository.code_exists(custom_code).await? {
            return Err(AppError::CodeAlreadyExists(custom_code.to_string()));
        }

        if let Some(existing) = self
            .repository
            .find_by_original_url(&normalized_url)
            .await?
        {
            return Err(AppError::UrlAlreadyShortened {
                existing_code: existing.short_code,
            });
        }

        let record = self
            .repository
            .insert(NewUrl {
                original_url: normalized_url,
                short_code: custom_code.to_string(),
            })
            .await?;

        tracing::info!(code = %record.short_code, "Short URL created with custom code");
        Ok(record.short_code)
    }

    /// Resolves a short code to its original URL.
    ///
    /// Queues a click statistics update without waiting for it. If the queue
    /// is full or closed the update is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UrlNotFound`] if the code is empty or unknown.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn get_original_url(&self, code: &str) -> Result<String, AppError> {
        if code.is_empty() {
            return Err(AppError::UrlNotFound);
        }

        let record = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or(AppError::UrlNotFound)?;

        match self.click_sender.try_send(ClickEvent::new(record.id)) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                tracing::warn!(url_id = event.url_id, "Click queue full, dropping event");
            }
            Err(TrySendError::Closed(event)) => {
                tracing::warn!(url_id = event.url_id, "Click queue closed, dropping event");
            }
        }

        Ok(record.original_url)
    }

    /// Returns usage statistics for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UrlNotFound`] if the code is empty or unknown.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn get_url_stats(&self, code: &str) -> Result<UrlStats, AppError> {
        if code.is_empty() {
            return Err(AppError::UrlNotFound);
        }

        self.repository
            .find_by_code(code)
            .await?
            .map(UrlStats::from)
            .ok_or(AppError::UrlNotFound)
    }

    /// Deletes a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::UrlNotFound`] if the code is empty or nothing was deleted.
    /// Returns [`AppError::Store`] on database errors.
    pub async fn delete_url(&self, code: &str) -> Result<(), AppError> {
        if code.is_empty() {
            return Err(AppError::UrlNotFound);
        }

        if !self.repository.delete_by_code(code).await? {
            return Err(AppError::UrlNotFound);
        }

        tracing::info!(code, "Short URL deleted");
        Ok(())
    }

    /// Counts stored short URLs.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Store`] on database errors.
    pub async fn count_urls(&self) -> Result<i64, AppError> {
        self.repository.count().await
    }

    /// Constructs the public short URL for a code.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Generates a code not yet present in the store.
    ///
    /// Attempts up to [`MAX_GENERATION_ATTEMPTS`] times before failing.
    async fn generate_unique_code(&self) -> Result<String, AppError> {
        for _ in 0..MAX_GENERATION_ATTEMPTS {
            let code =
                generate_code(CODE_LENGTH).map_err(|e| AppError::Generation(e.to_string()))?;

            if !self.repository.code_exists(&code).await? {
                return Ok(code);
            }

            tracing::debug!(code, "Generated code collided, retrying");
        }

        Err(AppError::CodeGenerationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UrlRecord;
    use crate::domain::repositories::MockUrlRepository;
    use chrono::Utc;

    fn create_test_record(id: i64, code: &str, url: &str) -> UrlRecord {
        UrlRecord::new(id, url.to_string(), code.to_string(), Utc::now(), None, 0)
    }

    fn create_service(mock_repo: MockUrlRepository) -> (UrlService, mpsc::Receiver<ClickEvent>) {
        let (tx, rx) = mpsc::channel(16);
        let service = UrlService::new(Arc::new(mock_repo), tx, "http://localhost:8080/");
        (service, rx)
    }

    #[tokio::test]
    async fn test_create_short_url_success() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_original_url()
            .withf(|url| url == "https://example.com")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_code_exists()
            .times(1)
            .returning(|_| Ok(false));

        mock_repo
            .expect_insert()
            .withf(|new_url| {
                new_url.original_url == "https://example.com"
                    && new_url.short_code.len() == CODE_LENGTH
                    && new_url.short_code.chars().all(|c| c.is_ascii_alphanumeric())
            })
            .times(1)
            .returning(|new_url| Ok(create_test_record(1, &new_url.short_code, &new_url.original_url)));

        let (service, _rx) = create_service(mock_repo);

        let code = service.create_short_url("example.com").await.unwrap();
        assert_eq!(code.len(), CODE_LENGTH);
    }

    #[tokio::test]
    async fn test_create_short_url_reuses_existing_code() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_original_url()
            .withf(|url| url == "https://example.com")
            .times(1)
            .returning(|_| Ok(Some(create_test_record(5, "exist1", "https://example.com"))));

        mock_repo.expect_code_exists().times(0);
        mock_repo.expect_insert().times(0);

        let (service, _rx) = create_service(mock_repo);

        let code = service.create_short_url("https://example.com").await.unwrap();
        assert_eq!(code, "exist1");
    }

    #[tokio::test]
    async fn test_create_short_url_invalid_url() {
        let mock_repo = MockUrlRepository::new();
        let (service, _rx) = create_service(mock_repo);

        let result = service.create_short_url("not a url").await;
        assert!(matches!(result, Err(AppError::InvalidUrl)));

        let result = service.create_short_url("").await;
        assert!(matches!(result, Err(AppError::InvalidUrl)));
    }

    #[tokio::test]
    async fn test_create_short_url_retries_on_collision() {
        let mut mock_repo = MockUrlRepository::new();
        let mut seq = mockall::Sequence::new();

        mock_repo
            .expect_find_by_original_url()
            .returning(|_| Ok(None));

        mock_repo
            .expect_code_exists()
            .times(2)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        mock_repo
            .expect_code_exists()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));

        mock_repo
            .expect_insert()
            .times(1)
            .returning(|new_url| Ok(create_test_record(3, &new_url.short_code, &new_url.original_url)));

        let (service, _rx) = create_service(mock_repo);

        assert!(service.create_short_url("https://example.com").await.is_ok());
    }

    #[tokio::test]
    async fn test_create_short_url_exhausts_attempts() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_original_url()
            .returning(|_| Ok(None));

        mock_repo
            .expect_code_exists()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|_| Ok(true));

        mock_repo.expect_insert().times(0);

        let (service, _rx) = create_service(mock_repo);

        let result = service.create_short_url("https://example.com").await;
        assert!(matches!(result, Err(AppError::CodeGenerationFailed)));
    }

    #[tokio::test]
    async fn test_create_short_url_lost_insert_race() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_original_url()
            .returning(|_| Ok(None));
        mock_repo.expect_code_exists().returning(|_| Ok(false));
        mock_repo
            .expect_insert()
            .returning(|new_url| Err(AppError::CodeAlreadyExists(new_url.short_code)));

        let (service, _rx) = create_service(mock_repo);

        let result = service.create_short_url("https://example.com").await;
        assert!(matches!(result, Err(AppError::CodeAlreadyExists(ref code)) if code.is_empty()));

        let info = result.unwrap_err().to_error_info();
        assert_eq!(info.message, "The short code is already in use");
    }

    #[tokio::test]
    async fn test_create_short_url_store_error() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_original_url()
            .returning(|_| Err(AppError::Store("connection refused".into())));

        let (service, _rx) = create_service(mock_repo);

        let result = service.create_short_url("https://example.com").await;
        assert!(matches!(result, Err(AppError::Store(_))));
    }

    #[tokio::test]
    async fn test_custom_code_success() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_code_exists()
            .withf(|code| code == "my-code_1")
            .times(1)
            .returning(|_| Ok(false));
        mock_repo
            .expect_find_by_original_url()
            .times(1)
            .returning(|_| Ok(None));
        mock_repo
            .expect_insert()
            .withf(|new_url| {
                *new_url
                    == NewUrl {
                        original_url: "https://example.com/page".to_string(),
                        short_code: "my-code_1".to_string(),
                    }
            })
            .times(1)
            .returning(|new_url| Ok(create_test_record(9, &new_url.short_code, &new_url.original_url)));

        let (service, _rx) = create_service(mock_repo);

        let code = service
            .create_short_url_with_custom_code("example.com/page", "my-code_1")
            .await
            .unwrap();
        assert_eq!(code, "my-code_1");
    }

    #[tokio::test]
    async fn test_custom_code_invalid() {
        let mock_repo = MockUrlRepository::new();
        let (service, _rx) = create_service(mock_repo);

        for code in ["ab", "abc$de", "Admin"] {
            let result = service
                .create_short_url_with_custom_code("https://example.com", code)
                .await;
            assert!(
                matches!(result, Err(AppError::InvalidCustomCode(_))),
                "code {code} should be rejected"
            );
        }
    }

    #[tokio::test]
    async fn test_custom_code_invalid_url_reported_first() {
        let mock_repo = MockUrlRepository::new();
        let (service, _rx) = create_service(mock_repo);

        let result = service
            .create_short_url_with_custom_code("", "valid-code")
            .await;
        assert!(matches!(result, Err(AppError::InvalidUrl)));
    }

    #[tokio::test]
    async fn test_custom_code_taken() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_code_exists()
            .withf(|code| code == "taken")
            .returning(|_| Ok(true));
        mock_repo.expect_insert().times(0);

        let (service, _rx) = create_service(mock_repo);

        let result = service
            .create_short_url_with_custom_code("https://example.com", "taken")
            .await;
        assert!(matches!(result, Err(AppError::CodeAlreadyExists(code)) if code == "taken"));
    }

    #[tokio::test]
    async fn test_custom_code_url_already_shortened() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo.expect_code_exists().returning(|_| Ok(false));
        mock_repo
            .expect_find_by_original_url()
            .returning(|_| Ok(Some(create_test_record(2, "Xy12Ab", "https://example.com"))));
        mock_repo.expect_insert().times(0);

        let (service, _rx) = create_service(mock_repo);

        let result = service
            .create_short_url_with_custom_code("https://example.com", "fresh")
            .await;
        assert!(matches!(
            result,
            Err(AppError::UrlAlreadyShortened { existing_code }) if existing_code == "Xy12Ab"
        ));
    }

    #[tokio::test]
    async fn test_get_original_url_queues_click() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_code()
            .withf(|code| code == "abc123")
            .returning(|_| Ok(Some(create_test_record(11, "abc123", "https://example.com"))));
        mock_repo.expect_record_access().times(0);

        let (service, mut rx) = create_service(mock_repo);

        let url = service.get_original_url("abc123").await.unwrap();
        assert_eq!(url, "https://example.com");

        let event = rx.try_recv().unwrap();
        assert_eq!(event.url_id, 11);
    }

    #[tokio::test]
    async fn test_get_original_url_does_not_block_on_full_queue() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_code()
            .returning(|_| Ok(Some(create_test_record(1, "abc123", "https://example.com"))));

        let (tx, mut rx) = mpsc::channel(1);
        let service = UrlService::new(Arc::new(mock_repo), tx, "http://localhost:8080");

        assert!(service.get_original_url("abc123").await.is_ok());
        assert!(service.get_original_url("abc123").await.is_ok());

        assert!(rx.try_recv().is_ok());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_get_original_url_with_closed_queue() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo
            .expect_find_by_code()
            .returning(|_| Ok(Some(create_test_record(1, "abc123", "https://example.com"))));

        let (service, rx) = create_service(mock_repo);
        drop(rx);

        assert_eq!(
            service.get_original_url("abc123").await.unwrap(),
            "https://example.com"
        );
    }

    #[tokio::test]
    async fn test_get_original_url_not_found() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo.expect_find_by_code().returning(|_| Ok(None));

        let (service, mut rx) = create_service(mock_repo);

        let result = service.get_original_url("missing").await;
        assert!(matches!(result, Err(AppError::UrlNotFound)));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_empty_code_never_reaches_store() {
        let mut mock_repo = MockUrlRepository::new();
        mock_repo.expect_find_by_code().times(0);
        mock_repo.expect_delete_by_code().times(0);

        let (service, _rx) = create_service(mock_repo);

        assert!(matches!(
            service.get_original_url("").await,
            Err(AppError::UrlNotFound)
        ));
        assert!(matches!(
            service.get_url_stats("").await,
            Err(AppError::UrlNotFound)
        ));
        assert!(matches!(
            service.delete_url("").await,
            Err(AppError::UrlNotFound)
        ));
    }

    #[tokio::test]
    async fn test_get_url_stats() {
        let mut mock_repo = MockUrlRepository::new();

        mock_repo.expect_find_by_code().returning(|_| {
            let mut record = create_test_record(4, "stat42", "https://example.com");
            record.click_count = 17;
            Ok(Some(record))
        });

        let (service, _rx) = create_service(mock_repo);

        let stats = service.get_url_stats("stat42").await.unwrap();
        assert_eq!(stats.short_code, "stat42");
        assert_eq!(stats.original_url, "https://example.com");
        assert_eq!(stats.click_count, 17);
        assert!(stats.last_accessed.is_none());
    }

    #[tokio::test]
    async fn test_delete_url() {
        let mut mock_repo = MockUrlRepository::new();
        let mut seq = mockall::Sequence::new();

        mock_repo
            .expect_delete_by_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(true));
        mock_repo
            .expect_delete_by_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(false));

        let (service, _rx) = create_service(mock_repo);

        assert!(service.delete_url("gone").await.is_ok());
        assert!(matches!(
            service.delete_url("gone").await,
            Err(AppError::UrlNotFound)
        ));
    }

    #[test]
    fn test_short_url_strips_trailing_slash() {
        let (service, _rx) = create_service(MockUrlRepository::new());
        assert_eq!(service.short_url("abc123"), "http://localhost:8080/abc123");
    }
}
