//! Background worker applying click statistics updates.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::UrlRepository;

/// Drains click events and applies them through the repository.
///
/// Up to `concurrency` updates run at once. A failed update is logged and
/// dropped. The worker returns once every sender has been dropped and all
/// in-flight updates have finished.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<dyn UrlRepository>,
    concurrency: usize,
) {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let repository = repository.clone();
        tokio::spawn(async move {
            let _permit = permit;
            let result = repository
                .record_access(event.url_id, event.clicked_at)
                .await;
            if let Err(e) = result {
                tracing::warn!(
                    url_id = event.url_id,
                    error = %e,
                    "Failed to update click statistics"
                );
            }
        });
    }

    // Wait for in-flight updates before exiting
    let _ = permits.acquire_many(concurrency.max(1) as u32).await;
    tracing::info!("Click worker stopped");
}
