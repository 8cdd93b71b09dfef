//! Bounded waits around document store calls.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::warn;

use super::document::{Document, DocumentStore, StoreError, StoreResult, StoredDocument};

/// The default bound on a single store call.
pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(10);

/// A [`DocumentStore`] that fails any call running longer than a fixed bound.
///
/// A call that exceeds the bound is abandoned and reported as
/// [`StoreError::Timeout`]; it is never retried.
#[derive(Clone)]
pub struct TimedDocumentStore {
    inner: Arc<dyn DocumentStore>,
    timeout: Duration,
}

impl TimedDocumentStore {
    /// Wraps `inner` so that every call is bounded by `timeout`.
    pub fn new(inner: Arc<dyn DocumentStore>, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    /// Returns the configured bound.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    async fn bounded<T>(
        &self,
        operation: &str,
        collection: &str,
        call: impl Future<Output = StoreResult<T>> + Send,
    ) -> StoreResult<T> {
        match tokio::time::timeout(self.timeout, call).await {
            Ok(result) => result,
            Err(_) => {
                let timeout_ms = self.timeout.as_millis() as u64;
                warn!(operation, collection, timeout_ms, "Document store call timed out");
                Err(StoreError::Timeout {
                    operation: operation.to_string(),
                    collection: collection.to_string(),
                    timeout_ms,
                })
            }
        }
    }
}

#[async_trait]
impl DocumentStore for TimedDocumentStore {
    async fn create(&self, collection: &str, document: Document) -> StoreResult<String> {
        self.bounded("create", collection, self.inner.create(collection, document))
            .await
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<StoredDocument>> {
        self.bounded("get", collection, self.inner.get(collection, id))
            .await
    }

    async fn get_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        self.bounded("get_all", collection, self.inner.get_all(collection))
            .await
    }

    async fn get_by_query(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<StoredDocument>> {
        self.bounded(
            "get_by_query",
            collection,
            self.inner.get_by_query(collection, field, value),
        )
        .await
    }

    async fn update(&self, collection: &str, id: &str, partial: Document) -> StoreResult<bool> {
        self.bounded("update", collection, self.inner.update(collection, id, partial))
            .await
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        self.bounded("delete", collection, self.inner.delete(collection, id))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryDocumentStore;

    #[tokio::test]
    async fn test_fast_call_passes_through() {
        let inner = Arc::new(InMemoryDocumentStore::new());
        let store = TimedDocumentStore::new(inner.clone(), Duration::from_secs(1));

        let id = store.create("things", Document::new()).await.unwrap();
        assert!(store.get("things", &id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_slow_call_times_out() {
        let inner = Arc::new(InMemoryDocumentStore::new());
        inner.set_latency(Duration::from_millis(500));
        let store = TimedDocumentStore::new(inner, Duration::from_millis(20));

        let result = store.get_all("payrolls").await;
        assert_eq!(
            result,
            Err(StoreError::Timeout {
                operation: "get_all".to_string(),
                collection: "payrolls".to_string(),
                timeout_ms: 20,
            })
        );
    }

    #[tokio::test]
    async fn test_timed_out_create_writes_nothing() {
        let inner = Arc::new(InMemoryDocumentStore::new());
        inner.set_latency(Duration::from_millis(500));
        let store = TimedDocumentStore::new(inner.clone(), Duration::from_millis(20));

        assert!(store.create("payrolls", Document::new()).await.is_err());
        assert_eq!(inner.count("payrolls").await, 0);
    }

    #[tokio::test]
    async fn test_inner_errors_are_not_masked() {
        let inner = Arc::new(InMemoryDocumentStore::new());
        inner.set_unavailable(true);
        let store = TimedDocumentStore::new(inner, Duration::from_secs(1));

        assert!(matches!(
            store.get_all("things").await,
            Err(StoreError::Unavailable(_))
        ));
    }
}
