//! In-memory document store for development and testing.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::EngineResult;
use crate::models::Employee;

use super::document::{
    Document, DocumentStore, StoreError, StoreResult, StoredDocument, collections, encode,
};

/// An in-memory [`DocumentStore`].
///
/// Besides holding documents, the store can simulate an unreachable backend,
/// a backend that refuses writes, and network latency, so failure handling
/// can be exercised without a real database.
#[derive(Debug, Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, BTreeMap<String, Document>>>,
    unavailable: AtomicBool,
    read_only: AtomicBool,
    latency_ms: AtomicU64,
}

impl InMemoryDocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent operation fail as unreachable (or succeed again).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Makes every subsequent write be rejected while reads keep working.
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }

    /// Delays every subsequent operation by `latency`.
    pub fn set_latency(&self, latency: Duration) {
        self.latency_ms
            .store(latency.as_millis() as u64, Ordering::SeqCst);
    }

    /// Inserts or replaces a document under a caller-chosen id.
    pub async fn insert_with_id(&self, collection: &str, id: &str, document: Document) {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), document);
    }

    /// Preloads employees into the `employees` collection.
    ///
    /// Employees without an id get a generated one. Returns the number of
    /// documents written.
    pub async fn seed_employees(&self, employees: &[Employee]) -> EngineResult<usize> {
        for employee in employees {
            let id = if employee.id.trim().is_empty() {
                Uuid::new_v4().simple().to_string()
            } else {
                employee.id.clone()
            };
            self.insert_with_id(collections::EMPLOYEES, &id, encode(employee)?)
                .await;
        }
        Ok(employees.len())
    }

    /// Returns the number of documents in a collection.
    pub async fn count(&self, collection: &str) -> usize {
        let collections = self.collections.read().await;
        collections.get(collection).map_or(0, BTreeMap::len)
    }

    async fn simulate(&self) -> StoreResult<()> {
        let latency = self.latency_ms.load(Ordering::SeqCst);
        if latency > 0 {
            tokio::time::sleep(Duration::from_millis(latency)).await;
        }
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(
                "in-memory store is offline".to_string(),
            ));
        }
        Ok(())
    }

    async fn simulate_write(&self, operation: &str, collection: &str) -> StoreResult<()> {
        self.simulate().await?;
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected {
                operation: operation.to_string(),
                collection: collection.to_string(),
                message: "store is read-only".to_string(),
            });
        }
        Ok(())
    }
}

fn to_stored(id: &str, data: &Document) -> StoredDocument {
    StoredDocument {
        id: id.to_string(),
        data: data.clone(),
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(&self, collection: &str, document: Document) -> StoreResult<String> {
        self.simulate_write("create", collection).await?;
        let id = Uuid::new_v4().simple().to_string();
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.clone(), document);
        Ok(id)
    }

    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<StoredDocument>> {
        self.simulate().await?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|docs| docs.get(id))
            .map(|data| to_stored(id, data)))
    }

    async fn get_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>> {
        self.simulate().await?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().map(|(id, data)| to_stored(id, data)).collect())
            .unwrap_or_default())
    }

    async fn get_by_query(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<StoredDocument>> {
        self.simulate().await?;
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .filter(|(_, data)| data.get(field) == Some(value))
                    .map(|(id, data)| to_stored(id, data))
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update(&self, collection: &str, id: &str, partial: Document) -> StoreResult<bool> {
        self.simulate_write("update", collection).await?;
        let mut collections = self.collections.write().await;
        match collections.get_mut(collection).and_then(|docs| docs.get_mut(id)) {
            Some(existing) => {
                existing.extend(partial);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool> {
        self.simulate_write("delete", collection).await?;
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .is_some_and(|docs| docs.remove(id).is_some()))
    }
}
