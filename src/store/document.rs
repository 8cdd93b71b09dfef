//! Document store seam.
//!
//! The engine talks to its database through [`DocumentStore`], a small
//! collection/id interface shaped after the cloud document database the HRMS
//! screens use. Services receive the store explicitly so tests can hand them
//! an in-memory fake.

use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use thiserror::Error;

use crate::error::{EngineError, EngineResult};

/// The field map of a stored document.
pub type Document = Map<String, Value>;

/// Collection names used by the engine.
pub mod collections {
    /// Salary categories and their formulas.
    pub const SALARY_CATEGORIES: &str = "salaryCategories";
    /// Recorded payroll snapshots.
    pub const PAYROLLS: &str = "payrolls";
    /// Employees, read-only from the engine's perspective.
    pub const EMPLOYEES: &str = "employees";
}

/// A document together with its store-assigned id.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredDocument {
    /// The document id.
    pub id: String,
    /// The document fields.
    pub data: Document,
}

/// Errors reported by a [`DocumentStore`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// The store could not be reached.
    #[error("document store unavailable: {0}")]
    Unavailable(String),

    /// The store refused the operation.
    #[error("document store rejected {operation} on '{collection}': {message}")]
    Rejected {
        /// The refused operation.
        operation: String,
        /// The collection the operation targeted.
        collection: String,
        /// The reason given by the store.
        message: String,
    },

    /// The operation did not complete within the bounded wait.
    #[error("document store {operation} on '{collection}' timed out after {timeout_ms}ms")]
    Timeout {
        /// The operation that timed out.
        operation: String,
        /// The collection the operation targeted.
        collection: String,
        /// The bound, in milliseconds.
        timeout_ms: u64,
    },
}

impl From<StoreError> for EngineError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Timeout {
                operation,
                collection,
                timeout_ms,
            } => EngineError::Timeout {
                operation,
                collection,
                timeout_ms,
            },
            other => EngineError::Persistence {
                message: other.to_string(),
            },
        }
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// A collection-oriented document database.
///
/// Writes are last-write-wins; the trait offers no versioning.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Creates a document and returns its new id. The create is atomic.
    async fn create(&self, collection: &str, document: Document) -> StoreResult<String>;

    /// Gets a document by id.
    async fn get(&self, collection: &str, id: &str) -> StoreResult<Option<StoredDocument>>;

    /// Lists every document in a collection, in no particular order.
    async fn get_all(&self, collection: &str) -> StoreResult<Vec<StoredDocument>>;

    /// Lists the documents whose `field` equals `value`.
    async fn get_by_query(
        &self,
        collection: &str,
        field: &str,
        value: &Value,
    ) -> StoreResult<Vec<StoredDocument>>;

    /// Merges `partial` into an existing document. Returns false if the id does not exist.
    async fn update(&self, collection: &str, id: &str, partial: Document) -> StoreResult<bool>;

    /// Deletes a document. Returns false if the id did not exist.
    async fn delete(&self, collection: &str, id: &str) -> StoreResult<bool>;
}

/// Serializes a model into document fields, dropping its `id`.
pub(crate) fn encode<T: Serialize>(value: &T) -> EngineResult<Document> {
    match serde_json::to_value(value) {
        Ok(Value::Object(mut map)) => {
            map.remove("id");
            Ok(map)
        }
        Ok(other) => Err(EngineError::Persistence {
            message: format!("expected an object document, got {}", other),
        }),
        Err(e) => Err(EngineError::Persistence {
            message: format!("failed to encode document: {}", e),
        }),
    }
}

/// Deserializes a stored document into a model, restoring its `id`.
pub(crate) fn decode<T: DeserializeOwned>(
    collection: &str,
    stored: StoredDocument,
) -> EngineResult<T> {
    let StoredDocument { id, mut data } = stored;
    data.insert("id".to_string(), Value::String(id.clone()));
    serde_json::from_value(Value::Object(data)).map_err(|e| EngineError::Persistence {
        message: format!("malformed document '{}' in '{}': {}", id, collection, e),
    })
}
