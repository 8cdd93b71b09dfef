//! Persistence for the Payroll Formula Engine.
//!
//! This module defines the [`DocumentStore`] seam, an in-memory
//! implementation, a wrapper that bounds every call with a timeout, and the
//! collection-scoped facades the payroll services use.

mod document;
mod employee_directory;
mod formula_store;
mod memory;
mod timeout;

pub use document::{
    Document, DocumentStore, StoreError, StoreResult, StoredDocument, collections,
};
pub(crate) use document::{decode, encode};
pub use employee_directory::EmployeeDirectory;
pub use formula_store::FormulaStore;
pub use memory::InMemoryDocumentStore;
pub use timeout::{DEFAULT_STORE_TIMEOUT, TimedDocumentStore};
