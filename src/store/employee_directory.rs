//! Read-only access to employees.

use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::Employee;

use super::document::{DocumentStore, collections, decode};

/// Looks employees up by their business-level number in the `employees`
/// collection. The directory never writes.
#[derive(Clone)]
pub struct EmployeeDirectory {
    store: Arc<dyn DocumentStore>,
}

impl EmployeeDirectory {
    /// Creates a directory over `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Finds the employee with the given `empNo`, if any.
    ///
    /// If several documents share the number, the first one returned by the
    /// store wins.
    pub async fn find(&self, emp_no: &str) -> EngineResult<Option<Employee>> {
        let matches = self
            .store
            .get_by_query(
                collections::EMPLOYEES,
                "empNo",
                &Value::String(emp_no.to_string()),
            )
            .await?;
        if matches.len() > 1 {
            warn!(
                emp_no = %emp_no,
                matches = matches.len(),
                "Employee number is not unique, using first match"
            );
        }
        matches
            .into_iter()
            .next()
            .map(|stored| decode(collections::EMPLOYEES, stored))
            .transpose()
    }

    /// Gets the employee with the given `empNo`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if no employee has this number.
    pub async fn get(&self, emp_no: &str) -> EngineResult<Employee> {
        self.find(emp_no)
            .await?
            .ok_or_else(|| EngineError::not_found("employee", emp_no))
    }

    /// Lists every employee.
    pub async fn list(&self) -> EngineResult<Vec<Employee>> {
        let documents = self.store.get_all(collections::EMPLOYEES).await?;
        documents
            .into_iter()
            .map(|stored| decode(collections::EMPLOYEES, stored))
            .collect()
    }
}
