//! Application state for the Payroll Formula Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::payroll::PayrollRecorder;
use crate::store::{DocumentStore, FormulaStore};

/// Shared application state.
///
/// Holds the services every handler needs. All of them talk to the same
/// injected document store.
#[derive(Clone)]
pub struct AppState {
    formulas: Arc<FormulaStore>,
    payroll: Arc<PayrollRecorder>,
}

impl AppState {
    /// Creates application state over the given document store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            formulas: Arc::new(FormulaStore::new(store.clone())),
            payroll: Arc::new(PayrollRecorder::new(store)),
        }
    }

    /// Returns the salary category store.
    pub fn formulas(&self) -> &FormulaStore {
        &self.formulas
    }

    /// Returns the payroll recorder.
    pub fn payroll(&self) -> &PayrollRecorder {
        &self.payroll
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_clone() {
        // Verify AppState can be cloned (required for axum state)
        fn assert_clone<T: Clone + Send + Sync + 'static>() {}
        assert_clone::<AppState>();
    }
}
