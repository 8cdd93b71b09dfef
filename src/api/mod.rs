//! HTTP API module for the Payroll Formula Engine.
//!
//! This module provides the REST endpoints for building and evaluating
//! formulas, managing salary categories and recording payroll.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{
    BuildFormulaRequest, ComputeSalaryRequest, CreateCategoryRequest, DeleteParams,
    EvaluateRequest, FormValue, RecordPayrollRequest,
};
pub use response::{ApiError, ApiErrorResponse, EvaluateResponse};
pub use state::AppState;
