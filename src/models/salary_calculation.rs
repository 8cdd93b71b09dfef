//! Salary calculation result model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The outcome of evaluating a category formula for one employee.
///
/// A calculation is not persisted by itself; recording payroll turns it
/// into a [`PayrollRecord`](super::PayrollRecord).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryCalculation {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// The business-level employee number.
    #[serde(rename = "empNo")]
    pub emp_no: String,
    /// The id of the category whose formula was used.
    pub category_id: String,
    /// The category name at calculation time.
    pub category_name: String,
    /// The formula text that was evaluated.
    pub formula: String,
    /// The employee's base salary bound to `base_salary`.
    pub base_salary: f64,
    /// The evaluated result.
    pub calculated_salary: f64,
    /// Time spent resolving and evaluating, in microseconds.
    pub duration_us: u64,
}
