//! Payroll record models.
//!
//! This module contains the [`PayrollRecord`] persisted for each payroll run
//! and the [`PayrollSummary`] view that joins a record with the employee's
//! display name.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A frozen snapshot of one computed salary for one employee on one date.
///
/// The category name and amount are copied at calculation time and are
/// never updated afterwards.
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayrollRecord;
/// use chrono::NaiveDate;
///
/// let record = PayrollRecord {
///     id: "pay_001".to_string(),
///     emp_no: "E001".to_string(),
///     category_name: "Executive".to_string(),
///     calculated_salary: 59500.0,
///     payroll_date: NaiveDate::from_ymd_opt(2026, 1, 31).unwrap(),
/// };
/// assert_eq!(record.calculated_salary, 59500.0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRecord {
    /// The store-assigned document id.
    #[serde(default)]
    pub id: String,
    /// The business-level employee number.
    #[serde(rename = "empNo")]
    pub emp_no: String,
    /// The name of the category used, as it was at calculation time.
    pub category_name: String,
    /// The computed salary.
    pub calculated_salary: f64,
    /// The date of the payroll run.
    pub payroll_date: NaiveDate,
}

/// A payroll record joined with the employee it was computed for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollSummary {
    /// The payroll record.
    #[serde(flatten)]
    pub record: PayrollRecord,
    /// The employee's display name, or `None` if the employee no longer exists.
    pub employee_name: Option<String>,
}
