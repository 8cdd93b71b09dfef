//! Request types for the Payroll Formula Engine API.
//!
//! This module defines the JSON request bodies accepted by the endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A form value that may arrive as a JSON number or as typed text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    /// A JSON number.
    Number(f64),
    /// Text exactly as entered.
    Text(String),
}

impl FormValue {
    /// Returns the value as text for validation.
    pub fn to_text(&self) -> String {
        match self {
            Self::Number(value) => value.to_string(),
            Self::Text(text) => text.clone(),
        }
    }
}

/// Request body for `POST /formulas/build`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildFormulaRequest {
    /// A sample base salary for the preview.
    pub base_salary: FormValue,
    /// The allowance fraction, e.g. `0.2`.
    pub percentage: FormValue,
    /// The flat deduction.
    pub deductions: FormValue,
}

/// Request body for `POST /formulas/evaluate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// The formula text.
    pub formula: String,
    /// The value bound to `base_salary`.
    pub base_salary: f64,
}

/// Request body for `POST /categories`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategoryRequest {
    /// The category label.
    pub category_name: String,
    /// The formula text.
    pub formula: String,
}

/// Request body for `POST /payrolls/compute`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputeSalaryRequest {
    /// The business-level employee number.
    #[serde(rename = "empNo")]
    pub emp_no: String,
    /// The salary category id.
    pub category_id: String,
}

/// Request body for `POST /payrolls`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecordPayrollRequest {
    /// The business-level employee number.
    #[serde(rename = "empNo")]
    pub emp_no: String,
    /// The salary category id.
    pub category_id: String,
    /// The payroll date, `YYYY-MM-DD`.
    pub payroll_date: NaiveDate,
}

/// Query parameters for the delete endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteParams {
    /// Fail with 404 when the id does not exist.
    #[serde(default)]
    pub strict: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_request_accepts_numbers_and_text() {
        let json = r#"{"base_salary": 50000, "percentage": "0.2", "deductions": " 500 "}"#;
        let request: BuildFormulaRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.base_salary, FormValue::Number(50000.0));
        assert_eq!(request.base_salary.to_text(), "50000");
        assert_eq!(request.percentage.to_text(), "0.2");
        assert_eq!(request.deductions.to_text(), " 500 ");
    }

    #[test]
    fn test_record_payroll_request_uses_emp_no_field() {
        let json = r#"{"empNo": "E001", "category_id": "cat_1", "payroll_date": "2026-01-31"}"#;
        let request: RecordPayrollRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.emp_no, "E001");
        assert_eq!(
            request.payroll_date,
            NaiveDate::from_ymd_opt(2026, 1, 31).unwrap()
        );
    }

    #[test]
    fn test_record_payroll_request_requires_date() {
        let json = r#"{"empNo": "E001", "category_id": "cat_1"}"#;
        let result: Result<RecordPayrollRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
