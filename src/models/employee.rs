//! Employee model.
//!
//! Employees are owned by the employee management screens; the payroll
//! engine only reads them to resolve a base salary and a display name.

use serde::{Deserialize, Deserializer, Serialize};

/// An employee as stored in the `employees` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// The store-assigned document id.
    #[serde(default)]
    pub id: String,
    /// The business-level employee number.
    #[serde(rename = "empNo")]
    pub emp_no: String,
    /// The employee's display name.
    #[serde(default)]
    pub name: String,
    /// The employee's base salary.
    ///
    /// Stored either as a number or as the text typed into the employee
    /// form. A missing or empty value reads as zero.
    #[serde(default, deserialize_with = "deserialize_salary")]
    pub salary: f64,
    /// The employee's role, if recorded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// The name of the employee's department, if recorded.
    #[serde(
        rename = "departmentName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub department_name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SalaryField {
    Number(f64),
    Text(String),
}

fn deserialize_salary<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let field = Option::<SalaryField>::deserialize(deserializer)?;
    let value = match field {
        None => 0.0,
        Some(SalaryField::Number(value)) => value,
        Some(SalaryField::Text(text)) if text.trim().is_empty() => 0.0,
        Some(SalaryField::Text(text)) => text.trim().parse::<f64>().map_err(|_| {
            serde::de::Error::custom(format!("salary is not a number: '{}'", text))
        })?,
    };
    if !value.is_finite() || value < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "salary must be a non-negative finite number, got {}",
            value
        )));
    }
    Ok(value)
}
