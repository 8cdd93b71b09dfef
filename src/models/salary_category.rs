//! Salary category model.

use serde::{Deserialize, Serialize};

/// A named salary formula.
///
/// Categories are immutable once saved. Payroll records copy the category
/// name, so deleting a category never alters payroll already recorded.
///
/// # Example
///
/// ```
/// use payroll_engine::models::SalaryCategory;
///
/// let category = SalaryCategory {
///     id: "cat_001".to_string(),
///     category_name: "Executive".to_string(),
///     formula: "base_salary + (base_salary * 0.2) - 500".to_string(),
/// };
/// assert_eq!(category.category_name, "Executive");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryCategory {
    /// The store-assigned document id.
    #[serde(default)]
    pub id: String,
    /// The human-readable category label.
    pub category_name: String,
    /// The formula text over `base_salary`.
    pub formula: String,
}
