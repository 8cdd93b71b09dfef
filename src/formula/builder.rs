//! Formula construction from user-entered values.
//!
//! A salary category is defined on a form by a sample base salary, an
//! allowance percentage and a flat deduction. The builder validates that
//! text and composes the standard formula
//! `base_salary + (base_salary * <percentage>) - <deductions>`, leaving
//! `base_salary` as the placeholder that is bound at evaluation time.

use serde::Serialize;

use crate::error::{EngineError, EngineResult};

use super::lexer::BASE_SALARY_VARIABLE;
use super::parser::parse;

/// A formula composed by [`build_formula`], with a preview evaluation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltFormula {
    /// The formula text, ready to be stored on a salary category.
    pub formula: String,
    /// The formula evaluated against the base salary that was entered.
    pub preview: f64,
}

/// Composes the standard formula text from numeric percentage and deductions.
///
/// The caller is responsible for passing finite values; [`build_formula`]
/// performs that validation for text input.
///
/// # Example
///
/// ```
/// use payroll_engine::formula::compose_formula;
///
/// assert_eq!(
///     compose_formula(0.2, 500.0),
///     "base_salary + (base_salary * 0.2) - 500"
/// );
/// ```
pub fn compose_formula(percentage: f64, deductions: f64) -> String {
    format!(
        "{var} + ({var} * {percentage}) - {deductions}",
        var = BASE_SALARY_VARIABLE,
        percentage = percentage,
        deductions = deductions,
    )
}

/// Validates form input and builds a formula.
///
/// # Arguments
///
/// * `base_salary` - A sample base salary, used for the preview (must be `>= 0`)
/// * `percentage` - The allowance as a fraction, e.g. `"0.2"` for 20%
/// * `deductions` - A flat deduction (must be `>= 0`)
///
/// # Errors
///
/// Returns [`EngineError::Validation`] naming the offending field if any value
/// is not a finite number, or if `base_salary` or `deductions` is negative.
///
/// # Examples
///
/// ```
/// use payroll_engine::formula::build_formula;
///
/// let built = build_formula("50000", "0.2", "500").unwrap();
/// assert_eq!(built.formula, "base_salary + (base_salary * 0.2) - 500");
/// assert_eq!(built.preview, 59500.0);
/// ```
pub fn build_formula(
    base_salary: &str,
    percentage: &str,
    deductions: &str,
) -> EngineResult<BuiltFormula> {
    let base_salary = parse_input("base_salary", base_salary)?;
    let percentage = parse_input("percentage", percentage)?;
    let deductions = parse_input("deductions", deductions)?;

    require_non_negative("base_salary", base_salary)?;
    require_non_negative("deductions", deductions)?;

    let formula = compose_formula(percentage, deductions);
    let preview = parse(&formula)?.evaluate(base_salary)?;

    Ok(BuiltFormula { formula, preview })
}

/// Parses one form field into a finite number.
fn parse_input(field: &str, raw: &str) -> EngineResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(EngineError::validation(field, "a value is required"));
    }
    let value = trimmed
        .parse::<f64>()
        .map_err(|_| EngineError::validation(field, format!("not a number: '{}'", trimmed)))?;
    if !value.is_finite() {
        return Err(EngineError::validation(
            field,
            format!("must be a finite number, got '{}'", trimmed),
        ));
    }
    Ok(value)
}

fn require_non_negative(field: &str, value: f64) -> EngineResult<()> {
    if value < 0.0 {
        return Err(EngineError::validation(
            field,
            format!("must not be negative, got {}", value),
        ));
    }
    Ok(())
}
