//! Formula evaluation.
//!
//! Walks a parsed [`Formula`] with `base_salary` bound to a concrete value.
//! Evaluation uses `f64` throughout and never rounds; presenting the result
//! as currency is left to the caller.

use crate::error::{EngineError, EngineResult};

use super::parser::{BinaryOp, Formula, parse};

impl Formula {
    /// Evaluates the formula with `base_salary` bound to `base_salary`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::DivisionByZero`] if a denominator evaluates to zero
    /// - [`EngineError::CalculationError`] if the result is not finite
    pub fn evaluate(&self, base_salary: f64) -> EngineResult<f64> {
        let result = self.eval_node(base_salary)?;
        if !result.is_finite() {
            return Err(EngineError::CalculationError {
                message: format!("formula '{}' produced a non-finite result", self),
            });
        }
        Ok(result)
    }

    fn eval_node(&self, base_salary: f64) -> EngineResult<f64> {
        match self {
            Self::Literal { value } => Ok(*value),
            Self::Variable => Ok(base_salary),
            Self::Negate { operand } => Ok(-operand.eval_node(base_salary)?),
            Self::Binary { op, left, right } => {
                let lhs = left.eval_node(base_salary)?;
                let rhs = right.eval_node(base_salary)?;
                match op {
                    BinaryOp::Add => Ok(lhs + rhs),
                    BinaryOp::Subtract => Ok(lhs - rhs),
                    BinaryOp::Multiply => Ok(lhs * rhs),
                    BinaryOp::Divide => {
                        if rhs == 0.0 {
                            return Err(EngineError::DivisionByZero);
                        }
                        Ok(lhs / rhs)
                    }
                }
            }
        }
    }
}

/// Parses and evaluates formula text against a base salary.
///
/// The text is interpreted strictly under the formula grammar: the only
/// identifier is `base_salary`, and no input is ever executed.
///
/// # Errors
///
/// - [`EngineError::Validation`] if `base_salary` is not finite
/// - [`EngineError::Syntax`] if the text does not parse
/// - [`EngineError::DivisionByZero`] if a denominator evaluates to zero
/// - [`EngineError::CalculationError`] if the result is not finite
///
/// # Examples
///
/// ```
/// use payroll_engine::formula::evaluate;
///
/// assert_eq!(evaluate("(base_salary + 10) * 2", 5.0).unwrap(), 30.0);
/// assert!(evaluate("base_salary; deleteAll()", 100.0).is_err());
/// ```
pub fn evaluate(formula_text: &str, base_salary: f64) -> EngineResult<f64> {
    if !base_salary.is_finite() {
        return Err(EngineError::validation(
            "base_salary",
            format!("must be a finite number, got {}", base_salary),
        ));
    }
    parse(formula_text)?.evaluate(base_salary)
}
