//! Salary formula engine.
//!
//! This module builds, parses and evaluates the arithmetic formulas that
//! salary categories carry. Formulas range over a single free variable,
//! `base_salary`, and are interpreted under a closed grammar of numeric
//! literals, `+ - * /`, unary minus and parentheses. Formula text is never
//! handed to a general-purpose interpreter.

mod builder;
mod evaluator;
mod lexer;
mod parser;

pub use builder::{BuiltFormula, build_formula, compose_formula};
pub use evaluator::evaluate;
pub use lexer::{BASE_SALARY_VARIABLE, Token, TokenKind, tokenize};
pub use parser::{BinaryOp, Formula, MAX_FORMULA_TOKENS, MAX_NESTING_DEPTH, parse};
