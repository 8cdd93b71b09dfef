//! Core data models for the Payroll Formula Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod payroll_record;
mod salary_calculation;
mod salary_category;

pub use employee::Employee;
pub use payroll_record::{PayrollRecord, PayrollSummary};
pub use salary_calculation::SalaryCalculation;
pub use salary_category::SalaryCategory;
