//! Payroll services for the Payroll Formula Engine.
//!
//! This module contains the [`PayrollRecorder`], which evaluates category
//! formulas for employees and records the results as payroll snapshots.

mod recorder;

pub use recorder::PayrollRecorder;
