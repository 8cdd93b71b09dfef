//! Payroll Formula Engine
//!
//! This crate builds, validates and evaluates salary formulas over a single
//! `base_salary` variable, stores them as salary categories and records
//! payroll entries for employees in a document store.

#![warn(missing_docs)]

pub mod api;
pub mod config;
pub mod error;
pub mod formula;
pub mod models;
pub mod payroll;
pub mod store;
