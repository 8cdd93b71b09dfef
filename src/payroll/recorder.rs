//! Payroll computation and recording.
//!
//! The [`PayrollRecorder`] ties an employee, a salary category and a payroll
//! date together: it resolves the employee's base salary and the category's
//! formula, evaluates the formula, and persists a denormalized
//! [`PayrollRecord`]. Errors from lookups and from the evaluator are
//! propagated unchanged.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{NaiveDate, Utc};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{EngineError, EngineResult};
use crate::formula::parse;
use crate::models::{PayrollRecord, PayrollSummary, SalaryCalculation};
use crate::store::{
    DocumentStore, EmployeeDirectory, FormulaStore, collections, decode, encode,
};

/// Computes salaries and records payroll snapshots.
#[derive(Clone)]
pub struct PayrollRecorder {
    store: Arc<dyn DocumentStore>,
    formulas: FormulaStore,
    employees: EmployeeDirectory,
}

impl PayrollRecorder {
    /// Creates a recorder whose lookups and writes all go through `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            formulas: FormulaStore::new(store.clone()),
            employees: EmployeeDirectory::new(store.clone()),
            store,
        }
    }

    /// Computes the salary of employee `emp_no` under category `category_id`.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Validation`] if either key is blank
    /// - [`EngineError::NotFound`] if the employee or the category does not exist
    /// - [`EngineError::Syntax`], [`EngineError::DivisionByZero`] or
    ///   [`EngineError::CalculationError`] from the evaluator
    /// - [`EngineError::Persistence`] or [`EngineError::Timeout`] on store failure
    pub async fn compute_salary(
        &self,
        emp_no: &str,
        category_id: &str,
    ) -> EngineResult<SalaryCalculation> {
        let start_time = Instant::now();
        let emp_no = require_key("empNo", emp_no)?;
        let category_id = require_key("category_id", category_id)?;

        let employee = self.employees.get(emp_no).await?;
        let category = self.formulas.get(category_id).await?;
        let calculated_salary = parse(&category.formula)?.evaluate(employee.salary)?;

        let duration_us = start_time.elapsed().as_micros() as u64;
        debug!(
            emp_no = %emp_no,
            category_id = %category_id,
            base_salary = employee.salary,
            calculated_salary,
            duration_us,
            "Salary computed"
        );

        Ok(SalaryCalculation {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            emp_no: employee.emp_no,
            category_id: category.id,
            category_name: category.category_name,
            formula: category.formula,
            base_salary: employee.salary,
            calculated_salary,
            duration_us,
        })
    }

    /// Computes a salary and persists it as a payroll record.
    ///
    /// The record is written with a single create, so a failed write leaves
    /// no record behind.
    ///
    /// # Errors
    ///
    /// Every error of [`compute_salary`](Self::compute_salary), plus
    /// [`EngineError::Persistence`] or [`EngineError::Timeout`] if the write fails.
    pub async fn record_payroll(
        &self,
        emp_no: &str,
        category_id: &str,
        payroll_date: NaiveDate,
    ) -> EngineResult<PayrollRecord> {
        let calculation = self.compute_salary(emp_no, category_id).await?;

        let mut record = PayrollRecord {
            id: String::new(),
            emp_no: calculation.emp_no,
            category_name: calculation.category_name,
            calculated_salary: calculation.calculated_salary,
            payroll_date,
        };
        record.id = self
            .store
            .create(collections::PAYROLLS, encode(&record)?)
            .await?;

        info!(
            payroll_id = %record.id,
            emp_no = %record.emp_no,
            category_name = %record.category_name,
            calculated_salary = record.calculated_salary,
            payroll_date = %record.payroll_date,
            "Payroll recorded"
        );
        Ok(record)
    }

    /// Lists every payroll record, in no particular order.
    ///
    /// Documents that do not decode as a payroll record, such as entries
    /// saved without a calculated salary, are skipped with a warning.
    pub async fn list_payrolls(&self) -> EngineResult<Vec<PayrollRecord>> {
        let documents = self.store.get_all(collections::PAYROLLS).await?;
        let mut records = Vec::with_capacity(documents.len());
        for stored in documents {
            let id = stored.id.clone();
            match decode::<PayrollRecord>(collections::PAYROLLS, stored) {
                Ok(record) => records.push(record),
                Err(err) => warn!(
                    payroll_id = %id,
                    error = %err,
                    "Skipping unreadable payroll record"
                ),
            }
        }
        Ok(records)
    }

    /// Lists every payroll record with the name of its employee.
    ///
    /// Records whose employee no longer exists get `employee_name: None`.
    pub async fn list_payroll_summaries(&self) -> EngineResult<Vec<PayrollSummary>> {
        let records = self.list_payrolls().await?;
        let names: HashMap<String, String> = self
            .employees
            .list()
            .await?
            .into_iter()
            .map(|employee| (employee.emp_no, employee.name))
            .collect();

        Ok(records
            .into_iter()
            .map(|record| PayrollSummary {
                employee_name: names.get(&record.emp_no).cloned(),
                record,
            })
            .collect())
    }

    /// Deletes a payroll record. Deleting an id that does not exist succeeds.
    pub async fn delete_payroll(&self, id: &str) -> EngineResult<()> {
        let existed = self.store.delete(collections::PAYROLLS, id).await?;
        if existed {
            info!(payroll_id = %id, "Payroll record deleted");
        } else {
            debug!(payroll_id = %id, "Payroll record already absent");
        }
        Ok(())
    }

    /// Deletes a payroll record, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if no record has this id.
    pub async fn delete_payroll_strict(&self, id: &str) -> EngineResult<()> {
        if self.store.delete(collections::PAYROLLS, id).await? {
            info!(payroll_id = %id, "Payroll record deleted");
            Ok(())
        } else {
            Err(EngineError::not_found("payroll record", id))
        }
    }
}

fn require_key<'a>(field: &str, value: &'a str) -> EngineResult<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::validation(field, "a value is required"));
    }
    Ok(trimmed)
}
