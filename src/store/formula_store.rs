//! Persistence of salary categories.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::error::{EngineError, EngineResult};
use crate::formula::parse;
use crate::models::SalaryCategory;

use super::document::{DocumentStore, collections, decode, encode};

/// Saves, lists and removes salary categories in the `salaryCategories`
/// collection.
///
/// A formula is parsed before it is saved, so every stored category carries
/// a formula the evaluator accepts.
#[derive(Clone)]
pub struct FormulaStore {
    store: Arc<dyn DocumentStore>,
}

impl FormulaStore {
    /// Creates a formula store over `store`.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Validates and persists a new salary category.
    ///
    /// # Errors
    ///
    /// - [`EngineError::Validation`] if `category_name` is blank
    /// - [`EngineError::Syntax`] if `formula` does not parse
    /// - [`EngineError::Persistence`] or [`EngineError::Timeout`] on store failure
    pub async fn save(&self, category_name: &str, formula: &str) -> EngineResult<SalaryCategory> {
        let category_name = category_name.trim();
        if category_name.is_empty() {
            return Err(EngineError::validation(
                "category_name",
                "a category name is required",
            ));
        }
        let formula = formula.trim();
        let references_base_salary = parse(formula)?.references_base_salary();

        let mut category = SalaryCategory {
            id: String::new(),
            category_name: category_name.to_string(),
            formula: formula.to_string(),
        };
        category.id = self
            .store
            .create(collections::SALARY_CATEGORIES, encode(&category)?)
            .await?;

        info!(
            category_id = %category.id,
            category_name = %category.category_name,
            formula = %category.formula,
            references_base_salary,
            "Salary category saved"
        );
        if !references_base_salary {
            warn!(
                category_id = %category.id,
                "Salary category pays a flat amount regardless of base salary"
            );
        }
        Ok(category)
    }

    /// Lists every salary category, in no particular order.
    pub async fn list(&self) -> EngineResult<Vec<SalaryCategory>> {
        let documents = self.store.get_all(collections::SALARY_CATEGORIES).await?;
        documents
            .into_iter()
            .map(|stored| decode(collections::SALARY_CATEGORIES, stored))
            .collect()
    }

    /// Gets a salary category by id.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if no category has this id.
    pub async fn get(&self, id: &str) -> EngineResult<SalaryCategory> {
        match self.store.get(collections::SALARY_CATEGORIES, id).await? {
            Some(stored) => decode(collections::SALARY_CATEGORIES, stored),
            None => Err(EngineError::not_found("salary category", id)),
        }
    }

    /// Removes a salary category.
    ///
    /// Removing an id that does not exist succeeds. Payroll records computed
    /// from the category are left untouched.
    pub async fn remove(&self, id: &str) -> EngineResult<()> {
        let existed = self.store.delete(collections::SALARY_CATEGORIES, id).await?;
        if existed {
            info!(category_id = %id, "Salary category removed");
        } else {
            debug!(category_id = %id, "Salary category already absent");
        }
        Ok(())
    }

    /// Removes a salary category, failing if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::NotFound`] if no category has this id.
    pub async fn remove_strict(&self, id: &str) -> EngineResult<()> {
        if self.store.delete(collections::SALARY_CATEGORIES, id).await? {
            info!(category_id = %id, "Salary category removed");
            Ok(())
        } else {
            Err(EngineError::not_found("salary category", id))
        }
    }
}
