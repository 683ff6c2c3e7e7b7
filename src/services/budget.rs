//! Budget service
//!
//! Validated create, update and delete operations for percentage budgets.

use crate::client::types::NewBudget;
use crate::client::ApiClient;
use crate::error::{PulseError, PulseResult};
use crate::models::{category, Budget, BudgetId};

/// Service for budget management
pub struct BudgetService<'a> {
    api: &'a ApiClient,
}

impl<'a> BudgetService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub fn list(&self) -> PulseResult<Vec<Budget>> {
        self.api.list_budgets()
    }

    /// Create a budget for a category
    ///
    /// The category is kept as typed; an unknown name is allowed but logged,
    /// because only exact matches ever count toward a budget.
    pub fn create(&self, category: &str, percentage: f64) -> PulseResult<Budget> {
        let category = category.trim();
        let draft = Budget::new("", category, percentage);
        draft
            .validate()
            .map_err(|e| PulseError::Validation(e.to_string()))?;

        if let Some(note) = unknown_category_note(category) {
            tracing::warn!(category, "{}", note);
        }

        let budget = self.api.create_budget(&NewBudget {
            category: category.to_string(),
            percentage,
            recommended_percentage: category::find(category).and_then(|c| c.avg_percentage),
        })?;
        tracing::info!(id = %budget.id, category, percentage, "created budget");
        Ok(budget)
    }

    /// Change a budget's percentage
    ///
    /// Returns `None` without contacting the backend when the percentage is
    /// unchanged.
    pub fn update_percentage(&self, budget: &Budget, percentage: f64) -> PulseResult<Option<Budget>> {
        Budget::validate_percentage(percentage)
            .map_err(|e| PulseError::Validation(e.to_string()))?;

        if percentage == budget.percentage {
            tracing::debug!(id = %budget.id, "percentage unchanged, skipping update");
            return Ok(None);
        }

        let updated = self.api.update_budget(&budget.id, percentage)?;
        tracing::info!(
            id = %budget.id,
            from = budget.percentage,
            to = percentage,
            "updated budget"
        );
        Ok(Some(updated))
    }

    pub fn delete(&self, id: &BudgetId) -> PulseResult<()> {
        self.api.delete_budget(id)?;
        tracing::info!(%id, "deleted budget");
        Ok(())
    }
}

/// Find a budget by ID, or by exact category name
pub fn find_budget<'b>(budgets: &'b [Budget], key: &str) -> PulseResult<&'b Budget> {
    let key = key.trim();
    budgets
        .iter()
        .find(|b| b.id.as_str() == key)
        .or_else(|| budgets.iter().find(|b| b.category == key))
        .ok_or_else(|| PulseError::budget_not_found(key))
}

/// A user-facing note when a category is not in the catalog
pub fn unknown_category_note(name: &str) -> Option<String> {
    if category::find(name).is_some() {
        return None;
    }
    Some(match category::suggest(name) {
        Some(known) => format!(
            "'{}' is not a known category; did you mean '{}'? Only transactions with exactly this category will count.",
            name, known
        ),
        None => format!(
            "'{}' is not a known category. Only transactions with exactly this category will count.",
            name
        ),
    })
}
