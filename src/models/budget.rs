//! Budget model
//!
//! A budget allocates a share of the month's income to one category.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::lenient::f64_or_zero;

/// A percentage-of-income allocation for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Category name, matched against transaction categories by exact equality
    #[serde(default)]
    pub category: String,

    /// Share of monthly income, 0-100
    #[serde(default, deserialize_with = "f64_or_zero")]
    pub percentage: f64,

    /// Suggested share, when the backend provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommended_percentage: Option<f64>,

    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<String>,

    #[serde(
        rename = "updatedAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<String>,
}

impl Budget {
    /// Create a new budget
    pub fn new(id: impl Into<BudgetId>, category: impl Into<String>, percentage: f64) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            percentage,
            recommended_percentage: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Validate a percentage as entered by a user
    pub fn validate_percentage(percentage: f64) -> Result<(), BudgetValidationError> {
        if !percentage.is_finite() || !(0.0..=100.0).contains(&percentage) {
            return Err(BudgetValidationError::PercentageOutOfRange(percentage));
        }
        Ok(())
    }

    /// Validate the budget fields
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.category.trim().is_empty() {
            return Err(BudgetValidationError::MissingCategory);
        }
        Self::validate_percentage(self.percentage)
    }
}

/// Sum of all allocation percentages
pub fn total_allocated(budgets: &[Budget]) -> f64 {
    budgets.iter().map(|b| b.percentage).sum()
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}%)", self.category, self.percentage)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq)]
pub enum BudgetValidationError {
    MissingCategory,
    PercentageOutOfRange(f64),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCategory => write!(f, "Budget category is required"),
            Self::PercentageOutOfRange(p) => {
                write!(f, "Percentage must be between 0 and 100, got {}", p)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}
