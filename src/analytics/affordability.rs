//! Purchase affordability
//!
//! Answers "can I afford this?" against the month's disposable income, the
//! part of income not already allocated to a budget. The same
//! [`PurchaseCheck`] shape is returned by the backend's check endpoint and by
//! the local evaluation used offline.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{category, Budget, Money};

/// Excess (in percentage points) above which a reallocation is urgent
pub const HIGH_PRIORITY_EXCESS: f64 = 10.0;

/// Excess above which a reallocation is worth doing soon
pub const MEDIUM_PRIORITY_EXCESS: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SuggestionPriority {
    #[serde(alias = "high")]
    High,
    #[serde(alias = "medium")]
    Medium,
    #[serde(alias = "low")]
    Low,
}

impl SuggestionPriority {
    fn for_excess(excess: f64) -> Self {
        if excess > HIGH_PRIORITY_EXCESS {
            Self::High
        } else if excess > MEDIUM_PRIORITY_EXCESS {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

impl fmt::Display for SuggestionPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "HIGH"),
            Self::Medium => write!(f, "MEDIUM"),
            Self::Low => write!(f, "LOW"),
        }
    }
}

/// Proposal to move part of a budget's allocation elsewhere
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReallocationSuggestion {
    #[serde(default)]
    pub category: String,
    #[serde(default, deserialize_with = "crate::models::lenient::f64_or_zero")]
    pub current_percentage: f64,
    pub priority: SuggestionPriority,
    #[serde(default)]
    pub reasoning: String,
    #[serde(default, deserialize_with = "crate::models::lenient::f64_or_zero")]
    pub recommended_percentage: f64,
    #[serde(default)]
    pub suggested_amount: Money,
}

/// Outcome of a purchase check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseCheck {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
    #[serde(default)]
    pub can_afford: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub disposable_income: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default)]
    pub suggestions: Vec<ReallocationSuggestion>,
}

impl PurchaseCheck {
    /// `amount` as a percentage of this check's disposable income
    pub fn percentage_of_income(&self, amount: Money) -> Option<f64> {
        percentage_of_income(amount, self.disposable_income)
    }
}

/// `amount / disposable * 100`; `None` when disposable is missing or not positive
pub fn percentage_of_income(amount: Money, disposable: Option<Money>) -> Option<f64> {
    disposable
        .filter(Money::is_positive)
        .map(|d| amount.percentage_of(d))
}

/// Income left after every budget's allocation
pub fn disposable_income(monthly_income: Money, budgets: &[Budget]) -> Money {
    let allocated: Money = budgets
        .iter()
        .map(|b| monthly_income.percent(b.percentage))
        .sum();
    monthly_income - allocated
}

/// Budgets allocated above the catalog's healthy share, largest excess first
pub fn reallocation_suggestions(
    budgets: &[Budget],
    monthly_income: Money,
) -> Vec<ReallocationSuggestion> {
    let mut candidates: Vec<(f64, ReallocationSuggestion)> = budgets
        .iter()
        .filter_map(|b| {
            let healthy = category::find(&b.category)?.avg_percentage?;
            let excess = b.percentage - healthy;
            if excess <= 0.0 {
                return None;
            }
            Some((
                excess,
                ReallocationSuggestion {
                    category: b.category.clone(),
                    current_percentage: b.percentage,
                    priority: SuggestionPriority::for_excess(excess),
                    reasoning: format!(
                        "{} takes {}% of income, {:.1} points above the typical {}%.",
                        b.category, b.percentage, excess, healthy
                    ),
                    recommended_percentage: healthy,
                    suggested_amount: monthly_income.percent(healthy),
                },
            ))
        })
        .collect();

    // Stable: equal excesses stay in budget order
    candidates.sort_by(|a, b| b.0.total_cmp(&a.0));
    candidates.into_iter().map(|(_, s)| s).collect()
}

/// Evaluate a purchase without the backend
///
/// Affordable when disposable income is positive and covers `amount`.
/// Reallocation suggestions are only offered for purchases that do not fit.
pub fn evaluate_purchase(
    amount: Money,
    purchase_category: Option<&str>,
    budgets: &[Budget],
    monthly_income: Money,
) -> PurchaseCheck {
    let disposable = disposable_income(monthly_income, budgets);
    let can_afford = disposable.is_positive() && amount <= disposable;

    let what = match purchase_category {
        Some(c) if !c.trim().is_empty() => format!("this {} purchase", c),
        _ => "this purchase".to_string(),
    };
    let advice = if can_afford {
        format!("You have room in your disposable income for {}.", what)
    } else if disposable.is_positive() {
        format!(
            "{} is more than your disposable income of {}.",
            capitalize(&what),
            disposable
        )
    } else {
        "All of your income is already allocated to budgets.".to_string()
    };

    let impact = percentage_of_income(amount, Some(disposable)).map(|pct| {
        format!("This purchase would use {:.1}% of your disposable income.", pct)
    });

    let suggestions = if can_afford {
        Vec::new()
    } else {
        reallocation_suggestions(budgets, monthly_income)
    };

    tracing::debug!(
        amount = %amount,
        disposable = %disposable,
        can_afford,
        suggestions = suggestions.len(),
        "evaluated purchase locally"
    );

    PurchaseCheck {
        advice: Some(advice),
        can_afford,
        disposable_income: Some(disposable),
        impact,
        suggestions,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
