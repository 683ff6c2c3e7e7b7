//! Reference category catalog
//!
//! Budgets and transactions refer to categories by name. The catalog lists
//! the names the backend and its clients agree on, what kind of transaction
//! each one is meant for, and the share of income considered healthy for
//! expense and savings categories.

use serde::Serialize;
use std::fmt;

/// What kind of transaction a category is meant for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Expense,
    Income,
    Transfer,
    /// Usable for any transaction type
    Both,
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Expense => write!(f, "expense"),
            Self::Income => write!(f, "income"),
            Self::Transfer => write!(f, "transfer"),
            Self::Both => write!(f, "any"),
        }
    }
}

/// A known category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CategoryInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub kind: CategoryKind,
    /// Typical healthy share of income, where one applies
    pub avg_percentage: Option<f64>,
    pub essential: bool,
    pub description: &'static str,
}

const fn cat(
    id: &'static str,
    name: &'static str,
    kind: CategoryKind,
    avg_percentage: Option<f64>,
    essential: bool,
    description: &'static str,
) -> CategoryInfo {
    CategoryInfo {
        id,
        name,
        kind,
        avg_percentage,
        essential,
        description,
    }
}

use CategoryKind::{Both, Expense, Income, Transfer};

/// All known categories; the last entry is the catch-all
pub const CATALOG: &[CategoryInfo] = &[
    cat("rent", "Rent", Expense, Some(30.0), true, "Monthly housing payments"),
    cat("grocery", "Grocery", Expense, Some(15.0), true, "Food and household supplies"),
    cat("dining", "Dining", Expense, Some(10.0), false, "Restaurants and takeout"),
    cat("transport", "Transport", Expense, Some(12.0), true, "Gas, public transit, rideshare"),
    cat("entertainment", "Entertainment", Expense, Some(8.0), false, "Movies, games, subscriptions"),
    cat("utilities", "Utilities", Expense, Some(8.0), true, "Electricity, water, internet"),
    cat("healthcare", "Healthcare", Expense, Some(10.0), true, "Medical expenses, insurance"),
    cat("shopping", "Shopping", Expense, Some(5.0), false, "Clothing, electronics, personal items"),
    cat("education", "Education", Expense, Some(5.0), true, "Tuition, courses, books"),
    cat("insurance", "Insurance", Expense, Some(5.0), true, "Health, life, car insurance"),
    cat("subscriptions", "Subscriptions", Expense, Some(3.0), false, "Streaming, apps, memberships"),
    cat("fitness", "Fitness", Expense, Some(3.0), false, "Gym, fitness classes, sports"),
    cat("pet", "Pet Care", Expense, Some(2.0), false, "Pet food, vet, supplies"),
    cat("gifts", "Gifts", Expense, Some(2.0), false, "Birthday, holiday, special occasions"),
    cat("salary", "Salary", Income, None, false, "Primary employment income"),
    cat("freelance", "Freelance", Income, None, false, "Contract work, gig economy"),
    cat("investment", "Investment", Income, None, false, "Dividends, capital gains, interest"),
    cat("business", "Business", Income, None, false, "Business or side hustle income"),
    cat("rental", "Rental Income", Income, None, false, "Property rental income"),
    cat("dividends", "Dividends", Income, None, false, "Stock dividends"),
    cat("interest", "Interest", Income, None, false, "Savings account interest"),
    cat("bonus", "Bonus", Income, None, false, "Work bonus, commissions"),
    cat("gift", "Gift", Income, None, false, "Monetary gifts received"),
    cat("refund", "Refund", Income, None, false, "Tax refunds, returns"),
    cat("other-income", "Other Income", Income, None, false, "Miscellaneous income"),
    cat("savings", "Savings", Transfer, Some(20.0), true, "Money saved for future"),
    cat("emergency-fund", "Emergency Fund", Transfer, Some(10.0), true, "Emergency savings"),
    cat("retirement", "Retirement", Transfer, Some(15.0), true, "401k, IRA, pension"),
    cat("investment-transfer", "Investment Transfer", Transfer, None, false, "Transfer to investment accounts"),
    cat("other", "Other", Both, None, false, "Miscellaneous transactions"),
];

/// Find a category by its exact display name
pub fn find(name: &str) -> Option<&'static CategoryInfo> {
    CATALOG.iter().find(|c| c.name == name)
}

/// Find a category by name, falling back to the catch-all "Other"
pub fn lookup(name: &str) -> &'static CategoryInfo {
    find(name).unwrap_or(&CATALOG[CATALOG.len() - 1])
}

/// Categories usable for a given kind ("Other" is usable everywhere)
pub fn by_kind(kind: CategoryKind) -> impl Iterator<Item = &'static CategoryInfo> {
    CATALOG
        .iter()
        .filter(move |c| c.kind == kind || c.kind == Both)
}

/// Whether a category name is reserved for expenses
pub fn is_expense_only(name: &str) -> bool {
    find(name).is_some_and(|c| c.kind == Expense)
}

/// Closest catalog name by case-insensitive comparison, for typo hints
pub fn suggest(name: &str) -> Option<&'static str> {
    let wanted = name.trim().to_lowercase();
    CATALOG
        .iter()
        .find(|c| c.name.to_lowercase() == wanted || c.id == wanted)
        .map(|c| c.name)
}
