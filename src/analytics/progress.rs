//! Budget progress
//!
//! Turns each percentage-of-income budget into money figures for the month:
//! how much was allocated, how much went out, the pace of spending, and a
//! 0-100 health score.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::models::{category, Budget, Money, Month, Transaction};

/// Budgets at or below this amount are never flagged as under-utilized
pub const UNDER_UTILIZED_MIN_BUDGET: Money = Money::from_cents(100_00);

/// Usage above this percentage is over budget
pub const EXCEEDED_ABOVE: f64 = 100.0;

/// Usage above this percentage is close to the limit
pub const WARNING_ABOVE: f64 = 85.0;

/// Usage below this percentage (with a meaningful budget) is under-utilized
pub const UNDER_UTILIZED_BELOW: f64 = 30.0;

/// Where a budget stands this month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetStatus {
    OnTrack,
    Warning,
    Exceeded,
    UnderUtilized,
}

impl BudgetStatus {
    /// Classify a usage percentage; the first matching rule wins
    ///
    /// Exactly 100% usage is `Warning`, not `Exceeded`.
    pub fn classify(percentage_used: f64, budgeted: Money) -> Self {
        if percentage_used > EXCEEDED_ABOVE {
            Self::Exceeded
        } else if percentage_used > WARNING_ABOVE {
            Self::Warning
        } else if percentage_used < UNDER_UTILIZED_BELOW && budgeted > UNDER_UTILIZED_MIN_BUDGET {
            Self::UnderUtilized
        } else {
            Self::OnTrack
        }
    }
}

impl fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnTrack => write!(f, "on track"),
            Self::Warning => write!(f, "warning"),
            Self::Exceeded => write!(f, "exceeded"),
            Self::UnderUtilized => write!(f, "under utilized"),
        }
    }
}

/// Health score curve, clamped to [0, 100]
///
/// | usage        | score                    |
/// |--------------|--------------------------|
/// | > 100        | 50 - (usage - 100)       |
/// | > 85         | 70 - (usage - 85) * 2    |
/// | > 50         | 90                       |
/// | otherwise    | 80 + (50 - usage) * 0.5  |
pub fn health_score(percentage_used: f64) -> f64 {
    let score = if percentage_used > 100.0 {
        50.0 - (percentage_used - 100.0)
    } else if percentage_used > 85.0 {
        70.0 - (percentage_used - 85.0) * 2.0
    } else if percentage_used > 50.0 {
        90.0
    } else {
        80.0 + (50.0 - percentage_used) * 0.5
    };
    score.clamp(0.0, 100.0)
}

/// A budget together with its figures for the selected month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetWithProgress {
    #[serde(flatten)]
    pub budget: Budget,
    /// `percentage`% of the month's income
    pub budgeted_amount: Money,
    /// Sum of the month's expenses in this category
    pub spent: Money,
    /// `budgeted_amount - spent`; negative when over budget
    pub remaining: Money,
    pub percentage_used: f64,
    pub status: BudgetStatus,
    pub daily_average: Money,
    pub projected_spend: Money,
    pub health_score: f64,
    /// The month's expenses in this category, in input order
    pub transactions: Vec<Transaction>,
    /// Catalog description of the category
    pub description: String,
}

impl BudgetWithProgress {
    /// Whether the month-end projection overshoots the allocation
    pub fn projected_over_budget(&self) -> bool {
        self.projected_spend > self.budgeted_amount
    }
}

/// Compute progress for every budget, in budget order
///
/// `month_transactions` must already be filtered to `month`. `monthly_income`
/// is the month's total income; `today` decides how many days have elapsed.
pub fn compute_budget_progress(
    budgets: &[Budget],
    month_transactions: &[&Transaction],
    monthly_income: Money,
    month: Month,
    today: NaiveDate,
) -> Vec<BudgetWithProgress> {
    let days_in_month = month.days_in_month();
    let elapsed_days = month.elapsed_days(today);

    let mut expenses_by_category: HashMap<&str, Vec<&Transaction>> = HashMap::new();
    for txn in month_transactions.iter().filter(|t| t.is_expense()) {
        expenses_by_category
            .entry(txn.category.as_str())
            .or_default()
            .push(txn);
    }

    budgets
        .iter()
        .map(|budget| {
            let matching = expenses_by_category
                .get(budget.category.as_str())
                .map(Vec::as_slice)
                .unwrap_or_default();

            let budgeted_amount = monthly_income.percent(budget.percentage);
            let spent: Money = matching.iter().map(|t| t.amount).sum();
            let percentage_used = spent.percentage_of(budgeted_amount);

            let daily_average = spent.div_round(elapsed_days);
            let projected_spend = if elapsed_days > 0 {
                spent.scale(days_in_month as f64 / elapsed_days as f64)
            } else {
                Money::zero()
            };

            BudgetWithProgress {
                budget: budget.clone(),
                budgeted_amount,
                spent,
                remaining: budgeted_amount - spent,
                percentage_used,
                status: BudgetStatus::classify(percentage_used, budgeted_amount),
                daily_average,
                projected_spend,
                health_score: health_score(percentage_used),
                transactions: matching.iter().map(|t| (*t).clone()).collect(),
                description: category::lookup(&budget.category).description.to_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionType;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn expense(category: &str, dollars: i64, day: u32) -> Transaction {
        Transaction::new(
            format!("{}-{}", category, day),
            "a1",
            TransactionType::Expense,
            category,
            Money::from_dollars_cents(dollars, 0),
            date(2025, 4, day),
        )
    }

    fn progress(budgets: &[Budget], txns: &[Transaction], income: i64, today: NaiveDate) -> Vec<BudgetWithProgress> {
        let refs: Vec<&Transaction> = txns.iter().collect();
        compute_budget_progress(
            budgets,
            &refs,
            Money::from_dollars_cents(income, 0),
            Month::new(2025, 4).unwrap(),
            today,
        )
    }

    #[test]
    fn test_exactly_full_budget_is_warning() {
        let budgets = vec![Budget::new("b1", "Rent", 30.0)];
        let txns = vec![expense("Rent", 1500, 1)];
        let p = &progress(&budgets, &txns, 5000, date(2025, 5, 2))[0];

        assert_eq!(p.budgeted_amount, Money::from_dollars_cents(1500, 0));
        assert_eq!(p.spent, Money::from_dollars_cents(1500, 0));
        assert_eq!(p.percentage_used, 100.0);
        assert_eq!(p.status, BudgetStatus::Warning);
        assert_eq!(p.remaining, Money::zero());
    }

    #[test]
    fn test_status_rules() {
        let budget = Money::from_dollars_cents(1000, 0);
        assert_eq!(BudgetStatus::classify(100.01, budget), BudgetStatus::Exceeded);
        assert_eq!(BudgetStatus::classify(85.5, budget), BudgetStatus::Warning);
        assert_eq!(BudgetStatus::classify(85.0, budget), BudgetStatus::OnTrack);
        assert_eq!(BudgetStatus::classify(29.9, budget), BudgetStatus::UnderUtilized);
        assert_eq!(BudgetStatus::classify(30.0, budget), BudgetStatus::OnTrack);
        // Small budgets are never under-utilized
        assert_eq!(
            BudgetStatus::classify(0.0, Money::from_dollars_cents(100, 0)),
            BudgetStatus::OnTrack
        );
        assert_eq!(
            BudgetStatus::classify(0.0, Money::from_cents(100_01)),
            BudgetStatus::UnderUtilized
        );
    }

    #[test]
    fn test_health_score_breakpoints() {
        // 105 before clamping
        assert_eq!(health_score(0.0), 100.0);
        assert_eq!(health_score(20.0), 95.0);
        assert_eq!(health_score(50.0), 80.0);
        assert_eq!(health_score(50.5), 90.0);
        assert_eq!(health_score(85.0), 90.0);
        assert_eq!(health_score(90.0), 60.0);
        assert_eq!(health_score(100.0), 40.0);
        assert_eq!(health_score(110.0), 40.0);
        assert_eq!(health_score(160.0), 0.0);
    }

    #[test]
    fn test_health_score_always_in_range() {
        let mut p = 0.0;
        while p < 400.0 {
            let score = health_score(p);
            assert!((0.0..=100.0).contains(&score), "usage {} gave {}", p, score);
            p += 0.25;
        }
    }

    #[test]
    fn test_zero_percentage_budget() {
        let budgets = vec![Budget::new("b1", "Dining", 0.0)];
        let txns = vec![expense("Dining", 40, 3)];
        let p = &progress(&budgets, &txns, 5000, date(2025, 5, 1))[0];

        assert!(p.budgeted_amount.is_zero());
        assert_eq!(p.percentage_used, 0.0);
        assert_ne!(p.status, BudgetStatus::UnderUtilized);
        assert_eq!(p.remaining, -Money::from_dollars_cents(40, 0));
    }

    #[test]
    fn test_zero_income() {
        let budgets = vec![Budget::new("b1", "Rent", 30.0), Budget::new("b2", "Grocery", 15.0)];
        let txns = vec![expense("Rent", 900, 1), expense("Grocery", 80, 2)];
        for p in progress(&budgets, &txns, 0, date(2025, 5, 1)) {
            assert_eq!(p.percentage_used, 0.0);
            assert_eq!(p.remaining, p.budgeted_amount - p.spent);
        }
    }

    #[test]
    fn test_only_expenses_in_matching_category_count() {
        let budgets = vec![Budget::new("b1", "Grocery", 10.0)];
        let mut income = expense("Grocery", 500, 2);
        income.kind = TransactionType::Income;
        let txns = vec![
            expense("Grocery", 100, 1),
            expense("grocery", 50, 2),
            income,
            expense("Dining", 70, 3),
        ];
        let p = &progress(&budgets, &txns, 4000, date(2025, 5, 1))[0];
        assert_eq!(p.spent, Money::from_dollars_cents(100, 0));
        assert_eq!(p.transactions.len(), 1);
        assert_eq!(p.description, "Food and household supplies");
    }

    #[test]
    fn test_pace_in_current_month() {
        let budgets = vec![Budget::new("b1", "Grocery", 10.0)];
        let txns = vec![expense("Grocery", 100, 1), expense("Grocery", 50, 8)];
        // April has 30 days; on the 10th, 10 days have elapsed
        let p = &progress(&budgets, &txns, 4000, date(2025, 4, 10))[0];
        assert_eq!(p.daily_average, Money::from_dollars_cents(15, 0));
        assert_eq!(p.projected_spend, Money::from_dollars_cents(450, 0));
        assert!(p.projected_over_budget());
    }

    #[test]
    fn test_pace_in_past_month_uses_full_length() {
        let budgets = vec![Budget::new("b1", "Grocery", 10.0)];
        let txns = vec![expense("Grocery", 300, 1)];
        let p = &progress(&budgets, &txns, 4000, date(2025, 6, 3))[0];
        assert_eq!(p.daily_average, Money::from_dollars_cents(10, 0));
        assert_eq!(p.projected_spend, Money::from_dollars_cents(300, 0));
    }
}
