//! Budget analytics engine
//!
//! Everything here is a pure function of the input records and an explicit
//! evaluation clock: the same budgets, transactions, accounts, month and
//! clock always produce the same analysis. Nothing is cached between calls.
//!
//! ```rust,ignore
//! use budget_pulse::analytics::{AnalysisContext, BudgetAnalyticsEngine};
//!
//! let ctx = AnalysisContext::now(Month::current());
//! let analysis = BudgetAnalyticsEngine::analyze(&budgets, &transactions, &accounts, &ctx);
//! ```

pub mod affordability;
pub mod filter;
pub mod insights;
pub mod overview;
pub mod progress;
pub mod summary;

use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::Serialize;

use crate::models::{Account, Budget, Money, Month, Transaction};

pub use affordability::{evaluate_purchase, PurchaseCheck, ReallocationSuggestion, SuggestionPriority};
pub use filter::transactions_in_month;
pub use insights::{AIInsight, InsightAction, InsightFeed, InsightKind, InsightPriority};
pub use overview::{CategoryTotal, FinancialOverview, GoalProgress};
pub use progress::{BudgetStatus, BudgetWithProgress};
pub use summary::MonthlySummary;

/// The month being analyzed and the clock it is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisContext {
    pub month: Month,
    /// Local calendar date used for elapsed days and "yesterday"
    pub today: NaiveDate,
    /// Stamped on generated insights
    pub generated_at: DateTime<Utc>,
}

impl AnalysisContext {
    pub fn new(month: Month, today: NaiveDate, generated_at: DateTime<Utc>) -> Self {
        Self {
            month,
            today,
            generated_at,
        }
    }

    /// Context evaluated against the system clock
    pub fn now(month: Month) -> Self {
        Self::new(month, Local::now().date_naive(), Utc::now())
    }
}

/// Complete analysis of one month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetAnalysis {
    pub month: Month,
    pub summary: MonthlySummary,
    pub budgets: Vec<BudgetWithProgress>,
    pub insights: Vec<AIInsight>,
}

impl BudgetAnalysis {
    /// Income the budgets are measured against
    pub fn monthly_income(&self) -> Money {
        self.summary.total_income
    }

    pub fn total_budgeted(&self) -> Money {
        self.budgets.iter().map(|b| b.budgeted_amount).sum()
    }

    pub fn total_spent(&self) -> Money {
        self.budgets.iter().map(|b| b.spent).sum()
    }

    /// Average health score across budgets; `None` without budgets
    pub fn overall_health(&self) -> Option<f64> {
        if self.budgets.is_empty() {
            return None;
        }
        let total: f64 = self.budgets.iter().map(|b| b.health_score).sum();
        Some(total / self.budgets.len() as f64)
    }

    /// Local affordability check against this month's income and budgets
    pub fn check_purchase(&self, amount: Money, category: Option<&str>) -> PurchaseCheck {
        let budgets: Vec<Budget> = self.budgets.iter().map(|b| b.budget.clone()).collect();
        evaluate_purchase(amount, category, &budgets, self.monthly_income())
    }
}

/// Entry point for the month analysis
pub struct BudgetAnalyticsEngine;

impl BudgetAnalyticsEngine {
    /// Analyze one month
    ///
    /// Budgets are measured against the month's actual income, never the
    /// user's profile income. Malformed records have already been coerced to
    /// zero at deserialization, so this never fails.
    pub fn analyze(
        budgets: &[Budget],
        transactions: &[Transaction],
        accounts: &[Account],
        ctx: &AnalysisContext,
    ) -> BudgetAnalysis {
        let month_transactions = filter::transactions_in_month(transactions, ctx.month);
        let summary =
            MonthlySummary::compute(ctx.month, &month_transactions, transactions, accounts);
        let budget_progress = progress::compute_budget_progress(
            budgets,
            &month_transactions,
            summary.total_income,
            ctx.month,
            ctx.today,
        );
        let insights = insights::generate_insights(
            &budget_progress,
            &summary,
            &month_transactions,
            ctx.month,
            ctx.today,
            ctx.generated_at,
        );

        tracing::debug!(
            month = %ctx.month,
            budgets = budgets.len(),
            transactions = transactions.len(),
            in_month = month_transactions.len(),
            insights = insights.len(),
            "analyzed month"
        );

        BudgetAnalysis {
            month: ctx.month,
            summary,
            budgets: budget_progress,
            insights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, TransactionType};
    use chrono::TimeZone;

    fn ctx(millis: i64) -> AnalysisContext {
        AnalysisContext::new(
            Month::new(2025, 3).unwrap(),
            NaiveDate::from_ymd_opt(2025, 4, 2).unwrap(),
            Utc.timestamp_millis_opt(millis).unwrap(),
        )
    }

    fn txn(id: &str, kind: TransactionType, category: &str, dollars: i64, m: u32, d: u32) -> Transaction {
        Transaction::new(
            id,
            "a1",
            kind,
            category,
            Money::from_dollars_cents(dollars, 0),
            NaiveDate::from_ymd_opt(2025, m, d).unwrap(),
        )
    }

    fn dataset() -> (Vec<Budget>, Vec<Transaction>, Vec<Account>) {
        let budgets = vec![Budget::new("b1", "Rent", 30.0), Budget::new("b2", "Dining", 10.0)];
        let txns = vec![
            txn("t0", TransactionType::Income, "Salary", 5000, 1, 1),
            txn("t1", TransactionType::Income, "Salary", 5000, 3, 1),
            txn("t2", TransactionType::Expense, "Rent", 1500, 3, 2),
            txn("t3", TransactionType::Expense, "Dining", 80, 3, 9),
            txn("t4", TransactionType::Expense, "Dining", 40, 4, 1),
        ];
        let accounts = vec![Account::new("a1", "Main", AccountType::Checking)];
        (budgets, txns, accounts)
    }

    #[test]
    fn test_analyze_month() {
        let (budgets, txns, accounts) = dataset();
        let analysis = BudgetAnalyticsEngine::analyze(&budgets, &txns, &accounts, &ctx(1));

        assert_eq!(analysis.monthly_income(), Money::from_dollars_cents(5000, 0));
        assert_eq!(analysis.summary.total_expenses, Money::from_dollars_cents(1580, 0));
        assert_eq!(analysis.summary.starting_balance, Money::from_dollars_cents(5000, 0));

        let rent = &analysis.budgets[0];
        assert_eq!(rent.status, BudgetStatus::Warning);
        assert_eq!(rent.percentage_used, 100.0);

        let dining = &analysis.budgets[1];
        assert_eq!(dining.spent, Money::from_dollars_cents(80, 0));
        assert_eq!(dining.status, BudgetStatus::UnderUtilized);

        assert_eq!(analysis.total_budgeted(), Money::from_dollars_cents(2000, 0));
        assert_eq!(analysis.total_spent(), Money::from_dollars_cents(1580, 0));
    }

    #[test]
    fn test_empty_input_is_complete() {
        let analysis = BudgetAnalyticsEngine::analyze(&[], &[], &[], &ctx(0));
        assert!(analysis.budgets.is_empty());
        assert!(analysis.summary.total_income.is_zero());
        assert_eq!(analysis.overall_health(), None);
        assert_eq!(analysis.insights.len(), 1);
    }

    #[test]
    fn test_deterministic_apart_from_insight_stamps() {
        let (budgets, txns, accounts) = dataset();
        let a = BudgetAnalyticsEngine::analyze(&budgets, &txns, &accounts, &ctx(10));
        let b = BudgetAnalyticsEngine::analyze(&budgets, &txns, &accounts, &ctx(10));
        assert_eq!(a, b);

        let c = BudgetAnalyticsEngine::analyze(&budgets, &txns, &accounts, &ctx(20));
        assert_eq!(a.summary, c.summary);
        assert_eq!(a.budgets, c.budgets);
        assert_ne!(a.insights, c.insights);
    }

    #[test]
    fn test_json_shape() {
        let (budgets, txns, accounts) = dataset();
        let analysis = BudgetAnalyticsEngine::analyze(&budgets, &txns, &accounts, &ctx(0));
        let json = serde_json::to_value(&analysis).unwrap();

        assert_eq!(json["month"], "2025-03");
        assert_eq!(json["summary"]["totalIncome"], 5000.0);
        assert_eq!(json["budgets"][0]["category"], "Rent");
        assert_eq!(json["budgets"][0]["budgetedAmount"], 1500.0);
        assert_eq!(json["budgets"][0]["status"], "warning");
        assert_eq!(json["budgets"][1]["status"], "under_utilized");
        assert!(json["insights"][0]["type"].is_string());
    }

    #[test]
    fn test_check_purchase_uses_month_income() {
        let (budgets, txns, accounts) = dataset();
        let analysis = BudgetAnalyticsEngine::analyze(&budgets, &txns, &accounts, &ctx(0));
        let check = analysis.check_purchase(Money::from_dollars_cents(3000, 0), None);
        assert!(check.can_afford);
        assert_eq!(check.disposable_income, Some(Money::from_dollars_cents(3000, 0)));
    }
}
