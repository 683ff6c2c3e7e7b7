//! Financial overview
//!
//! The dashboard view over all loaded records, independent of any month:
//! total balance, all-time income and expenses, a health score, the expense
//! breakdown by category and goal progress.

use serde::Serialize;

use crate::models::{Account, Goal, GoalId, Money, Transaction};

/// Category shown for expenses without one
pub const UNCATEGORIZED: &str = "Other";

/// Score reported when there is no income to compare against
pub const NEUTRAL_HEALTH_SCORE: u8 = 50;

/// Goals previewed on the dashboard
pub const GOAL_PREVIEW_LIMIT: usize = 3;

/// Most recent transactions listed on the dashboard
pub const RECENT_ACTIVITY_LIMIT: usize = 5;

/// Expenses summed for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: String,
    pub amount: Money,
    /// Share of all expenses, in percent
    pub share: f64,
}

/// A goal with its progress worked out
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub id: GoalId,
    pub title: String,
    pub current_amount: Money,
    pub target_amount: Money,
    pub percent: u8,
}

impl From<&Goal> for GoalProgress {
    fn from(goal: &Goal) -> Self {
        Self {
            id: goal.id.clone(),
            title: goal.title.clone(),
            current_amount: goal.current_amount,
            target_amount: goal.target_amount,
            percent: goal.progress_percent(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialOverview {
    /// Sum of the balances stored on the accounts
    pub total_balance: Money,
    pub total_income: Money,
    pub total_expenses: Money,
    /// 0-100; the share of income kept, or 50 without income
    pub health_score: u8,
    pub active_goals: usize,
    /// In order of first appearance
    pub expense_breakdown: Vec<CategoryTotal>,
    pub goals: Vec<GoalProgress>,
    /// Newest first
    pub recent_transactions: Vec<Transaction>,
}

impl FinancialOverview {
    pub fn compute(accounts: &[Account], transactions: &[Transaction], goals: &[Goal]) -> Self {
        let total_balance: Money = accounts.iter().map(|a| a.balance).sum();
        let total_income: Money = transactions
            .iter()
            .filter(|t| t.is_income())
            .map(|t| t.amount)
            .sum();
        let total_expenses: Money = transactions
            .iter()
            .filter(|t| t.is_expense())
            .map(|t| t.amount)
            .sum();

        Self {
            total_balance,
            total_income,
            total_expenses,
            health_score: health_score(total_income, total_expenses),
            active_goals: goals.len(),
            expense_breakdown: expense_breakdown(transactions, total_expenses),
            goals: goals
                .iter()
                .take(GOAL_PREVIEW_LIMIT)
                .map(GoalProgress::from)
                .collect(),
            recent_transactions: recent_transactions(transactions, RECENT_ACTIVITY_LIMIT),
        }
    }

    pub fn net(&self) -> Money {
        self.total_income - self.total_expenses
    }
}

/// Rounded share of income not spent, clamped to 0..=100
pub fn health_score(income: Money, expenses: Money) -> u8 {
    if !income.is_positive() {
        return NEUTRAL_HEALTH_SCORE;
    }
    let kept = (income - expenses).percentage_of(income).round();
    kept.clamp(0.0, 100.0) as u8
}

fn expense_breakdown(transactions: &[Transaction], total_expenses: Money) -> Vec<CategoryTotal> {
    let mut totals: Vec<CategoryTotal> = Vec::new();
    for txn in transactions.iter().filter(|t| t.is_expense()) {
        let category = if txn.category.trim().is_empty() {
            UNCATEGORIZED
        } else {
            txn.category.as_str()
        };
        match totals.iter_mut().find(|c| c.category == category) {
            Some(entry) => entry.amount += txn.amount,
            None => totals.push(CategoryTotal {
                category: category.to_string(),
                amount: txn.amount,
                share: 0.0,
            }),
        }
    }
    for entry in &mut totals {
        entry.share = entry.amount.percentage_of(total_expenses);
    }
    totals
}

fn recent_transactions(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    // Stable: same-day transactions keep their input order
    sorted.sort_by(|a, b| b.transaction_date.cmp(&a.transaction_date));
    sorted.into_iter().take(limit).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AccountType, TransactionType};
    use chrono::NaiveDate;

    fn txn(id: &str, kind: TransactionType, category: &str, dollars: i64, day: u32) -> Transaction {
        Transaction::new(
            id,
            "a1",
            kind,
            category,
            Money::from_dollars_cents(dollars, 0),
            NaiveDate::from_ymd_opt(2025, 3, day).unwrap(),
        )
    }

    fn account(id: &str, dollars: i64) -> Account {
        let mut a = Account::new(id, id, AccountType::Checking);
        a.balance = Money::from_dollars_cents(dollars, 0);
        a
    }

    #[test]
    fn test_totals_and_breakdown() {
        let accounts = vec![account("a1", 1200), account("a2", -200)];
        let txns = vec![
            txn("t1", TransactionType::Income, "Salary", 4000, 1),
            txn("t2", TransactionType::Expense, "Rent", 1500, 2),
            txn("t3", TransactionType::Expense, "", 100, 3),
            txn("t4", TransactionType::Expense, "Dining", 300, 4),
            txn("t5", TransactionType::Expense, "Rent", 100, 5),
            txn("t6", TransactionType::Transfer, "Savings", 500, 6),
        ];
        let overview = FinancialOverview::compute(&accounts, &txns, &[]);

        assert_eq!(overview.total_balance, Money::from_dollars_cents(1000, 0));
        assert_eq!(overview.total_income, Money::from_dollars_cents(4000, 0));
        assert_eq!(overview.total_expenses, Money::from_dollars_cents(2000, 0));
        assert_eq!(overview.net(), Money::from_dollars_cents(2000, 0));
        assert_eq!(overview.health_score, 50);

        let names: Vec<_> = overview
            .expense_breakdown
            .iter()
            .map(|c| c.category.as_str())
            .collect();
        assert_eq!(names, vec!["Rent", "Other", "Dining"]);
        assert_eq!(overview.expense_breakdown[0].amount, Money::from_dollars_cents(1600, 0));
        assert_eq!(overview.expense_breakdown[0].share, 80.0);
    }

    #[test]
    fn test_health_score_bounds() {
        let d = |dollars| Money::from_dollars_cents(dollars, 0);
        assert_eq!(health_score(Money::zero(), d(500)), NEUTRAL_HEALTH_SCORE);
        assert_eq!(health_score(d(1000), d(3000)), 0);
        assert_eq!(health_score(d(1000), Money::zero()), 100);
        // 66.5% rounds half away from zero
        assert_eq!(health_score(d(1000), d(335)), 67);
        assert_eq!(health_score(d(1000), d(336)), 66);
    }

    #[test]
    fn test_goal_preview() {
        let mut goals: Vec<Goal> = (1..=4)
            .map(|i| Goal::new(format!("g{}", i), format!("Goal {}", i), Money::from_cents(10_000)))
            .collect();
        goals[0].current_amount = Money::from_cents(2_500);

        let overview = FinancialOverview::compute(&[], &[], &goals);
        assert_eq!(overview.active_goals, 4);
        assert_eq!(overview.goals.len(), GOAL_PREVIEW_LIMIT);
        assert_eq!(overview.goals[0].percent, 25);
        assert_eq!(overview.goals[2].title, "Goal 3");
    }

    #[test]
    fn test_recent_transactions_newest_first() {
        let txns: Vec<Transaction> = (1..=7)
            .map(|day| txn(&format!("t{}", day), TransactionType::Expense, "Dining", 10, day))
            .collect();
        let overview = FinancialOverview::compute(&[], &txns, &[]);
        let ids: Vec<_> = overview
            .recent_transactions
            .iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["t7", "t6", "t5", "t4", "t3"]);
    }

    #[test]
    fn test_empty_inputs() {
        let overview = FinancialOverview::compute(&[], &[], &[]);
        assert!(overview.total_balance.is_zero());
        assert!(overview.expense_breakdown.is_empty());
        assert_eq!(overview.health_score, NEUTRAL_HEALTH_SCORE);
        assert_eq!(overview.active_goals, 0);
    }
}
