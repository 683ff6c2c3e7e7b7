//! Monthly summary
//!
//! Income, expense and transfer totals for the selected month, plus a
//! starting balance replayed from transaction history.

use serde::Serialize;
use std::collections::HashSet;

use super::filter::total_of;
use crate::models::{Account, AccountId, Money, Month, Transaction, TransactionType};

/// Cash-flow figures for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySummary {
    pub total_income: Money,
    pub total_expenses: Money,
    pub total_transfers: Money,
    pub net_cashflow: Money,
    pub starting_balance: Money,
    pub ending_balance: Money,
    /// Share of income not spent, in percent; zero without income
    pub savings_rate: f64,
    /// Share of income spent, in percent; zero without income
    pub expense_ratio: f64,
}

impl MonthlySummary {
    /// Compute the summary
    ///
    /// `month_transactions` must already be filtered to `month`;
    /// `all_transactions` is the full history used for the balance replay.
    pub fn compute(
        month: Month,
        month_transactions: &[&Transaction],
        all_transactions: &[Transaction],
        accounts: &[Account],
    ) -> Self {
        let total_income = total_of(month_transactions.iter().copied(), TransactionType::Income);
        let total_expenses = total_of(month_transactions.iter().copied(), TransactionType::Expense);
        let total_transfers =
            total_of(month_transactions.iter().copied(), TransactionType::Transfer);

        let starting_balance = starting_balance(month, all_transactions, accounts);
        let net_cashflow = total_income - total_expenses;

        let (savings_rate, expense_ratio) = if total_income.is_positive() {
            (
                net_cashflow.percentage_of(total_income),
                total_expenses.percentage_of(total_income),
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            total_income,
            total_expenses,
            total_transfers,
            net_cashflow,
            starting_balance,
            ending_balance: starting_balance + total_income - total_expenses,
            savings_rate,
            expense_ratio,
        }
    }
}

/// Replayed balance across all known accounts
///
/// Sums income minus expense for every transaction dated strictly before the
/// first day of the month *preceding* `month`. Transactions without an
/// account, or on accounts not in `accounts`, are ignored. Stored account
/// balances are never used.
pub fn starting_balance(month: Month, transactions: &[Transaction], accounts: &[Account]) -> Money {
    let cutoff = month.prev().first_day();
    let known: HashSet<&AccountId> = accounts.iter().map(|a| &a.id).collect();

    transactions
        .iter()
        .filter(|t| t.transaction_date < cutoff)
        .filter(|t| !t.account_id.is_empty() && known.contains(&t.account_id))
        .map(Transaction::signed_amount)
        .sum()
}
