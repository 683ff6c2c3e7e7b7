//! Month filter
//!
//! Selects the transactions that fall in one calendar month.

use crate::models::{Money, Month, Transaction, TransactionType};

/// Transactions whose date falls in `month`, in input order
pub fn transactions_in_month(transactions: &[Transaction], month: Month) -> Vec<&Transaction> {
    transactions
        .iter()
        .filter(|t| month.contains(t.transaction_date))
        .collect()
}

/// Sum of amounts for one transaction type
pub fn total_of<'a, I>(transactions: I, kind: TransactionType) -> Money
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.kind == kind)
        .map(|t| t.amount)
        .sum()
}
