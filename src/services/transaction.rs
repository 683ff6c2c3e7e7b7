//! Transaction service
//!
//! Validates transactions before they are sent to the backend.

use chrono::NaiveDate;

use crate::client::types::{NewTransaction, TransactionUpdate};
use crate::client::ApiClient;
use crate::error::{PulseError, PulseResult};
use crate::models::{category, AccountId, Money, Transaction, TransactionId, TransactionType};

/// A transaction as entered by the user, before the backend assigns an ID
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    pub amount: Money,
    pub kind: TransactionType,
    pub category: String,
    pub account_id: Option<AccountId>,
    pub description: Option<String>,
    /// Defaults to today on the backend when absent
    pub date: Option<NaiveDate>,
}

impl TransactionDraft {
    pub fn new(amount: Money, kind: TransactionType, category: impl Into<String>) -> Self {
        Self {
            amount,
            kind,
            category: category.into(),
            account_id: None,
            description: None,
            date: None,
        }
    }

    /// Check the draft the way the entry form does
    pub fn validate(&self) -> PulseResult<()> {
        if !self.amount.is_positive() {
            return Err(PulseError::Validation(
                "Amount must be greater than zero".into(),
            ));
        }
        validate_category(self.kind, &self.category)
    }

    fn into_request(self) -> NewTransaction {
        NewTransaction {
            account_id: self.account_id,
            amount: self.amount,
            kind: self.kind.to_string(),
            category: self.category.trim().to_string(),
            description: self
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            transaction_date: self.date.map(|d| d.format("%Y-%m-%d").to_string()),
        }
    }
}

/// Category must be present, and income may not use an expense-only category
pub fn validate_category(kind: TransactionType, name: &str) -> PulseResult<()> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PulseError::Validation("Category is required".into()));
    }
    if kind == TransactionType::Income && category::is_expense_only(name) {
        return Err(PulseError::Validation(format!(
            "'{}' is an expense category and cannot be used for income",
            name
        )));
    }
    Ok(())
}

/// Service for transaction management
pub struct TransactionService<'a> {
    api: &'a ApiClient,
}

impl<'a> TransactionService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub fn list(&self) -> PulseResult<Vec<Transaction>> {
        self.api.list_transactions()
    }

    pub fn create(&self, draft: TransactionDraft) -> PulseResult<Transaction> {
        draft.validate()?;
        if category::find(draft.category.trim()).is_none() {
            tracing::warn!(category = %draft.category, "transaction uses a category outside the catalog");
        }

        let txn = self.api.create_transaction(&draft.into_request())?;
        tracing::info!(id = %txn.id, amount = %txn.amount, kind = %txn.kind, "created transaction");
        Ok(txn)
    }

    /// Apply a partial update
    ///
    /// `current` is the stored transaction; the merged result is validated
    /// before anything is sent.
    pub fn update(&self, current: &Transaction, update: TransactionUpdate) -> PulseResult<Transaction> {
        let amount = update.amount.unwrap_or(current.amount);
        if !amount.is_positive() {
            return Err(PulseError::Validation(
                "Amount must be greater than zero".into(),
            ));
        }
        let kind = match &update.kind {
            Some(k) => TransactionType::parse(k).ok_or_else(|| {
                PulseError::Validation(format!("Unknown transaction type: {}", k))
            })?,
            None => current.kind,
        };
        validate_category(kind, update.category.as_deref().unwrap_or(&current.category))?;

        let txn = self.api.update_transaction(&current.id, &update)?;
        tracing::info!(id = %current.id, "updated transaction");
        Ok(txn)
    }

    pub fn delete(&self, id: &TransactionId) -> PulseResult<()> {
        self.api.delete_transaction(id)?;
        tracing::info!(%id, "deleted transaction");
        Ok(())
    }
}

/// Find a transaction by ID
pub fn find_transaction<'t>(transactions: &'t [Transaction], id: &str) -> PulseResult<&'t Transaction> {
    let id = id.trim();
    transactions
        .iter()
        .find(|t| t.id.as_str() == id)
        .ok_or_else(|| PulseError::transaction_not_found(id))
}
