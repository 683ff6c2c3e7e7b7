//! Transaction model
//!
//! Transactions are owned by the backend. Amounts are always positive; the
//! direction of money comes from the transaction type.

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::ids::{AccountId, TransactionId};
use super::lenient::string_or_empty;
use super::money::Money;

/// Kind of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    Transfer,
}

impl TransactionType {
    /// Parse transaction type from string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            "transfer" => Some(Self::Transfer),
            _ => None,
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
            Self::Transfer => write!(f, "transfer"),
        }
    }
}

/// A financial transaction as served by the backend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Amount (positive; direction comes from `kind`)
    #[serde(default)]
    pub amount: Money,

    /// Income, expense or transfer
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Category name, matched by exact string equality against budgets
    #[serde(default, deserialize_with = "string_or_empty")]
    pub category: String,

    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Calendar date of the transaction
    #[serde(
        serialize_with = "serialize_date",
        deserialize_with = "deserialize_date"
    )]
    pub transaction_date: NaiveDate,

    /// The account this transaction belongs to; blank when the backend omits it
    #[serde(default)]
    pub account_id: AccountId,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        id: impl Into<TransactionId>,
        account_id: impl Into<AccountId>,
        kind: TransactionType,
        category: impl Into<String>,
        amount: Money,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            amount,
            kind,
            category: category.into(),
            description: None,
            transaction_date,
            account_id: account_id.into(),
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    pub fn is_transfer(&self) -> bool {
        self.kind == TransactionType::Transfer
    }

    /// Effect on an account balance: income adds, expense subtracts, transfers are neutral
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionType::Income => self.amount,
            TransactionType::Expense => -self.amount,
            TransactionType::Transfer => Money::zero(),
        }
    }

    /// Description if present, otherwise the category
    pub fn label(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or(&self.category)
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_income() { "+" } else { "-" };
        write!(
            f,
            "{} {} {}{} ({})",
            self.transaction_date,
            self.label(),
            sign,
            self.amount,
            self.kind
        )
    }
}

/// Parse a backend date into a calendar date
///
/// A date-only value ("2025-01-15") is that calendar date. A full timestamp
/// ("2025-01-15T23:30:00.000Z") is converted to the local calendar date.
pub fn parse_transaction_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Some(ts.with_timezone(&Local).date_naive());
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    // Naive timestamps without an offset keep their calendar date
    s.get(..10)
        .and_then(|prefix| NaiveDate::parse_from_str(prefix, "%Y-%m-%d").ok())
}

fn deserialize_date<'de, D>(deserializer: D) -> Result<NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_transaction_date(&s)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid transaction date: {}", s)))
}

fn serialize_date<S>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_str(&date.format("%Y-%m-%d"))
}
