//! Account model
//!
//! Accounts only matter to analytics as the set of account IDs whose history
//! is replayed for the starting balance. The stored balance is display-only.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::AccountId;
use super::money::Money;

/// Type of financial account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    #[default]
    Checking,
    Savings,
    Credit,
    Cash,
    Investment,
    /// Anything the backend sends that we don't model
    #[serde(untagged)]
    Other(String),
}

impl AccountType {
    /// Parse account type from string
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "checking" => Self::Checking,
            "savings" => Self::Savings,
            "credit" | "credit_card" | "creditcard" => Self::Credit,
            "cash" => Self::Cash,
            "investment" => Self::Investment,
            other => Self::Other(other.to_string()),
        }
    }

    /// Returns true if this account type typically carries debt
    pub fn is_liability(&self) -> bool {
        matches!(self, Self::Credit)
    }
}

impl fmt::Display for AccountType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Checking => write!(f, "checking"),
            Self::Savings => write!(f, "savings"),
            Self::Credit => write!(f, "credit"),
            Self::Cash => write!(f, "cash"),
            Self::Investment => write!(f, "investment"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

/// A financial account
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    /// Unique identifier
    pub id: AccountId,

    /// Account name
    #[serde(default)]
    pub name: String,

    /// Balance as stored by the backend
    #[serde(default)]
    pub balance: Money,

    /// Account type
    #[serde(rename = "type", default)]
    pub account_type: AccountType,
}

impl Account {
    /// Create a new account
    pub fn new(id: impl Into<AccountId>, name: impl Into<String>, account_type: AccountType) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance: Money::zero(),
            account_type,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.account_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize() {
        let json = r#"{"id":"a1","name":"Main","balance":"1200.50","type":"savings"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.balance.cents(), 120_050);
        assert_eq!(account.account_type, AccountType::Savings);
    }

    #[test]
    fn test_unknown_type_is_preserved() {
        let json = r#"{"id":"a1","name":"Wallet","balance":0,"type":"crypto"}"#;
        let account: Account = serde_json::from_str(json).unwrap();
        assert_eq!(account.account_type, AccountType::Other("crypto".into()));
        assert_eq!(account.account_type.to_string(), "crypto");
    }

    #[test]
    fn test_parse_type() {
        assert_eq!(AccountType::parse("Credit_Card"), AccountType::Credit);
        assert!(AccountType::parse("credit").is_liability());
    }
}
