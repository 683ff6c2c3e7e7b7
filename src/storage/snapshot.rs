//! Offline dataset snapshot
//!
//! `sync` writes the budgets, transactions, accounts and goals fetched from
//! the backend to `data/snapshot.json` so analyses can be rerun without a
//! network. The same shape is accepted from any file via `--input`.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::file_io::{load_json_required, save_json};
use crate::error::PulseError;
use crate::models::{Account, Budget, Goal, Transaction, User};

/// Everything the analytics need, captured at one point in time
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// When the data was fetched; absent for hand-written files
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    #[serde(default)]
    pub budgets: Vec<Budget>,

    #[serde(default)]
    pub transactions: Vec<Transaction>,

    #[serde(default)]
    pub accounts: Vec<Account>,

    #[serde(default)]
    pub goals: Vec<Goal>,
}

impl Snapshot {
    pub fn new(budgets: Vec<Budget>, transactions: Vec<Transaction>, accounts: Vec<Account>) -> Self {
        Self {
            saved_at: None,
            user: None,
            budgets,
            transactions,
            accounts,
            goals: Vec::new(),
        }
    }

    /// Load a snapshot; the file must exist
    pub fn load(path: impl AsRef<Path>) -> Result<Self, PulseError> {
        let path = path.as_ref();
        let snapshot: Snapshot = load_json_required(path)?;
        tracing::debug!(
            path = %path.display(),
            budgets = snapshot.budgets.len(),
            transactions = snapshot.transactions.len(),
            accounts = snapshot.accounts.len(),
            "loaded snapshot"
        );
        Ok(snapshot)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), PulseError> {
        save_json(path.as_ref(), self)
    }
}
