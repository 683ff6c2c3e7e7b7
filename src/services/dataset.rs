//! Dataset loading
//!
//! A load cycle fetches budgets, transactions and accounts concurrently and
//! succeeds only if all three do. Analyses are never computed from a
//! partial dataset.
//!
//! The overview is the exception: it loads accounts, transactions and goals
//! and shows whatever arrived, leaving a failed list empty.

use std::thread::{self, ScopedJoinHandle};

use crate::client::ApiClient;
use crate::error::{PulseError, PulseResult};
use crate::models::{Account, Budget, Goal, Transaction};
use crate::storage::Snapshot;

/// A source of the three record lists the analytics need
pub trait FinanceBackend: Sync {
    fn budgets(&self) -> PulseResult<Vec<Budget>>;
    fn transactions(&self) -> PulseResult<Vec<Transaction>>;
    fn accounts(&self) -> PulseResult<Vec<Account>>;

    /// Savings goals; sources that carry none report an empty list
    fn goals(&self) -> PulseResult<Vec<Goal>> {
        Ok(Vec::new())
    }
}

impl FinanceBackend for ApiClient {
    fn budgets(&self) -> PulseResult<Vec<Budget>> {
        self.list_budgets()
    }

    fn transactions(&self) -> PulseResult<Vec<Transaction>> {
        self.list_transactions()
    }

    fn accounts(&self) -> PulseResult<Vec<Account>> {
        self.list_accounts()
    }

    fn goals(&self) -> PulseResult<Vec<Goal>> {
        self.list_goals()
    }
}

impl FinanceBackend for Snapshot {
    fn budgets(&self) -> PulseResult<Vec<Budget>> {
        Ok(self.budgets.clone())
    }

    fn transactions(&self) -> PulseResult<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }

    fn accounts(&self) -> PulseResult<Vec<Account>> {
        Ok(self.accounts.clone())
    }

    fn goals(&self) -> PulseResult<Vec<Goal>> {
        Ok(self.goals.clone())
    }
}

/// Fetch all three lists concurrently
///
/// Waits for every fetch. If any fails, the first failure (in the order
/// budgets, transactions, accounts) is returned and nothing else is.
pub fn load_dataset<B: FinanceBackend + ?Sized>(backend: &B) -> PulseResult<Snapshot> {
    let (budgets, transactions, accounts) = thread::scope(|s| {
        let budgets = s.spawn(|| backend.budgets());
        let transactions = s.spawn(|| backend.transactions());
        let accounts = s.spawn(|| backend.accounts());
        (
            join("budgets", budgets),
            join("transactions", transactions),
            join("accounts", accounts),
        )
    });

    let snapshot = Snapshot::new(budgets?, transactions?, accounts?);
    tracing::debug!(
        budgets = snapshot.budgets.len(),
        transactions = snapshot.transactions.len(),
        accounts = snapshot.accounts.len(),
        "dataset loaded"
    );
    Ok(snapshot)
}

/// Inputs of the financial overview
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OverviewData {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub goals: Vec<Goal>,
    /// Lists that failed to load and are shown as empty
    pub missing: Vec<&'static str>,
}

/// Fetch accounts, transactions and goals concurrently, tolerating failures
///
/// A list that fails to load is left empty and named in `missing`. Session
/// problems still fail the whole load, since nothing else can succeed.
pub fn load_overview_data<B: FinanceBackend + ?Sized>(backend: &B) -> PulseResult<OverviewData> {
    let (accounts, transactions, goals) = thread::scope(|s| {
        let accounts = s.spawn(|| backend.accounts());
        let transactions = s.spawn(|| backend.transactions());
        let goals = s.spawn(|| backend.goals());
        (
            join("accounts", accounts),
            join("transactions", transactions),
            join("goals", goals),
        )
    });

    let mut missing = Vec::new();
    let data = OverviewData {
        accounts: settle("accounts", accounts, &mut missing)?,
        transactions: settle("transactions", transactions, &mut missing)?,
        goals: settle("goals", goals, &mut missing)?,
        missing,
    };
    tracing::debug!(
        accounts = data.accounts.len(),
        transactions = data.transactions.len(),
        goals = data.goals.len(),
        missing = data.missing.len(),
        "overview data loaded"
    );
    Ok(data)
}

fn settle<T>(
    what: &'static str,
    result: PulseResult<Vec<T>>,
    missing: &mut Vec<&'static str>,
) -> PulseResult<Vec<T>> {
    match result {
        Ok(list) => Ok(list),
        Err(e) if e.is_auth_failure() || matches!(e, PulseError::NotLoggedIn) => Err(e),
        Err(_) => {
            missing.push(what);
            Ok(Vec::new())
        }
    }
}

fn join<T>(what: &str, handle: ScopedJoinHandle<'_, PulseResult<T>>) -> PulseResult<T> {
    let result = handle
        .join()
        .unwrap_or_else(|_| Err(PulseError::Http(format!("Fetching {} panicked", what))));
    if let Err(e) = &result {
        tracing::warn!(error = %e, "failed to fetch {}", what);
    }
    result
}
