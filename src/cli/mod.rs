//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod account;
pub mod analyze;
pub mod auth;
pub mod budget;
pub mod dashboard;
pub mod goal;
pub mod notification;
pub mod transaction;

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use clap::Args;

use crate::client::{ApiClient, Session};
use crate::config::{PulsePaths, Settings};
use crate::error::{PulseError, PulseResult};
use crate::models::Month;
use crate::services::load_dataset;
use crate::storage::Snapshot;

pub use account::{handle_account_command, AccountCommands};
pub use analyze::{
    handle_ai_command, handle_analyze_command, handle_check_purchase_command,
    handle_insights_command, handle_sync_command, AnalyzeArgs, CheckPurchaseArgs,
};
pub use auth::{handle_login, handle_logout, handle_register, handle_whoami};
pub use budget::{handle_budget_command, BudgetCommands};
pub use dashboard::{handle_dashboard_command, DashboardArgs};
pub use goal::{handle_goal_command, GoalCommands};
pub use notification::{handle_notification_command, NotificationCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

/// Paths and settings shared by every command
pub struct CliContext {
    pub paths: PulsePaths,
    pub settings: Settings,
}

impl CliContext {
    pub fn new(paths: PulsePaths, settings: Settings) -> Self {
        Self { paths, settings }
    }

    pub fn symbol(&self) -> &str {
        &self.settings.currency_symbol
    }

    /// A client with no session, for login and registration
    pub fn anonymous_client(&self) -> PulseResult<ApiClient> {
        ApiClient::new(&self.settings)
    }

    /// A client carrying the stored session; fails before any request when
    /// nobody is logged in
    pub fn client(&self) -> PulseResult<ApiClient> {
        let session = Session::require(&self.paths)?;
        Ok(ApiClient::new(&self.settings)?.with_session(session))
    }
}

/// Where the records come from and which month to look at
#[derive(Args, Debug, Clone, Default)]
pub struct DataArgs {
    /// Month: YYYY-MM, "current", "last" or "next"
    #[arg(short, long)]
    pub month: Option<String>,

    /// Use the snapshot saved by `sync` instead of the backend
    #[arg(long, conflicts_with = "input")]
    pub offline: bool,

    /// Use a snapshot file instead of the backend
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,
}

impl DataArgs {
    pub fn month(&self) -> PulseResult<Month> {
        resolve_month(self.month.as_deref(), Local::now().date_naive())
    }

    /// Whether the records come from disk rather than the backend
    pub fn is_local(&self) -> bool {
        self.offline || self.input.is_some()
    }

    /// Load budgets, transactions and accounts from the chosen source
    pub fn load(&self, ctx: &CliContext) -> PulseResult<Snapshot> {
        match local_snapshot(ctx, self.offline, self.input.as_deref())? {
            Some(snapshot) => Ok(snapshot),
            None => load_dataset(&ctx.client()?),
        }
    }
}

/// The snapshot named by `--input`, or the synced one for `--offline`
///
/// `None` means the records should come from the backend.
pub fn local_snapshot(
    ctx: &CliContext,
    offline: bool,
    input: Option<&Path>,
) -> PulseResult<Option<Snapshot>> {
    if let Some(path) = input {
        return Snapshot::load(path).map(Some);
    }
    if !offline {
        return Ok(None);
    }
    let path = ctx.paths.snapshot_file();
    if !path.exists() {
        return Err(PulseError::Storage(
            "No offline snapshot found. Run `budget-pulse sync` first.".into(),
        ));
    }
    Snapshot::load(path).map(Some)
}

/// Resolve a month argument relative to `today`
///
/// Accepts "YYYY-MM" (or "YYYY/MM"), "current", "last"/"prev" and "next".
/// No argument means the current month.
pub fn resolve_month(arg: Option<&str>, today: NaiveDate) -> PulseResult<Month> {
    let current = Month::containing(today);
    let Some(arg) = arg else {
        return Ok(current);
    };

    match arg.trim().to_lowercase().as_str() {
        "" | "current" | "this" => Ok(current),
        "last" | "prev" | "previous" => Ok(current.prev()),
        "next" => Ok(current.next()),
        other => Month::parse(other).map_err(|e| PulseError::Validation(e.to_string())),
    }
}
