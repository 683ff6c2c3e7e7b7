//! Service layer for budget-pulse
//!
//! Business rules on top of the backend client: the concurrent load cycles
//! and validated mutations.

pub mod account;
pub mod budget;
pub mod dataset;
pub mod goal;
pub mod notification;
pub mod transaction;

pub use account::AccountService;
pub use budget::BudgetService;
pub use dataset::{load_dataset, load_overview_data, FinanceBackend, OverviewData};
pub use goal::GoalService;
pub use notification::NotificationService;
pub use transaction::{TransactionDraft, TransactionService};
