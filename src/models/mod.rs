//! Core data models for budget-pulse
//!
//! Records served by the backend (budgets, transactions, accounts, users,
//! savings goals and notifications), the `Money` and `Month` value types,
//! and the reference category catalog.

pub mod account;
pub mod budget;
pub mod category;
pub mod goal;
pub mod ids;
pub(crate) mod lenient;
pub mod money;
pub mod month;
pub mod notification;
pub mod transaction;
pub mod user;

pub use account::{Account, AccountType};
pub use budget::{Budget, BudgetValidationError};
pub use category::{CategoryInfo, CategoryKind};
pub use goal::Goal;
pub use ids::{AccountId, BudgetId, GoalId, NotificationId, TransactionId, UserId};
pub use money::Money;
pub use month::Month;
pub use notification::{Notification, NotificationKind};
pub use transaction::{Transaction, TransactionType};
pub use user::User;
