//! Display formatting for terminal output
//!
//! Tables and report blocks for analyses, the dashboard, purchase checks
//! and backend records. Everything returns a `String`; printing is left to the CLI.

pub mod analysis;
pub mod overview;
pub mod purchase;
pub mod records;
pub mod report;

pub use analysis::{format_analysis, format_budget_table, format_insights, format_summary};
pub use overview::format_overview;
pub use purchase::{format_ai_analysis, format_purchase_check};
pub use records::{
    format_account_list, format_budget_list, format_category_catalog, format_goal_list,
    format_notification_list, format_transaction_list, format_user,
};
