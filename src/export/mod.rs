//! Export functionality for budget-pulse
//!
//! Spreadsheet-friendly CSV of a month's budget progress. The JSON form of
//! an analysis is the serde encoding of [`crate::analytics::BudgetAnalysis`]
//! and needs no module of its own.

pub mod csv;

pub use self::csv::{export_budget_progress_csv, export_budget_progress_file};
