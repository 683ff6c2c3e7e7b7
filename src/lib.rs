//! budget-pulse - budget analytics for a personal-finance backend
//!
//! This library loads a user's budgets, transactions, accounts and goals from
//! a REST backend (or a saved snapshot) and derives a monthly picture from
//! them: cash-flow summary, per-budget progress and health, prioritized
//! insights and purchase affordability checks. An all-time overview backs the
//! dashboard.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `analytics`: Pure month analysis (summary, progress, insights, affordability)
//!   and the dashboard overview
//! - `client`: Blocking REST client and session handling
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (budgets, transactions, accounts, goals,
//!   notifications, money, months)
//! - `services`: Validation and dataset loading over the client
//! - `storage`: JSON file storage and offline snapshots
//! - `display` / `export`: Terminal rendering and CSV output
//! - `cli`: Command handlers for the binary
//!
//! # Example
//!
//! ```rust,ignore
//! use budget_pulse::analytics::{AnalysisContext, BudgetAnalyticsEngine};
//! use budget_pulse::models::Month;
//! use budget_pulse::storage::Snapshot;
//!
//! let snapshot = Snapshot::load("snapshot.json")?;
//! let analysis = BudgetAnalyticsEngine::analyze(
//!     &snapshot.budgets,
//!     &snapshot.transactions,
//!     &snapshot.accounts,
//!     &AnalysisContext::now(Month::current()),
//! );
//! ```

pub mod analytics;
pub mod cli;
pub mod client;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod models;
pub mod services;
pub mod storage;

pub use error::{PulseError, PulseResult};
