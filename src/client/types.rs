//! Request and response bodies of the REST backend

use serde::{Deserialize, Serialize};

use crate::models::{AccountId, Money, User};

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_income: Option<Money>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
}

/// Body returned by login and registration
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: User,
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewAccount {
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub balance: Option<Money>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTransaction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    pub amount: Money,
    #[serde(rename = "type")]
    pub kind: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<String>,
}

/// Partial update; absent fields are left unchanged by the backend
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<AccountId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Money>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_date: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewBudget {
    pub category: String,
    pub percentage: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recommended_percentage: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetUpdate {
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    pub target_amount: Money,
    /// "YYYY-MM-DD"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_date: Option<String>,
}

/// Amount added to a goal's current progress
#[derive(Debug, Clone, Serialize)]
pub struct GoalContribution {
    pub amount: Money,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewNotification {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseRequest {
    pub amount: Money,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Server-generated spending analysis from `/ai/analyze`
///
/// Every section is optional on the wire; the backend omits what it
/// could not compute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AIAnalysis {
    pub insight: String,
    pub spending_analysis: Vec<SpendingTrend>,
    pub anomalies: Vec<Anomaly>,
    pub budget_health: Vec<BudgetHealth>,
    pub savings_opportunities: Vec<SavingsOpportunity>,
    pub cash_flow_forecast: Option<CashFlowForecast>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SpendingTrend {
    pub category: String,
    /// "up", "down" or "stable"
    pub trend: String,
    pub percentage_change: f64,
    pub recommendation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Anomaly {
    pub id: String,
    pub date: String,
    pub amount: Money,
    pub category: Option<String>,
    pub description: Option<String>,
    pub reason: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BudgetHealth {
    pub category: String,
    pub budgeted: Money,
    pub spent: Money,
    pub remaining: Money,
    /// "on_track", "overspending" or "under_spending"
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SavingsOpportunity {
    #[serde(rename = "type")]
    pub kind: String,
    pub potential_savings: Money,
    pub suggestion: String,
    /// "easy", "medium" or "hard"
    pub difficulty: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CashFlowForecast {
    pub projected_balance: Money,
    pub days_until_zero: Option<i64>,
    /// "low", "medium" or "high"
    pub risk_level: String,
    pub recommendations: Vec<String>,
}
