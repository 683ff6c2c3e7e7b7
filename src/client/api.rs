//! Blocking REST client for the budget backend

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::session::Session;
use super::types::{
    AIAnalysis, AuthResponse, BudgetUpdate, GoalContribution, LoginRequest, NewAccount, NewBudget,
    NewGoal, NewNotification, NewTransaction, PurchaseRequest, RegisterRequest, TransactionUpdate,
};
use crate::analytics::PurchaseCheck;
use crate::config::Settings;
use crate::error::{PulseError, PulseResult};
use crate::models::{
    Account, Budget, BudgetId, Goal, GoalId, Month, Notification, Transaction, TransactionId, User,
    UserId,
};

/// Client for the REST backend
///
/// Per-user endpoints need a [`Session`]; without one they fail with
/// `NotLoggedIn` before any request is sent.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Option<Session>,
}

impl ApiClient {
    pub fn new(settings: &Settings) -> PulseResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .user_agent(concat!("budget-pulse/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PulseError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            session: None,
        })
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = Some(session);
        self
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn session_user_id(&self) -> PulseResult<UserId> {
        self.session
            .as_ref()
            .ok_or(PulseError::NotLoggedIn)?
            .user_id()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, self.url(path));
        match &self.session {
            Some(session) => builder.bearer_auth(&session.token),
            None => builder,
        }
    }

    /// Send a request and return the raw body of a successful response
    fn execute(&self, builder: RequestBuilder, method: &Method, path: &str) -> PulseResult<String> {
        tracing::debug!(%method, path, "backend request");
        let response = builder.send()?;
        let status = response.status();
        let body = response.text()?;
        tracing::debug!(%method, path, status = status.as_u16(), "backend response");

        if !status.is_success() {
            return Err(map_error_status(status.as_u16(), &body));
        }
        Ok(body)
    }

    fn call<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> PulseResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let mut builder = self.request(method.clone(), path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let text = self.execute(builder, &method, path)?;
        serde_json::from_str(&text).map_err(|e| {
            PulseError::Json(format!("Unexpected response from {} {}: {}", method, path, e))
        })
    }

    fn get<T: DeserializeOwned>(&self, path: &str) -> PulseResult<T> {
        self.call::<(), T>(Method::GET, path, None)
    }

    fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> PulseResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.call(method, path, Some(body))
    }

    /// DELETE, ignoring whatever body the backend returns
    fn delete(&self, path: &str) -> PulseResult<()> {
        let builder = self.request(Method::DELETE, path);
        self.execute(builder, &Method::DELETE, path).map(|_| ())
    }

    // Users

    pub fn register(&self, request: &RegisterRequest) -> PulseResult<AuthResponse> {
        self.send_json(Method::POST, "/users/register", request)
    }

    pub fn login(&self, email: &str) -> PulseResult<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
        };
        self.send_json(Method::POST, "/users/login", &body)
    }

    pub fn get_user(&self, id: &UserId) -> PulseResult<User> {
        self.get(&format!("/users/{}", id))
    }

    // Accounts

    pub fn list_accounts(&self) -> PulseResult<Vec<Account>> {
        let user_id = self.session_user_id()?;
        self.get(&format!("/accounts/user/{}", user_id))
    }

    pub fn create_account(&self, account: &NewAccount) -> PulseResult<Account> {
        self.session_user_id()?;
        self.send_json(Method::POST, "/accounts", account)
    }

    // Transactions

    pub fn list_transactions(&self) -> PulseResult<Vec<Transaction>> {
        let user_id = self.session_user_id()?;
        self.get(&format!("/transactions/user/{}", user_id))
    }

    pub fn create_transaction(&self, txn: &NewTransaction) -> PulseResult<Transaction> {
        self.session_user_id()?;
        self.send_json(Method::POST, "/transactions", txn)
    }

    pub fn update_transaction(
        &self,
        id: &TransactionId,
        update: &TransactionUpdate,
    ) -> PulseResult<Transaction> {
        self.session_user_id()?;
        self.send_json(Method::PUT, &format!("/transactions/{}", id), update)
    }

    pub fn delete_transaction(&self, id: &TransactionId) -> PulseResult<()> {
        self.session_user_id()?;
        self.delete(&format!("/transactions/{}", id))
    }

    // Budgets

    pub fn list_budgets(&self) -> PulseResult<Vec<Budget>> {
        let user_id = self.session_user_id()?;
        self.get(&format!("/budgets/user/{}", user_id))
    }

    pub fn create_budget(&self, budget: &NewBudget) -> PulseResult<Budget> {
        self.session_user_id()?;
        self.send_json(Method::POST, "/budgets", budget)
    }

    pub fn update_budget(&self, id: &BudgetId, percentage: f64) -> PulseResult<Budget> {
        self.session_user_id()?;
        self.send_json(
            Method::PUT,
            &format!("/budgets/{}", id),
            &BudgetUpdate { percentage },
        )
    }

    pub fn delete_budget(&self, id: &BudgetId) -> PulseResult<()> {
        self.session_user_id()?;
        self.delete(&format!("/budgets/{}", id))
    }

    /// The backend's own analysis; its shape is not fixed, so it stays raw JSON
    pub fn analyze_budgets(&self, month: Option<Month>) -> PulseResult<serde_json::Value> {
        self.session_user_id()?;
        let path = match month {
            Some(m) => format!("/budgets/analyze?month={}", m),
            None => "/budgets/analyze".to_string(),
        };
        self.get(&path)
    }

    pub fn check_purchase(&self, request: &PurchaseRequest) -> PulseResult<PurchaseCheck> {
        self.session_user_id()?;
        self.send_json(Method::POST, "/budgets/check-purchase", request)
    }

    // Goals

    pub fn list_goals(&self) -> PulseResult<Vec<Goal>> {
        let user_id = self.session_user_id()?;
        self.get(&format!("/goals/user/{}", user_id))
    }

    pub fn create_goal(&self, goal: &NewGoal) -> PulseResult<Goal> {
        self.session_user_id()?;
        self.send_json(Method::POST, "/goals", goal)
    }

    /// Add `contribution.amount` to the goal's progress
    ///
    /// The response body is not relied on; callers update their copy.
    pub fn contribute_to_goal(&self, id: &GoalId, contribution: &GoalContribution) -> PulseResult<()> {
        self.session_user_id()?;
        let path = format!("/goals/{}", id);
        let builder = self.request(Method::PATCH, &path).json(contribution);
        self.execute(builder, &Method::PATCH, &path).map(|_| ())
    }

    pub fn delete_goal(&self, id: &GoalId) -> PulseResult<()> {
        self.session_user_id()?;
        self.delete(&format!("/goals/{}", id))
    }

    // Notifications

    pub fn list_notifications(&self) -> PulseResult<Vec<Notification>> {
        let user_id = self.session_user_id()?;
        self.get(&format!("/notifications/user/{}", user_id))
    }

    pub fn create_notification(&self, notification: &NewNotification) -> PulseResult<Notification> {
        self.session_user_id()?;
        self.send_json(Method::POST, "/notifications", notification)
    }

    // AI

    pub fn ai_analysis(&self) -> PulseResult<AIAnalysis> {
        let user_id = self.session_user_id()?;
        self.get(&format!("/ai/analyze?userId={}", user_id))
    }
}

/// Error for a non-success HTTP status
///
/// 401 and 403 mean the token is no longer accepted. Anything else uses the
/// body's `message` field when present, else `HTTP <status>`.
pub fn map_error_status(status: u16, body: &str) -> PulseError {
    if status == 401 || status == 403 {
        return PulseError::SessionExpired;
    }

    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status));

    PulseError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn client() -> ApiClient {
        let settings = Settings {
            // Nothing listens here; tests below must fail before connecting
            api_base_url: "http://127.0.0.1:9/api/".to_string(),
            ..Settings::default()
        };
        ApiClient::new(&settings).unwrap()
    }

    #[test]
    fn test_auth_statuses_expire_session() {
        assert!(matches!(map_error_status(401, ""), PulseError::SessionExpired));
        assert!(matches!(
            map_error_status(403, r#"{"message":"forbidden"}"#),
            PulseError::SessionExpired
        ));
    }

    #[test]
    fn test_message_field_is_used() {
        match map_error_status(400, r#"{"message":"Category already has a budget"}"#) {
            PulseError::Api { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Category already has a budget");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_fallback_message() {
        for body in ["<html>oops</html>", "", r#"{"error":"x"}"#, r#"{"message":""}"#] {
            match map_error_status(502, body) {
                PulseError::Api { message, .. } => assert_eq!(message, "HTTP 502"),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        assert_eq!(client().base_url(), "http://127.0.0.1:9/api");
        assert_eq!(client().url("/budgets"), "http://127.0.0.1:9/api/budgets");
    }

    #[test]
    fn test_per_user_calls_need_session() {
        let api = client();
        assert!(matches!(api.list_budgets(), Err(PulseError::NotLoggedIn)));
        assert!(matches!(api.list_transactions(), Err(PulseError::NotLoggedIn)));
        assert!(matches!(api.list_accounts(), Err(PulseError::NotLoggedIn)));
        assert!(matches!(api.ai_analysis(), Err(PulseError::NotLoggedIn)));
        assert!(matches!(
            api.delete_budget(&BudgetId::new("b1")),
            Err(PulseError::NotLoggedIn)
        ));
        assert!(matches!(api.list_goals(), Err(PulseError::NotLoggedIn)));
        assert!(matches!(api.list_notifications(), Err(PulseError::NotLoggedIn)));
    }

    #[test]
    fn test_writes_need_session() {
        let api = client();
        let account = NewAccount {
            name: "Main".into(),
            account_type: "checking".into(),
            balance: None,
        };
        let txn = NewTransaction {
            account_id: None,
            amount: Money::from_cents(100),
            kind: "expense".into(),
            category: "Dining".into(),
            description: None,
            transaction_date: None,
        };
        let goal = NewGoal {
            title: "Trip".into(),
            target_amount: Money::from_cents(100_000),
            target_date: None,
        };
        let id = TransactionId::new("t1");

        assert!(matches!(api.create_account(&account), Err(PulseError::NotLoggedIn)));
        assert!(matches!(api.create_transaction(&txn), Err(PulseError::NotLoggedIn)));
        assert!(matches!(
            api.update_transaction(&id, &TransactionUpdate::default()),
            Err(PulseError::NotLoggedIn)
        ));
        assert!(matches!(api.delete_transaction(&id), Err(PulseError::NotLoggedIn)));
        assert!(matches!(api.update_budget(&BudgetId::new("b1"), 10.0), Err(PulseError::NotLoggedIn)));
        assert!(matches!(api.create_goal(&goal), Err(PulseError::NotLoggedIn)));
        assert!(matches!(
            api.contribute_to_goal(&GoalId::new("g1"), &GoalContribution { amount: Money::from_cents(1) }),
            Err(PulseError::NotLoggedIn)
        ));
        assert!(matches!(
            api.create_notification(&NewNotification { kind: "info".into(), message: "hi".into() }),
            Err(PulseError::NotLoggedIn)
        ));
    }
}
