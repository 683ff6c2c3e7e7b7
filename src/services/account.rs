//! Account service

use crate::client::types::NewAccount;
use crate::client::ApiClient;
use crate::error::{PulseError, PulseResult};
use crate::models::{Account, AccountType, Money};

/// Service for account management
pub struct AccountService<'a> {
    api: &'a ApiClient,
}

impl<'a> AccountService<'a> {
    pub fn new(api: &'a ApiClient) -> Self {
        Self { api }
    }

    pub fn list(&self) -> PulseResult<Vec<Account>> {
        self.api.list_accounts()
    }

    /// Create an account with an optional opening balance
    pub fn create(
        &self,
        name: &str,
        account_type: AccountType,
        balance: Option<Money>,
    ) -> PulseResult<Account> {
        let body = new_account_request(name, account_type, balance)?;
        let account = self.api.create_account(&body)?;
        tracing::info!(id = %account.id, name = %account.name, "created account");
        Ok(account)
    }
}

fn new_account_request(
    name: &str,
    account_type: AccountType,
    balance: Option<Money>,
) -> PulseResult<NewAccount> {
    let name = name.trim();
    if name.is_empty() {
        return Err(PulseError::Validation("Account name is required".into()));
    }
    Ok(NewAccount {
        name: name.to_string(),
        account_type: account_type.to_string(),
        balance,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_validation() {
        assert!(new_account_request("  ", AccountType::Checking, None)
            .unwrap_err()
            .is_validation());

        let body = new_account_request(" Rainy day ", AccountType::Savings, Some(Money::from_cents(5000)))
            .unwrap();
        assert_eq!(body.name, "Rainy day");
        assert_eq!(body.account_type, "savings");
    }
}
