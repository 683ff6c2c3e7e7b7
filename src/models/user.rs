//! User profile as returned by the backend on login/registration

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::UserId;
use super::money::Money;

/// A signed-in user's profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,

    #[serde(default)]
    pub username: String,

    #[serde(default)]
    pub email: String,

    /// Income stated at registration. Analytics never use this; they
    /// recompute income from the month's transactions.
    #[serde(
        rename = "monthlyIncome",
        alias = "monthly_income",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub monthly_income: Option<Money>,
}

impl fmt::Display for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}>", self.username, self.email)
    }
}
