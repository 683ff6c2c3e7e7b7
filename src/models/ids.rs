//! Strongly-typed ID wrappers for backend entities
//!
//! The backend owns identifier generation, so IDs are opaque strings. Newtype
//! wrappers still prevent mixing up IDs from different entity types at
//! compile time.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Accepts string or numeric identifiers from the backend
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Int(i64),
        Uint(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Int(n) => n.to_string(),
        RawId::Uint(n) => n.to_string(),
    })
}

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[doc = concat!("Backend identifier of a ", $entity)]
        #[derive(
            Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(#[serde(deserialize_with = "string_or_number")] String);

        impl $name {
            /// Wrap an identifier issued by the backend
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the raw identifier
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Whether the identifier is blank
            pub fn is_empty(&self) -> bool {
                self.0.trim().is_empty()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.to_string())
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.trim().to_string()))
            }
        }
    };
}

define_id!(AccountId, "account");
define_id!(TransactionId, "transaction");
define_id!(BudgetId, "budget");
define_id!(UserId, "user");
define_id!(GoalId, "savings goal");
define_id!(NotificationId, "notification");
