//! Savings goal model
//!
//! Goals are owned by the backend. Some endpoints answer in camelCase and
//! others in snake_case, so both spellings are accepted.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::ids::GoalId;
use super::lenient::string_or_empty;
use super::money::Money;
use super::transaction::parse_transaction_date;

/// A savings goal and how much has been put toward it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: GoalId,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub title: String,

    #[serde(alias = "target_amount", default)]
    pub target_amount: Money,

    #[serde(alias = "current_amount", default)]
    pub current_amount: Money,

    /// Optional deadline; unreadable dates are dropped
    #[serde(
        alias = "target_date",
        default,
        skip_serializing_if = "Option::is_none",
        serialize_with = "serialize_target_date",
        deserialize_with = "deserialize_target_date"
    )]
    pub target_date: Option<NaiveDate>,
}

impl Goal {
    pub fn new(id: impl Into<GoalId>, title: impl Into<String>, target_amount: Money) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            target_amount,
            current_amount: Money::zero(),
            target_date: None,
        }
    }

    /// Progress toward the target as a whole percentage, capped at 100
    ///
    /// A goal without a positive target reports 0.
    pub fn progress_percent(&self) -> u8 {
        let target = i128::from(self.target_amount.cents());
        if target <= 0 {
            return 0;
        }
        let current = i128::from(self.current_amount.cents().max(0));
        let percent = (current * 100 + target / 2) / target;
        percent.min(100) as u8
    }

    /// What is still missing to reach the target, never negative
    pub fn remaining(&self) -> Money {
        let left = self.target_amount - self.current_amount;
        if left.is_positive() {
            left
        } else {
            Money::zero()
        }
    }

    pub fn is_complete(&self) -> bool {
        self.target_amount.is_positive() && self.current_amount >= self.target_amount
    }

    /// Days from `today` until the target date; negative once it has passed
    pub fn days_left(&self, today: NaiveDate) -> Option<i64> {
        self.target_date.map(|d| (d - today).num_days())
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} / {}, {}%)",
            self.title,
            self.current_amount,
            self.target_amount,
            self.progress_percent()
        )
    }
}

fn deserialize_target_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = string_or_empty(deserializer)?;
    Ok(parse_transaction_date(&raw))
}

fn serialize_target_date<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match date {
        Some(d) => serializer.collect_str(&d.format("%Y-%m-%d")),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn goal(current: i64, target: i64) -> Goal {
        let mut g = Goal::new("g1", "Trip", Money::from_cents(target));
        g.current_amount = Money::from_cents(current);
        g
    }

    #[test]
    fn test_both_spellings() {
        let camel: Goal = serde_json::from_str(
            r#"{"id":"g1","title":"Car","targetAmount":5000,"currentAmount":"1250.50","targetDate":"2026-06-30"}"#,
        )
        .unwrap();
        let snake: Goal = serde_json::from_str(
            r#"{"id":"g1","title":"Car","target_amount":5000,"current_amount":1250.5,"target_date":"2026-06-30T00:00:00"}"#,
        )
        .unwrap();
        assert_eq!(camel, snake);
        assert_eq!(camel.current_amount.cents(), 125_050);
        assert_eq!(camel.target_date, NaiveDate::from_ymd_opt(2026, 6, 30));
    }

    #[test]
    fn test_sparse_record() {
        let g: Goal = serde_json::from_str(r#"{"id":7,"title":null,"targetDate":"someday"}"#).unwrap();
        assert_eq!(g.id.as_str(), "7");
        assert_eq!(g.title, "");
        assert!(g.target_amount.is_zero());
        assert!(g.target_date.is_none());
        assert_eq!(g.progress_percent(), 0);
    }

    #[test]
    fn test_progress_percent() {
        assert_eq!(goal(0, 10_000).progress_percent(), 0);
        assert_eq!(goal(2_550, 10_000).progress_percent(), 26);
        assert_eq!(goal(2_549, 10_000).progress_percent(), 25);
        assert_eq!(goal(15_000, 10_000).progress_percent(), 100);
        assert_eq!(goal(-500, 10_000).progress_percent(), 0);
        assert_eq!(goal(500, 0).progress_percent(), 0);
    }

    #[test]
    fn test_remaining_and_complete() {
        assert_eq!(goal(2_500, 10_000).remaining(), Money::from_cents(7_500));
        assert!(goal(12_000, 10_000).remaining().is_zero());
        assert!(goal(10_000, 10_000).is_complete());
        assert!(!goal(9_999, 10_000).is_complete());
        assert!(!goal(0, 0).is_complete());
    }

    #[test]
    fn test_days_left() {
        let mut g = goal(0, 100);
        let today = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        assert_eq!(g.days_left(today), None);
        g.target_date = NaiveDate::from_ymd_opt(2026, 1, 31);
        assert_eq!(g.days_left(today), Some(30));
    }
}
