//! Notification model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use super::ids::NotificationId;
use super::lenient::{bool_or_false, string_or_empty};

/// Severity of a notification
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Warning,
    Success,
    #[default]
    Info,
    /// Anything the backend sends that we don't model
    #[serde(untagged)]
    Other(String),
}

impl NotificationKind {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "warning" | "warn" => Self::Warning,
            "success" | "ok" => Self::Success,
            "info" | "" => Self::Info,
            other => Self::Other(other.to_string()),
        }
    }

    /// Short marker for terminal lists
    pub fn marker(&self) -> &'static str {
        match self {
            Self::Warning => "[!]",
            Self::Success => "[+]",
            Self::Info | Self::Other(_) => "[i]",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Warning => write!(f, "warning"),
            Self::Success => write!(f, "success"),
            Self::Info => write!(f, "info"),
            Self::Other(s) => write!(f, "{}", s),
        }
    }
}

/// A message the backend keeps for the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: NotificationId,

    #[serde(rename = "type", default, deserialize_with = "deserialize_kind")]
    pub kind: NotificationKind,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub message: String,

    #[serde(alias = "isRead", default, deserialize_with = "bool_or_false")]
    pub is_read: bool,

    #[serde(
        alias = "createdAt",
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "deserialize_timestamp"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind.marker(), self.message)
    }
}

fn deserialize_kind<'de, D>(deserializer: D) -> Result<NotificationKind, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(NotificationKind::parse(&string_or_empty(deserializer)?))
}

fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = string_or_empty(deserializer)?;
    Ok(DateTime::parse_from_rfc3339(raw.trim())
        .ok()
        .map(|ts| ts.with_timezone(&Utc)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_deserialize_backend_shape() {
        let json = r#"{"id":"n1","type":"warning","message":"Dining is over budget",
            "is_read":false,"created_at":"2025-03-04T09:15:00.000Z"}"#;
        let n: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(n.kind, NotificationKind::Warning);
        assert!(!n.is_read);
        assert_eq!(
            n.created_at,
            Some(Utc.with_ymd_and_hms(2025, 3, 4, 9, 15, 0).unwrap())
        );
        assert_eq!(n.to_string(), "[!] Dining is over budget");
    }

    #[test]
    fn test_lenient_fields() {
        let json = r#"[
            {"id":1,"type":"reminder","message":null,"isRead":1,"createdAt":"yesterday"},
            {"id":2},
            {"id":3,"type":null}
        ]"#;
        let list: Vec<Notification> = serde_json::from_str(json).unwrap();
        assert_eq!(list[0].kind, NotificationKind::Other("reminder".into()));
        assert_eq!(list[0].message, "");
        assert!(list[0].is_read);
        assert!(list[0].created_at.is_none());
        assert_eq!(list[1].kind, NotificationKind::Info);
        assert_eq!(list[2].kind, NotificationKind::Info);
    }

    #[test]
    fn test_parse_kind() {
        assert_eq!(NotificationKind::parse("Warning"), NotificationKind::Warning);
        assert_eq!(NotificationKind::parse(""), NotificationKind::Info);
        assert_eq!(NotificationKind::parse("promo").to_string(), "promo");
    }
}
