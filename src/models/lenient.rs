//! Lenient field deserialization
//!
//! Backend records occasionally carry amounts and percentages as strings,
//! nulls or garbage, and text fields as null. Analytics must stay total, so
//! such values coerce to zero or the empty string instead of failing the
//! whole payload.

use serde::{Deserialize, Deserializer};

/// A JSON value that is read as a number when it looks like one
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum LenientNumber {
    Number(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl LenientNumber {
    /// The numeric value, or zero for anything non-numeric or non-finite
    pub(crate) fn value(&self) -> f64 {
        let v = match self {
            Self::Number(n) => *n,
            Self::Text(s) => s.trim().parse::<f64>().unwrap_or(0.0),
            Self::Other(_) => 0.0,
        };
        if v.is_finite() {
            v
        } else {
            0.0
        }
    }
}

/// `deserialize_with` helper for `f64` fields such as budget percentages
pub(crate) fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(LenientNumber::deserialize(deserializer)?.value())
}

/// `deserialize_with` helper for text fields the backend may send as null
///
/// Numbers keep their textual form; anything else becomes the empty string.
pub(crate) fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawText {
        Text(String),
        Number(serde_json::Number),
        Other(serde::de::IgnoredAny),
    }

    Ok(match RawText::deserialize(deserializer)? {
        RawText::Text(s) => s,
        RawText::Number(n) => n.to_string(),
        RawText::Other(_) => String::new(),
    })
}

/// `deserialize_with` helper for flags; `true`, non-zero numbers and
/// "true"/"1" count as set, anything else as unset
pub(crate) fn bool_or_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawFlag {
        Bool(bool),
        Number(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match RawFlag::deserialize(deserializer)? {
        RawFlag::Bool(b) => b,
        RawFlag::Number(n) => n != 0.0,
        RawFlag::Text(s) => matches!(s.trim(), "true" | "1"),
        RawFlag::Other(_) => false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Row {
        #[serde(default, deserialize_with = "f64_or_zero")]
        pct: f64,
        #[serde(default, deserialize_with = "string_or_empty")]
        label: String,
        #[serde(default, deserialize_with = "bool_or_false")]
        flag: bool,
    }

    fn pct(json: &str) -> f64 {
        serde_json::from_str::<Row>(json).unwrap().pct
    }

    fn label(json: &str) -> String {
        serde_json::from_str::<Row>(json).unwrap().label
    }

    #[test]
    fn test_numbers_and_strings() {
        assert_eq!(pct(r#"{"pct": 12.5}"#), 12.5);
        assert_eq!(pct(r#"{"pct": "30"}"#), 30.0);
    }

    #[test]
    fn test_garbage_is_zero() {
        assert_eq!(pct(r#"{"pct": null}"#), 0.0);
        assert_eq!(pct(r#"{"pct": "abc"}"#), 0.0);
        assert_eq!(pct(r#"{"pct": {"nested": 1}}"#), 0.0);
        assert_eq!(pct(r#"{"pct": "NaN"}"#), 0.0);
        assert_eq!(pct(r#"{}"#), 0.0);
    }

    #[test]
    fn test_null_text_is_empty() {
        assert_eq!(label(r#"{"label": "Rent"}"#), "Rent");
        assert_eq!(label(r#"{"label": null}"#), "");
        assert_eq!(label(r#"{"label": 42}"#), "42");
        assert_eq!(label(r#"{"label": ["x"]}"#), "");
        assert_eq!(label(r#"{}"#), "");
    }

    #[test]
    fn test_flags() {
        let flag = |json: &str| serde_json::from_str::<Row>(json).unwrap().flag;
        assert!(flag(r#"{"flag": true}"#));
        assert!(flag(r#"{"flag": 1}"#));
        assert!(flag(r#"{"flag": "true"}"#));
        assert!(!flag(r#"{"flag": 0}"#));
        assert!(!flag(r#"{"flag": null}"#));
        assert!(!flag(r#"{}"#));
    }
}
