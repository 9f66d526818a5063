//! Lenient field decoding for record snapshots.
//!
//! Every optional field on a [`ContactRecord`](crate::ContactRecord) already
//! has an "absent" meaning, so a malformed value decodes as absent instead of
//! rejecting the whole record. Each fallback is logged at `warn`.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::warn;

/// Enum-like fields that accept free-form strings.
pub trait LenientEnum: Sized {
    /// Field name used in log output.
    const FIELD: &'static str;

    /// Map a normalized token (see [`normalize`]) to a variant, `None` when unknown.
    fn from_token(token: &str) -> Option<Self>;

    /// Variant used for strings that match nothing.
    fn fallback() -> Self;

    /// Parse any string, falling back instead of failing.
    fn parse_lenient(value: &str) -> Self {
        let token = normalize(value);
        Self::from_token(&token).unwrap_or_else(|| {
            if !token.is_empty() {
                warn!(field = Self::FIELD, value, "Unrecognized value, using fallback");
            }
            Self::fallback()
        })
    }
}

/// Lowercase and fold `_` and spaces into `-`.
pub fn normalize(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|c| match c {
            '_' | ' ' => '-',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

/// Parse a calendar date from `YYYY-MM-DD` or a timestamp.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Some(ts.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|ts| ts.date())
}

pub(crate) fn optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => {
            let parsed = parse_date(&s);
            if parsed.is_none() && !s.trim().is_empty() {
                warn!(value = %s, "Malformed date, treating as absent");
            }
            parsed
        }
        Some(other) => {
            warn!(value = %other, "Non-string date, treating as absent");
            None
        }
    })
}

pub(crate) fn optional_enum<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: LenientEnum,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(Value::String(s)) => Some(T::parse_lenient(&s)),
        Some(other) => {
            warn!(field = T::FIELD, value = %other, "Non-string value, using fallback");
            Some(T::fallback())
        }
    })
}

pub(crate) fn enum_or_fallback<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: LenientEnum,
{
    Ok(optional_enum(deserializer)?.unwrap_or_else(T::fallback))
}

pub(crate) fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// Required text; null or non-string values decode as empty.
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::String(s)) => s,
        None | Some(Value::Null) => {
            warn!("Null text field, using empty string");
            String::new()
        }
        Some(other) => {
            warn!(value = %other, "Non-string text field, using empty string");
            String::new()
        }
    })
}

pub(crate) fn flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_flag(deserializer)?.unwrap_or(false))
}

/// Tri-state flag: `true`, `false`, or unknown.
pub(crate) fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::Number(n)) => n.as_i64().map(|n| n != 0),
        Some(Value::String(s)) => match normalize(&s).as_str() {
            "true" | "yes" | "1" => Some(true),
            "false" | "no" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_folds_separators() {
        assert_eq!(normalize(" Off Track "), "off-track");
        assert_eq!(normalize("near_track"), "near-track");
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = NaiveDate::from_ymd_opt(2024, 1, 20);
        assert_eq!(parse_date("2024-01-20"), expected);
        assert_eq!(parse_date("2024-01-20T15:04:05Z"), expected);
        assert_eq!(parse_date("2024-01-20T15:04:05.123"), expected);
        assert_eq!(parse_date("20/01/2024"), None);
        assert_eq!(parse_date(""), None);
    }
}
