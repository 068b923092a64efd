//! Value coercion shared by validation and queries
//!
//! Submitted values arrive loosely typed (JSON from forms, strings from query
//! parameters). Each target type has exactly one coercion step, defined here.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;

/// Whether a value counts as "not provided".
///
/// Absent, `null`, whitespace-only strings and empty arrays are empty.
pub fn is_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.trim().is_empty(),
        Some(Value::Array(items)) => items.is_empty(),
        Some(_) => false,
    }
}

/// Coerces a value to a finite number.
///
/// JSON numbers are taken as-is; strings are trimmed and parsed. Anything
/// else, and any non-finite result, does not coerce.
pub fn to_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Parses a calendar date.
///
/// Accepts `YYYY-MM-DD`, a naive `YYYY-MM-DDTHH:MM:SS` timestamp, or an
/// RFC 3339 timestamp (reduced to its UTC date).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc).date_naive());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M"))
        .map(|ts| ts.date())
        .ok()
}

/// Key used to compare a multi-select element against option values.
///
/// Strings compare as-is, numbers and booleans by their JSON text. Nested
/// arrays, objects and nulls never match an option.
pub fn option_key(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(s) => Some(Cow::Borrowed(s.as_str())),
        Value::Number(n) => Some(Cow::Owned(n.to_string())),
        Value::Bool(b) => Some(Cow::Owned(b.to_string())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_emptiness() {
        assert!(is_empty(None));
        assert!(is_empty(Some(&Value::Null)));
        assert!(is_empty(Some(&json!("   \t"))));
        assert!(is_empty(Some(&json!([]))));

        assert!(!is_empty(Some(&json!(0))));
        assert!(!is_empty(Some(&json!(false))));
        assert!(!is_empty(Some(&json!({}))));
        assert!(!is_empty(Some(&json!([""]))));
    }

    #[test]
    fn test_number_coercion() {
        assert_eq!(to_number(&json!(42)), Some(42.0));
        assert_eq!(to_number(&json!(2.5)), Some(2.5));
        assert_eq!(to_number(&json!(" 30 ")), Some(30.0));
        assert_eq!(to_number(&json!("abc")), None);
        assert_eq!(to_number(&json!("inf")), None);
        assert_eq!(to_number(&json!("NaN")), None);
        assert_eq!(to_number(&json!(true)), None);
        assert_eq!(to_number(&json!([1])), None);
    }

    #[test]
    fn test_date_parsing() {
        let jan1 = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        assert_eq!(parse_date("2020-01-01"), Some(jan1));
        assert_eq!(parse_date("2020-01-01T23:30:00Z"), Some(jan1));
        assert_eq!(parse_date("2020-01-01T10:00:00"), Some(jan1));
        assert_eq!(parse_date("2020-02-30"), None);
        assert_eq!(parse_date("not a date"), None);
    }

    #[test]
    fn test_option_keys() {
        assert_eq!(option_key(&json!("React")).as_deref(), Some("React"));
        assert_eq!(option_key(&json!(3)).as_deref(), Some("3"));
        assert_eq!(option_key(&json!(true)).as_deref(), Some("true"));
        assert_eq!(option_key(&json!({"a": 1})), None);
    }
}
