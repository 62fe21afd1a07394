//! Reusable field validators
//!
//! A validator receives the formatted field value and the rule arguments and
//! returns whether the value is acceptable. Apart from [`required`], every
//! validator accepts the empty string: emptiness is `required`'s job.

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn is_empty(value: &Value) -> bool {
    matches!(value, Value::String(s) if s.is_empty())
}

/// Optional string check: empty passes, non-strings fail
fn check_str(value: &Value, f: impl FnOnce(&str) -> bool) -> bool {
    match value {
        Value::String(s) if s.is_empty() => true,
        Value::String(s) => f(s),
        _ => false,
    }
}

fn arg_usize(args: &[Value]) -> Option<usize> {
    match args.first()? {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

fn arg_to_string(arg: &Value) -> String {
    match arg {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a one- or two-digit number within `range`
fn in_digit_range(s: &str, range: std::ops::RangeInclusive<u32>) -> bool {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let regex = DIGITS.get_or_init(|| Regex::new(r"^\d{1,2}$").expect("valid regex"));
    regex.is_match(s) && s.parse::<u32>().is_ok_and(|n| range.contains(&n))
}

/// Validator: value is present and not the empty string
pub fn required() -> impl Fn(&Value, &[Value]) -> bool + Send + Sync + Clone {
    |value: &Value, _: &[Value]| !value.is_null() && !is_empty(value)
}

/// Validator: value is a string
pub fn string() -> impl Fn(&Value, &[Value]) -> bool + Send + Sync + Clone {
    |value: &Value, _: &[Value]| value.is_string()
}

/// Validator: digits only
pub fn numeric() -> impl Fn(&Value, &[Value]) -> bool + Send + Sync + Clone {
    |value: &Value, _: &[Value]| check_str(value, |s| s.chars().all(|c| c.is_ascii_digit()))
}

/// Validator: looks like an email address
pub fn email() -> impl Fn(&Value, &[Value]) -> bool + Send + Sync + Clone {
    |value: &Value, _: &[Value]| {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid regex")
        });
        check_str(value, |s| regex.is_match(s))
    }
}

/// Validator: at least `arguments[0]` characters
pub fn minlength() -> impl Fn(&Value, &[Value]) -> bool + Send + Sync + Clone {
    |value: &Value, args: &[Value]| {
        let min = arg_usize(args).unwrap_or(0);
        check_str(value, |s| s.chars().count() >= min)
    }
}

/// Validator: at most `arguments[0]` characters
pub fn maxlength() -> impl Fn(&Value, &[Value]) -> bool + Send + Sync + Clone {
    |value: &Value, args: &[Value]| match arg_usize(args) {
        Some(max) => check_str(value, |s| s.chars().count() <= max),
        None => true,
    }
}

/// Validator: exactly `arguments[0]` characters
pub fn exactlength() -> impl Fn(&Value, &[Value]) -> bool + Send + Sync + Clone {
    |value: &Value, args: &[Value]| match arg_usize(args) {
        Some(len) => check_str(value, |s| s.chars().count() == len),
        None => true,
    }
}

/// Validator: value is one of the arguments
pub fn equal() -> impl Fn(&Value, &[Value]) -> bool + Send + Sync + Clone {
    |value: &Value, args: &[Value]| {
        let allowed = |s: &str| args.iter().any(|arg| arg_to_string(arg) == s);
        match value {
            Value::Array(items) => items.iter().all(|item| allowed(arg_to_string(item).as_str())),
            _ => check_str(value, allowed),
        }
    }
}

/// Validator: matches the pattern given as `arguments[0]`
pub fn regex() -> impl Fn(&Value, &[Value]) -> bool + Send + Sync + Clone {
    |value: &Value, args: &[Value]| {
        let Some(pattern) = args.first().and_then(Value::as_str) else {
            return false;
        };
        match Regex::new(pattern) {
            Ok(regex) => check_str(value, |s| regex.is_match(s)),
            Err(_) => false,
        }
    }
}

/// Validator: a real calendar date written as `YYYY-MM-DD`
pub fn date() -> impl Fn(&Value, &[Value]) -> bool + Send + Sync + Clone {
    |value: &Value, _: &[Value]| {
        static DATE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = DATE_REGEX.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));
        check_str(value, |s| {
            regex.is_match(s) && NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok()
        })
    }
}

/// Validator: four-digit year
pub fn date_year() -> impl Fn(&Value, &[Value]) -> bool + Send + Sync + Clone {
    |value: &Value, _: &[Value]| {
        static YEAR_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = YEAR_REGEX.get_or_init(|| Regex::new(r"^\d{4}$").expect("valid regex"));
        check_str(value, |s| regex.is_match(s))
    }
}

/// Validator: month number between 1 and 12
pub fn date_month() -> impl Fn(&Value, &[Value]) -> bool + Send + Sync + Clone {
    |value: &Value, _: &[Value]| check_str(value, |s| in_digit_range(s, 1..=12))
}

/// Validator: day number between 1 and 31
pub fn date_day() -> impl Fn(&Value, &[Value]) -> bool + Send + Sync + Clone {
    |value: &Value, _: &[Value]| check_str(value, |s| in_digit_range(s, 1..=31))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    // === required() ===

    #[test]
    fn test_required_rejects_null_and_empty() {
        let v = required();
        assert!(!v(&json!(null), &[]));
        assert!(!v(&json!(""), &[]));
    }

    #[test]
    fn test_required_accepts_values() {
        let v = required();
        assert!(v(&json!("hello"), &[]));
        assert!(v(&json!(false), &[]));
        assert!(v(&json!(0), &[]));
    }

    // === numeric() ===

    #[test]
    fn test_numeric() {
        let v = numeric();
        assert!(v(&json!("12345"), &[]));
        assert!(v(&json!(""), &[]));
        assert!(!v(&json!("12a"), &[]));
        assert!(!v(&json!("-1"), &[]));
    }

    // === email() ===

    #[test]
    fn test_email() {
        let v = email();
        assert!(v(&json!("test@example.com"), &[]));
        assert!(v(&json!(""), &[]));
        assert!(!v(&json!("foo"), &[]));
    }

    // === length validators ===

    #[test]
    fn test_minlength() {
        let v = minlength();
        assert!(!v(&json!("John"), &[json!(10)]));
        assert!(v(&json!("John Smith"), &[json!(10)]));
        assert!(v(&json!(""), &[json!(10)]));
    }

    #[test]
    fn test_maxlength_accepts_string_argument() {
        let v = maxlength();
        assert!(!v(&json!("A name longer than twenty characters"), &[json!("20")]));
        assert!(v(&json!("Short"), &[json!(20)]));
    }

    #[test]
    fn test_exactlength_counts_chars() {
        let v = exactlength();
        assert!(v(&json!("é12"), &[json!(3)]));
        assert!(!v(&json!("1234"), &[json!(3)]));
    }

    // === equal() ===

    #[test]
    fn test_equal() {
        let v = equal();
        let options = [json!("one"), json!("two"), json!("three")];
        assert!(v(&json!("two"), &options));
        assert!(!v(&json!("number"), &options));
        assert!(v(&json!(""), &options));
        assert!(v(&json!(["one", "three"]), &options));
        assert!(!v(&json!(["one", "four"]), &options));
    }

    // === regex() ===

    #[test]
    fn test_regex() {
        let v = regex();
        assert!(v(&json!("ABC123"), &[json!(r"^[A-Z]{3}\d{3}$")]));
        assert!(!v(&json!("abc123"), &[json!(r"^[A-Z]{3}\d{3}$")]));
        assert!(!v(&json!("abc"), &[]));
    }

    // === date() ===

    #[test]
    fn test_date() {
        let v = date();
        assert!(v(&json!("2024-02-29"), &[]));
        assert!(!v(&json!("2023-02-29"), &[]));
        assert!(!v(&json!("2024-2-1"), &[]));
        assert!(v(&json!(""), &[]));
    }

    // === date parts ===

    #[test]
    fn test_date_year() {
        let v = date_year();
        assert!(v(&json!("1999"), &[]));
        assert!(!v(&json!("99"), &[]));
        assert!(!v(&json!("19999"), &[]));
        assert!(v(&json!(""), &[]));
    }

    #[test]
    fn test_date_month() {
        let v = date_month();
        assert!(v(&json!("2"), &[]));
        assert!(v(&json!("12"), &[]));
        assert!(!v(&json!("13"), &[]));
        assert!(!v(&json!("0"), &[]));
        assert!(!v(&json!("Feb"), &[]));
    }

    #[test]
    fn test_date_day() {
        let v = date_day();
        assert!(v(&json!("01"), &[]));
        assert!(v(&json!("31"), &[]));
        assert!(!v(&json!("32"), &[]));
        assert!(!v(&json!("001"), &[]));
    }
}
