//! Reusable field formatters
//!
//! These formatters normalise submitted values before validation. Each takes the
//! field name and the current value and returns the new value.

use regex::Regex;
use serde_json::Value;
use std::sync::OnceLock;

fn map_str(value: Value, f: impl FnOnce(&str) -> String) -> Value {
    match value.as_str() {
        Some(s) => Value::String(f(s)),
        None => value,
    }
}

/// Formatter: trim whitespace from string
pub fn trim() -> impl Fn(&str, Value) -> Value + Send + Sync + Clone {
    |_: &str, value: Value| map_str(value, |s| s.trim().to_string())
}

/// Formatter: collapse runs of whitespace into a single space
pub fn singlespaces() -> impl Fn(&str, Value) -> Value + Send + Sync + Clone {
    |_: &str, value: Value| {
        static WHITESPACE: OnceLock<Regex> = OnceLock::new();
        let regex = WHITESPACE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"));
        map_str(value, |s| regex.replace_all(s, " ").into_owned())
    }
}

/// Formatter: normalise dash-like characters to `-` and collapse repeats
pub fn hyphens() -> impl Fn(&str, Value) -> Value + Send + Sync + Clone {
    |_: &str, value: Value| {
        static DASHES: OnceLock<Regex> = OnceLock::new();
        let regex = DASHES.get_or_init(|| {
            Regex::new(r"[‐‑‒–—―−-]+").expect("valid regex")
        });
        map_str(value, |s| regex.replace_all(s, "-").into_owned())
    }
}

/// Formatter: remove all whitespace
pub fn removespaces() -> impl Fn(&str, Value) -> Value + Send + Sync + Clone {
    |_: &str, value: Value| map_str(value, |s| s.chars().filter(|c| !c.is_whitespace()).collect())
}

/// Formatter: convert string to uppercase
pub fn uppercase() -> impl Fn(&str, Value) -> Value + Send + Sync + Clone {
    |_: &str, value: Value| map_str(value, str::to_uppercase)
}

/// Formatter: convert string to lowercase
pub fn lowercase() -> impl Fn(&str, Value) -> Value + Send + Sync + Clone {
    |_: &str, value: Value| map_str(value, str::to_lowercase)
}

/// Formatter: `"true"`/`"false"` to booleans, anything else to null
pub fn boolean() -> impl Fn(&str, Value) -> Value + Send + Sync + Clone {
    |_: &str, value: Value| match value {
        Value::Bool(b) => Value::Bool(b),
        Value::String(ref s) if s == "true" => Value::Bool(true),
        Value::String(ref s) if s == "false" => Value::Bool(false),
        _ => Value::Null,
    }
}
