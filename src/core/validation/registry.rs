//! Named formatter and validator registries
//!
//! Field definitions refer to formatters and validators by name. The registries
//! resolve those names to functions; both come pre-populated with the built-ins
//! and accept application-specific additions.

use super::{formatters, validators};
use crate::config::FieldConfig;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Shared formatter function: `(field name, value) -> value`
pub type Formatter = Arc<dyn Fn(&str, Value) -> Value + Send + Sync>;

/// Shared validator function: `(value, arguments) -> valid`
pub type Validator = Arc<dyn Fn(&Value, &[Value]) -> bool + Send + Sync>;

/// Formatters applied to every field unless it sets `ignore-defaults`
pub const DEFAULT_FORMATTERS: [&str; 3] = ["trim", "singlespaces", "hyphens"];

/// Registry of named formatters
#[derive(Clone, Default)]
pub struct FormatterRegistry {
    formatters: HashMap<String, Formatter>,
}

impl FormatterRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            formatters: HashMap::new(),
        }
    }

    /// Registry holding all built-in formatters
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("trim", formatters::trim());
        registry.register("singlespaces", formatters::singlespaces());
        registry.register("hyphens", formatters::hyphens());
        registry.register("removespaces", formatters::removespaces());
        registry.register("uppercase", formatters::uppercase());
        registry.register("lowercase", formatters::lowercase());
        registry.register("boolean", formatters::boolean());
        registry
    }

    /// Register a formatter, replacing any previous one with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, formatter: F)
    where
        F: Fn(&str, Value) -> Value + Send + Sync + 'static,
    {
        self.formatters.insert(name.into(), Arc::new(formatter));
    }

    pub fn get(&self, name: &str) -> Option<&Formatter> {
        self.formatters.get(name)
    }

    /// Format a raw submitted value for the field `key`
    ///
    /// An absent value formats as the empty string. The default chain runs
    /// first, then the field's own formatters in declaration order. Unknown
    /// formatter names are skipped.
    pub fn format(&self, field: Option<&FieldConfig>, key: &str, raw: Option<&str>) -> Value {
        let mut chain: Vec<&str> = Vec::new();
        if !field.is_some_and(|f| f.ignore_defaults) {
            chain.extend(DEFAULT_FORMATTERS);
        }
        if let Some(field) = field {
            chain.extend(field.formatter.iter().map(String::as_str));
        }

        let initial = Value::String(raw.unwrap_or_default().to_string());
        chain.into_iter().fold(initial, |value, name| match self.get(name) {
            Some(formatter) => formatter(key, value),
            None => {
                tracing::warn!(field = %key, formatter = %name, "Unknown formatter, skipping");
                value
            }
        })
    }
}

/// Registry of named validators
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
    validators: HashMap<String, Validator>,
}

impl ValidatorRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            validators: HashMap::new(),
        }
    }

    /// Registry holding all built-in validators
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register("required", validators::required());
        registry.register("string", validators::string());
        registry.register("numeric", validators::numeric());
        registry.register("email", validators::email());
        registry.register("minlength", validators::minlength());
        registry.register("maxlength", validators::maxlength());
        registry.register("exactlength", validators::exactlength());
        registry.register("equal", validators::equal());
        registry.register("regex", validators::regex());
        registry.register("date", validators::date());
        registry.register("date-year", validators::date_year());
        registry.register("date-month", validators::date_month());
        registry.register("date-day", validators::date_day());
        registry
    }

    /// Register a validator, replacing any previous one with the same name
    pub fn register<F>(&mut self, name: impl Into<String>, validator: F)
    where
        F: Fn(&Value, &[Value]) -> bool + Send + Sync + 'static,
    {
        self.validators.insert(name.into(), Arc::new(validator));
    }

    pub fn get(&self, name: &str) -> Option<&Validator> {
        self.validators.get(name)
    }

    /// Get all registered validator names
    pub fn names(&self) -> Vec<&str> {
        self.validators.keys().map(|s| s.as_str()).collect()
    }
}
