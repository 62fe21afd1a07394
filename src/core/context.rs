//! Per-request form state

use crate::config::{FieldConfig, Fields};
use crate::core::error::FieldErrors;
use indexmap::IndexMap;
use serde_json::Value;
use std::collections::HashMap;

/// Formatted values of one submission, keyed by field name
pub type FormValues = IndexMap<String, Value>;

/// State of a single form submission as it moves through the pipeline
///
/// `fields` starts as a copy of the form's static field definitions and is
/// owned by this request alone: pipeline steps may add synthesized field
/// definitions to it without affecting any other request.
#[derive(Debug, Clone, Default)]
pub struct FormContext {
    /// Raw submitted body
    pub body: HashMap<String, String>,

    /// Field definitions in effect for this request
    pub fields: Fields,

    /// Formatted values
    pub values: FormValues,

    /// Validation failures
    pub errors: FieldErrors,
}

impl FormContext {
    /// Create a context for `body` over a fresh copy of `fields`
    pub fn new(body: HashMap<String, String>, fields: &Fields) -> Self {
        Self {
            body,
            fields: fields.clone(),
            values: IndexMap::new(),
            errors: IndexMap::new(),
        }
    }

    /// Raw submitted value for `key`, `None` when the key was not submitted
    pub fn raw(&self, key: &str) -> Option<&str> {
        self.body.get(key).map(String::as_str)
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn field(&self, key: &str) -> Option<&FieldConfig> {
        self.fields.get(key)
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Values when validation passed, otherwise the collected errors
    pub fn into_result(self) -> Result<FormValues, FieldErrors> {
        if self.errors.is_empty() {
            Ok(self.values)
        } else {
            Err(self.errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::FieldError;
    use serde_json::json;

    fn body(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_raw_distinguishes_absent_from_empty() {
        let ctx = FormContext::new(body(&[("dob-year", "")]), &Fields::new());
        assert_eq!(ctx.raw("dob-year"), Some(""));
        assert_eq!(ctx.raw("dob-month"), None);
    }

    #[test]
    fn test_fields_are_copied_per_context() {
        let mut base = Fields::new();
        base.insert("dob".to_string(), FieldConfig::default());

        let mut ctx = FormContext::new(HashMap::new(), &base);
        ctx.fields.insert("dob-year".to_string(), FieldConfig::default());

        assert_eq!(ctx.fields.len(), 2);
        assert_eq!(base.len(), 1);
    }

    #[test]
    fn test_into_result() {
        let mut ctx = FormContext::default();
        ctx.values.insert("dob".to_string(), json!("1999-12-01"));
        assert!(ctx.is_valid());
        assert_eq!(ctx.clone().into_result().unwrap()["dob"], json!("1999-12-01"));

        ctx.errors
            .insert("dob".to_string(), FieldError::new("dob", "required"));
        let errors = ctx.into_result().unwrap_err();
        assert_eq!(errors["dob"].error_type, "required");
    }
}
