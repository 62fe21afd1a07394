//! Processing steps and the base validation step
//!
//! A submission moves through a chain of [`FormProcessor`]s. Steps that
//! prepare data (such as [`super::DateTransform`]) wrap the next step and hand
//! the context on once they are done; [`FieldValidation`] sits at the end of the
//! chain and dispatches every field's validator rules.

use crate::config::{Dependent, FieldConfig, Fields, ValidatorRule};
use crate::core::context::{FormContext, FormValues};
use crate::core::error::{FieldError, FieldErrors, FormError};
use crate::core::validation::{FormatterRegistry, ValidatorRegistry};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;

/// A step of the form processing pipeline
pub trait FormProcessor: Send + Sync {
    /// Process the submission and hand back the updated context
    fn process(&self, ctx: FormContext) -> Result<FormContext, FormError>;
}

/// Step that does nothing; terminates a chain
#[derive(Debug, Clone, Copy, Default)]
pub struct Passthrough;

impl FormProcessor for Passthrough {
    fn process(&self, ctx: FormContext) -> Result<FormContext, FormError> {
        Ok(ctx)
    }
}

/// Shared form-level check, run over the whole context once every field passed
pub type FormValidator = Arc<dyn Fn(&FormContext) -> FieldErrors + Send + Sync>;

/// Base step: validator dispatch over every field in the context
///
/// Fields are validated in declaration order. A field whose dependency is not
/// met is reset to its formatted empty value and skipped. Validation of a field
/// stops at its first failing rule; failures of grouped rules are recorded once
/// under the group name. When no field failed, the form-level check (if any)
/// runs last and its errors become the form's errors.
#[derive(Clone)]
pub struct FieldValidation {
    formatters: Arc<FormatterRegistry>,
    validators: Arc<ValidatorRegistry>,
    form_validator: Option<FormValidator>,
}

impl FieldValidation {
    pub fn new(formatters: Arc<FormatterRegistry>, validators: Arc<ValidatorRegistry>) -> Self {
        Self {
            formatters,
            validators,
            form_validator: None,
        }
    }

    /// Add a check spanning several fields, e.g. a date range
    pub fn with_form_validator<F>(mut self, validator: F) -> Self
    where
        F: Fn(&FormContext) -> FieldErrors + Send + Sync + 'static,
    {
        self.form_validator = Some(Arc::new(validator));
        self
    }

    /// Validate one field, returning its first failure
    fn validate_field(
        &self,
        key: &str,
        field: &FieldConfig,
        value: &Value,
    ) -> Result<Option<FieldError>, FormError> {
        for rule in rules_for(field).iter() {
            let Some(validator) = self.validators.get(rule.rule_type()) else {
                return Err(FormError::UnknownValidator {
                    field: key.to_string(),
                    validator: rule.rule_type().to_string(),
                });
            };

            if !validator(value, rule.arguments()) {
                let error_key = rule.group().unwrap_or(key);
                tracing::debug!(field = %key, validator = %rule.rule_type(), "Validation failed");
                return Ok(Some(
                    FieldError::new(error_key, rule.rule_type())
                        .with_args(rule.arguments().to_vec()),
                ));
            }
        }
        Ok(None)
    }
}

impl FormProcessor for FieldValidation {
    fn process(&self, mut ctx: FormContext) -> Result<FormContext, FormError> {
        let FormContext {
            fields,
            values,
            errors,
            ..
        } = &mut ctx;

        for (key, field) in fields.iter() {
            if let Some(dependent) = &field.dependent {
                if !dependency_met(fields, values, dependent) {
                    let empty = self.formatters.format(Some(field), key, Some(""));
                    values.insert(key.clone(), empty);
                    continue;
                }
            }

            let value = values.get(key).cloned().unwrap_or(Value::Null);
            if let Some(error) = self.validate_field(key, field, &value)? {
                errors.entry(error.key.clone()).or_insert(error);
            }
        }

        if let Some(form_validator) = &self.form_validator {
            if ctx.errors.is_empty() {
                let form_errors = form_validator(&ctx);
                if !form_errors.is_empty() {
                    tracing::debug!(errors = form_errors.len(), "Form-level validation failed");
                }
                ctx.errors.extend(form_errors);
            }
        }

        Ok(ctx)
    }
}

/// Rules to run for a field; `options` add an implicit `equal` rule
fn rules_for(field: &FieldConfig) -> Cow<'_, [ValidatorRule]> {
    let has_equal = field.validate.iter().any(|r| r.rule_type() == "equal");
    if field.options.is_empty() || has_equal {
        return Cow::Borrowed(field.validate.as_slice());
    }

    let mut rules = field.validate.clone();
    rules.push(ValidatorRule::Spec {
        rule_type: "equal".to_string(),
        arguments: field
            .options
            .iter()
            .map(|o| Value::String(o.value().to_string()))
            .collect(),
        group: None,
    });
    Cow::Owned(rules)
}

/// A dependency on a field outside the form is always met
///
/// Only a string value equal to the expected one meets a dependency; a
/// formatted boolean `false` does not match `"false"`.
fn dependency_met(fields: &Fields, values: &FormValues, dependent: &Dependent) -> bool {
    if !fields.contains_key(&dependent.field) {
        return true;
    }
    matches!(values.get(&dependent.field), Some(Value::String(s)) if *s == dependent.value)
}
