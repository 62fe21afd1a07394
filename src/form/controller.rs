//! Form controller: entry point for a form step submission

use super::date::DateTransform;
use super::processor::{FieldValidation, FormProcessor};
use crate::config::{Fields, FormConfig};
use crate::core::context::FormContext;
use crate::core::error::FormError;
use crate::core::validation::{FormatterRegistry, ValidatorRegistry};
use std::collections::HashMap;
use std::sync::Arc;

/// Processes submissions for one form step
///
/// The controller's field definitions are shared by every request and never
/// change after construction. Each submission works on its own
/// [`FormContext`], so concurrent submissions do not observe each other's
/// synthesized fields.
pub struct FormController {
    fields: Arc<Fields>,
    formatters: Arc<FormatterRegistry>,
    processor: Box<dyn FormProcessor>,
}

impl FormController {
    /// Controller with the built-in formatters and validators
    pub fn new(fields: Fields) -> Self {
        Self::with_registries(
            fields,
            FormatterRegistry::with_defaults(),
            ValidatorRegistry::with_defaults(),
        )
    }

    /// Controller using the given registries
    ///
    /// Submissions go through date composition, then validation.
    pub fn with_registries(
        fields: Fields,
        formatters: FormatterRegistry,
        validators: ValidatorRegistry,
    ) -> Self {
        let formatters = Arc::new(formatters);
        let validation = FieldValidation::new(formatters.clone(), Arc::new(validators));
        let processor = DateTransform::new(formatters.clone(), validation);
        Self::with_processor(fields, formatters, processor)
    }

    /// Controller running a custom processing chain
    pub fn with_processor<P>(fields: Fields, formatters: Arc<FormatterRegistry>, processor: P) -> Self
    where
        P: FormProcessor + 'static,
    {
        Self {
            fields: Arc::new(fields),
            formatters,
            processor: Box::new(processor),
        }
    }

    /// Controller for the fields declared in a YAML document
    pub fn from_yaml_str(yaml: &str) -> Result<Self, FormError> {
        let config = FormConfig::from_yaml_str(yaml)?;
        Ok(Self::new(config.into_fields()))
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Process one submission
    ///
    /// Every declared field is formatted from the body first (absent inputs
    /// format as the empty string), then the processing chain runs. Validation
    /// failures are recorded on the returned context; an `Err` means the form
    /// itself is misconfigured.
    pub fn submit(&self, body: HashMap<String, String>) -> Result<FormContext, FormError> {
        let mut ctx = FormContext::new(body, &self.fields);
        for (key, field) in self.fields.iter() {
            let value = self.formatters.format(Some(field), key, ctx.raw(key));
            ctx.values.insert(key.clone(), value);
        }

        let ctx = self.processor.process(ctx)?;
        tracing::debug!(
            fields = ctx.fields.len(),
            errors = ctx.errors.len(),
            "Processed form submission"
        );
        Ok(ctx)
    }
}
