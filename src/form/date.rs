//! Composite date fields
//!
//! A date is entered as three inputs named `{field}-day`, `{field}-month` and
//! `{field}-year`. [`DateTransform`] joins them into one `YYYY-MM-DD` value under
//! `{field}`, adds a readable rendering under `{field}-formatted`, and
//! materializes a field definition for each part so the validation step checks
//! every part on its own.

use super::processor::FormProcessor;
use crate::config::{FieldConfig, ValidatorRule};
use crate::core::context::FormContext;
use crate::core::error::FormError;
use crate::core::validation::FormatterRegistry;
use chrono::NaiveDate;
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;

/// Format of the composed value
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format of the readable rendering, e.g. `1 December 1999`
pub const PRETTY_DATE_FORMAT: &str = "%-d %B %Y";

/// Rendering of a composed value that is not a calendar date
pub const INVALID_DATE: &str = "Invalid date";

/// Suffix of the readable rendering's key
pub const FORMATTED_SUFFIX: &str = "-formatted";

/// The only rule a part inherits from its parent field
const INHERITED_RULE: &str = "required";

/// One of the three inputs of a date field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatePart {
    Year,
    Month,
    Day,
}

impl DatePart {
    pub const ALL: [DatePart; 3] = [DatePart::Year, DatePart::Month, DatePart::Day];

    pub fn as_str(self) -> &'static str {
        match self {
            DatePart::Year => "year",
            DatePart::Month => "month",
            DatePart::Day => "day",
        }
    }

    /// Key of this part for the date field `field`
    pub fn key(self, field: &str) -> String {
        format!("{}-{}", field, self.as_str())
    }

    /// Validator checking this part's format
    pub fn validator(self) -> String {
        format!("date-{}", self.as_str())
    }
}

/// Pipeline step composing date fields, then handing over to `inner`
pub struct DateTransform<P> {
    formatters: Arc<FormatterRegistry>,
    inner: P,
}

impl<P: FormProcessor> DateTransform<P> {
    pub fn new(formatters: Arc<FormatterRegistry>, inner: P) -> Self {
        Self { formatters, inner }
    }

    /// Compose every date field of the context
    ///
    /// A field is a date field for this request when all three of its part
    /// inputs were submitted, even if empty. Fields with a missing part, and
    /// submitted parts of fields the form does not declare, are left alone.
    pub fn apply(&self, ctx: &mut FormContext) {
        let date_fields: Vec<(String, FieldConfig)> = ctx
            .fields
            .iter()
            .filter(|(key, _)| DatePart::ALL.iter().all(|p| ctx.raw(&p.key(key)).is_some()))
            .map(|(key, field)| (key.clone(), field.clone()))
            .collect();

        for (key, field) in date_fields {
            self.compose_field(ctx, &key, &field);
        }
    }

    fn compose_field(&self, ctx: &mut FormContext, key: &str, field: &FieldConfig) {
        let inherited: Vec<ValidatorRule> = if field.has_rule(INHERITED_RULE) {
            vec![ValidatorRule::named(INHERITED_RULE)]
        } else {
            Vec::new()
        };

        // An entirely blank date only answers to `required`.
        let check_format = DatePart::ALL
            .iter()
            .any(|p| ctx.raw(&p.key(key)).is_some_and(|raw| !raw.is_empty()));

        let [year, month, day] = DatePart::ALL.map(|part| {
            let part_key = part.key(key);
            let mut validate = inherited.clone();
            if check_format {
                validate.push(ValidatorRule::named(part.validator()));
            }
            let part_field = FieldConfig {
                validate,
                dependent: field.dependent.clone(),
                ..FieldConfig::default()
            };

            let value = self
                .formatters
                .format(Some(&part_field), &part_key, ctx.raw(&part_key));
            ctx.fields.insert(part_key.clone(), part_field);
            ctx.values.insert(part_key, value.clone());
            value
        });

        let date = compose(&year, &month, &day);
        tracing::debug!(field = %key, date = %date, "Composed date field");

        let formatted = display(&date);
        ctx.values.insert(key.to_string(), Value::String(date));
        ctx.values
            .insert(format!("{key}{FORMATTED_SUFFIX}"), Value::String(formatted));
    }
}

impl<P: FormProcessor> FormProcessor for DateTransform<P> {
    fn process(&self, mut ctx: FormContext) -> Result<FormContext, FormError> {
        self.apply(&mut ctx);
        self.inner.process(ctx)
    }
}

fn non_empty(value: &Value) -> Option<&str> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    }
}

/// Left-pad a single character with `0`; longer strings are kept
fn pad(part: &str) -> String {
    if part.chars().count() < 2 {
        format!("0{part}")
    } else {
        part.to_string()
    }
}

/// `YYYY-MM-DD` from the three parts, empty unless all are non-empty strings
pub fn compose(year: &Value, month: &Value, day: &Value) -> String {
    match (non_empty(year), non_empty(month), non_empty(day)) {
        (Some(year), Some(month), Some(day)) => format!("{}-{}-{}", year, pad(month), pad(day)),
        _ => String::new(),
    }
}

/// Expand a two-digit year: `69`-`99` are 19xx, `00`-`68` are 20xx
fn expand_short_year(date: &str) -> Cow<'_, str> {
    match date.split_once('-') {
        Some((year, rest)) if year.len() == 2 && year.bytes().all(|b| b.is_ascii_digit()) => {
            match year.parse::<u32>() {
                Ok(short) => {
                    let century = if short > 68 { 1900 } else { 2000 };
                    Cow::Owned(format!("{}-{}", century + short, rest))
                }
                Err(_) => Cow::Borrowed(date),
            }
        }
        _ => Cow::Borrowed(date),
    }
}

/// Readable rendering of a composed value
pub fn display(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }
    match NaiveDate::parse_from_str(&expand_short_year(date), DATE_FORMAT) {
        Ok(parsed) => parsed.format(PRETTY_DATE_FORMAT).to_string(),
        Err(_) => INVALID_DATE.to_string(),
    }
}
