//! # formdate
//!
//! Form step processing with composite date fields.
//!
//! ## Features
//!
//! - **Composite Dates**: `{field}-day`, `{field}-month` and `{field}-year` inputs
//!   are joined into one `YYYY-MM-DD` value plus a readable `D MMMM YYYY` rendering
//! - **Per-Part Validation**: each part gets its own field definition, with
//!   format validators only once something has been entered
//! - **Request-Scoped Schema**: synthesized field definitions live on the
//!   request context, never on the shared form configuration
//! - **Named Formatters/Validators**: extensible registries with the usual
//!   built-ins (`trim`, `boolean`, `required`, `email`, `date-month`, ...)
//! - **Dependent Fields**: validation gated on another field's value
//! - **Configuration-Based**: define form fields via YAML configuration
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use formdate::prelude::*;
//!
//! let controller = FormController::from_yaml_str(r#"
//! fields:
//!   dob:
//!     validate: [required]
//! "#)?;
//!
//! let ctx = controller.submit(HashMap::from([
//!     ("dob-year".to_string(), "1999".to_string()),
//!     ("dob-month".to_string(), "2".to_string()),
//!     ("dob-day".to_string(), "1".to_string()),
//! ]))?;
//!
//! assert_eq!(ctx.values["dob"], "1999-02-01");
//! assert_eq!(ctx.values["dob-formatted"], "1 February 1999");
//! ```

pub mod config;
pub mod core;
pub mod form;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Config ===
    pub use crate::config::{Dependent, FieldConfig, FieldOption, Fields, FormConfig, ValidatorRule};

    // === Core ===
    pub use crate::core::{
        context::{FormContext, FormValues},
        error::{FieldError, FieldErrors, FormError},
        validation::{FormatterRegistry, Submitted, ValidatorRegistry},
    };

    // === Form ===
    pub use crate::form::{
        DatePart, DateTransform, FieldValidation, FormController, FormProcessor, FormValidator,
        Passthrough,
    };

    // === External dependencies ===
    pub use serde_json::Value;
    pub use std::collections::HashMap;
}
