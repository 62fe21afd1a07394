//! Core module containing the shared types of form processing

pub mod context;
pub mod error;
pub mod validation;

pub use context::{FormContext, FormValues};
pub use error::{FieldError, FieldErrors, FormError};
pub use validation::{FormatterRegistry, Submitted, ValidatorRegistry};
