//! Form step processing
//!
//! [`FormController`] formats a submission, runs it through a chain of
//! [`FormProcessor`] steps and reports the formatted values together with any
//! validation errors. The default chain composes date fields
//! ([`DateTransform`]) before validating every field ([`FieldValidation`]).

pub mod controller;
pub mod date;
pub mod processor;

pub use controller::FormController;
pub use date::{DatePart, DateTransform};
pub use processor::{FieldValidation, FormProcessor, FormValidator, Passthrough};
