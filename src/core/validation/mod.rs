//! Formatting and validation system
//!
//! Field definitions name the formatters and validators they use. This module
//! holds the built-in implementations, the registries resolving names to
//! functions, and the axum extractor running a submission through a form.

pub mod extractor;
pub mod formatters;
pub mod registry;
pub mod validators;

pub use extractor::Submitted;
pub use registry::{
    DEFAULT_FORMATTERS, Formatter, FormatterRegistry, Validator, ValidatorRegistry,
};
