//! Form schema subsystem
//!
//! The schema is the single source of truth for what a valid submission looks
//! like. It is loaded once and shared read-only.
//!
//! # Design Principles
//!
//! - One rule table per field type, used by every validation site
//! - Unknown field types are rejected at load time
//! - Empty optional values are never constrained
//! - Deterministic validation, no hidden state

mod builtin;
pub mod coerce;
mod errors;
mod loader;
mod types;
mod validator;

pub use builtin::{employee_onboarding, EMAIL_PATTERN};
pub use errors::{SchemaError, SchemaErrorCode, SchemaResult};
pub use loader::SchemaLoader;
pub use types::{FieldDef, FieldOption, FieldType, FieldValidation, FormSchema};
pub use validator::{
    rules_for, validate_field, Check, FieldViolation, SchemaValidator, ValidationErrors,
    ValidationOutcome, FREE_TEXT_TAG_FIELD,
};
