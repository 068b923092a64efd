//! Schema-driven field and submission validation
//!
//! Every field type maps to an ordered list of checks in one static rule
//! table. Both validation sites evaluate that table:
//! - interactive: a single field, as the user edits it ([`SchemaValidator::check_field`])
//! - authoritative: the whole payload before it is stored
//!   ([`SchemaValidator::validate_submission`])
//!
//! Semantics:
//! - Empty values short-circuit: required → error, optional → valid
//! - Within a field, the first failing check wins
//! - Across fields, every failure is collected
//! - Keys not declared by the schema are ignored
//! - Validation is pure and deterministic

use std::fmt;

use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use super::coerce;
use super::errors::{SchemaError, SchemaResult};
use super::types::{FieldDef, FieldType, FormSchema};

/// Multi-select field whose values are free-text tags rather than options.
pub const FREE_TEXT_TAG_FIELD: &str = "skills";

/// A failed check. The `Display` text is the user-facing message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FieldViolation {
    #[error("This field is required.")]
    Required,
    #[error("Must be a string.")]
    NotAString,
    #[error("Must be at least {0} characters.")]
    TooShort(usize),
    #[error("Must be at most {0} characters.")]
    TooLong(usize),
    #[error("Invalid format.")]
    InvalidFormat,
    #[error("Must be a number.")]
    NotANumber,
    #[error("Must be at least {0}.")]
    BelowMinimum(f64),
    #[error("Must be at most {0}.")]
    AboveMaximum(f64),
    #[error("Invalid option selected.")]
    InvalidOption,
    #[error("Must be an array.")]
    NotAnArray,
    #[error("Contains invalid option(s).")]
    InvalidOptions,
    #[error("Select at least {0} option(s).")]
    TooFewSelected(usize),
    #[error("Select at most {0} option(s).")]
    TooManySelected(usize),
    #[error("Must be a date string (YYYY-MM-DD).")]
    NotADateString,
    #[error("Invalid date.")]
    InvalidDate,
    #[error("Date must be on or after {0}.")]
    BeforeMinDate(String),
    #[error("Must be a boolean.")]
    NotABoolean,
}

/// One constraint check, run only on non-empty values.
pub type Check = fn(&FieldDef, &Value) -> Result<(), FieldViolation>;

const TEXT_RULES: &[Check] = &[expect_string, min_length, max_length, matches_pattern];
const NUMBER_RULES: &[Check] = &[expect_number, at_least_min, at_most_max];
const SELECT_RULES: &[Check] = &[expect_string, is_declared_option];
const MULTI_SELECT_RULES: &[Check] = &[
    expect_array,
    all_declared_options,
    min_selected,
    max_selected,
];
const DATE_RULES: &[Check] = &[expect_date_string, parses_as_date, not_before_min_date];
const SWITCH_RULES: &[Check] = &[expect_bool];

/// The ordered checks for a field type.
pub fn rules_for(field_type: FieldType) -> &'static [Check] {
    match field_type {
        FieldType::Text | FieldType::Textarea => TEXT_RULES,
        FieldType::Number => NUMBER_RULES,
        FieldType::Select => SELECT_RULES,
        FieldType::MultiSelect => MULTI_SELECT_RULES,
        FieldType::Date => DATE_RULES,
        FieldType::Switch => SWITCH_RULES,
    }
}

/// Validates one raw value against its field definition.
///
/// `None` stands for a key absent from the payload.
pub fn validate_field(field: &FieldDef, value: Option<&Value>) -> Result<(), FieldViolation> {
    let value = match value {
        Some(v) if !coerce::is_empty(Some(v)) => v,
        _ if field.required => return Err(FieldViolation::Required),
        _ => return Ok(()),
    };

    rules_for(field.field_type)
        .iter()
        .try_for_each(|check| check(field, value))
}

// ==================
// Checks
// ==================

fn trimmed(value: &Value) -> &str {
    value.as_str().map(str::trim).unwrap_or_default()
}

fn expect_string(_: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    value.is_string().then_some(()).ok_or(FieldViolation::NotAString)
}

fn min_length(field: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    match field.validation.min_length {
        Some(min) if trimmed(value).chars().count() < min => Err(FieldViolation::TooShort(min)),
        _ => Ok(()),
    }
}

fn max_length(field: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    match field.validation.max_length {
        Some(max) if trimmed(value).chars().count() > max => Err(FieldViolation::TooLong(max)),
        _ => Ok(()),
    }
}

fn matches_pattern(field: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    let Some(pattern) = &field.validation.regex else {
        return Ok(());
    };
    if pattern.is_match(trimmed(value)) {
        Ok(())
    } else {
        Err(FieldViolation::InvalidFormat)
    }
}

fn expect_number(_: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    coerce::to_number(value)
        .map(|_| ())
        .ok_or(FieldViolation::NotANumber)
}

fn at_least_min(field: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    match (field.validation.min, coerce::to_number(value)) {
        (Some(min), Some(n)) if n < min => Err(FieldViolation::BelowMinimum(min)),
        _ => Ok(()),
    }
}

fn at_most_max(field: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    match (field.validation.max, coerce::to_number(value)) {
        (Some(max), Some(n)) if n > max => Err(FieldViolation::AboveMaximum(max)),
        _ => Ok(()),
    }
}

fn is_declared_option(field: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    let selected = value.as_str().unwrap_or_default();
    if field.options.is_empty() || field.has_option(selected) {
        Ok(())
    } else {
        Err(FieldViolation::InvalidOption)
    }
}

fn expect_array(_: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    value.is_array().then_some(()).ok_or(FieldViolation::NotAnArray)
}

fn selected(value: &Value) -> &[Value] {
    value.as_array().map(Vec::as_slice).unwrap_or_default()
}

fn all_declared_options(field: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    if field.name == FREE_TEXT_TAG_FIELD || field.options.is_empty() {
        return Ok(());
    }

    let all_known = selected(value).iter().all(|item| {
        coerce::option_key(item).is_some_and(|key| field.has_option(&key))
    });

    if all_known {
        Ok(())
    } else {
        Err(FieldViolation::InvalidOptions)
    }
}

fn min_selected(field: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    match field.validation.min_selected {
        Some(min) if selected(value).len() < min => Err(FieldViolation::TooFewSelected(min)),
        _ => Ok(()),
    }
}

fn max_selected(field: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    match field.validation.max_selected {
        Some(max) if selected(value).len() > max => Err(FieldViolation::TooManySelected(max)),
        _ => Ok(()),
    }
}

fn expect_date_string(_: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    value
        .is_string()
        .then_some(())
        .ok_or(FieldViolation::NotADateString)
}

fn parses_as_date(_: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    coerce::parse_date(trimmed(value))
        .map(|_| ())
        .ok_or(FieldViolation::InvalidDate)
}

fn not_before_min_date(field: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    let Some(raw_min) = &field.validation.min_date else {
        return Ok(());
    };
    match (coerce::parse_date(raw_min), coerce::parse_date(trimmed(value))) {
        (Some(min), Some(date)) if date < min => {
            Err(FieldViolation::BeforeMinDate(raw_min.clone()))
        }
        _ => Ok(()),
    }
}

fn expect_bool(_: &FieldDef, value: &Value) -> Result<(), FieldViolation> {
    value.is_boolean().then_some(()).ok_or(FieldViolation::NotABoolean)
}

// ==================
// Aggregation
// ==================

/// Per-field failures of one payload, in schema order.
///
/// Serializes as a `{ fieldName: message }` object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationErrors {
    entries: Vec<(String, FieldViolation)>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>, violation: FieldViolation) {
        self.entries.push((field.into(), violation));
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// The violation reported for `field`, if any
    pub fn get(&self, field: &str) -> Option<&FieldViolation> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, violation)| violation)
    }

    /// Names of the failing fields, in schema order
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }
}

impl Serialize for ValidationErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (field, violation) in &self.entries {
            map.serialize_entry(field, &violation.to_string())?;
        }
        map.end()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, violation)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", field, violation)?;
        }
        Ok(())
    }
}

/// Result of validating a whole payload
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationOutcome {
    pub errors: ValidationErrors,
}

impl ValidationOutcome {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Converts into a `Result`, handing back the errors on failure.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(self.errors)
        }
    }
}

impl Serialize for ValidationOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("ValidationOutcome", 2)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}

/// Validator bound to one schema.
///
/// Borrows the schema for the duration of a validation pass and never
/// mutates it.
pub struct SchemaValidator<'a> {
    schema: &'a FormSchema,
}

impl<'a> SchemaValidator<'a> {
    pub fn new(schema: &'a FormSchema) -> Self {
        Self { schema }
    }

    /// Interactive check of a single field by name.
    ///
    /// # Errors
    ///
    /// Returns `FORM_UNKNOWN_FIELD` when the schema has no such field.
    pub fn check_field(
        &self,
        name: &str,
        value: Option<&Value>,
    ) -> SchemaResult<Result<(), FieldViolation>> {
        let field = self
            .schema
            .field(name)
            .ok_or_else(|| SchemaError::unknown_field(name))?;
        Ok(validate_field(field, value))
    }

    /// Authoritative check of a full payload.
    ///
    /// A payload that is not a JSON object has no keys, so every required
    /// field reports as missing.
    pub fn validate_submission(&self, data: &Value) -> ValidationOutcome {
        self.validate_fields(data.as_object())
    }

    /// Authoritative check of a payload already known to be an object.
    pub fn validate_map(&self, data: &Map<String, Value>) -> ValidationOutcome {
        self.validate_fields(Some(data))
    }

    fn validate_fields(&self, object: Option<&Map<String, Value>>) -> ValidationOutcome {
        let mut errors = ValidationErrors::new();

        for field in &self.schema.fields {
            let value = object.and_then(|o| o.get(&field.name));
            if let Err(violation) = validate_field(field, value) {
                errors.push(field.name.clone(), violation);
            }
        }

        ValidationOutcome { errors }
    }
}
