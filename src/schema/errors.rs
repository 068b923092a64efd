//! Schema error types
//!
//! Error codes:
//! - FORM_SCHEMA_UNREADABLE: schema source could not be read
//! - FORM_SCHEMA_MALFORMED: schema source is not a valid form schema
//! - FORM_UNKNOWN_FIELD: a field name is not declared by the schema

use std::fmt;

/// Schema-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaErrorCode {
    /// Schema file missing or unreadable
    FormSchemaUnreadable,
    /// Schema JSON invalid or structurally unsound
    FormSchemaMalformed,
    /// Field lookup by name failed
    FormUnknownField,
}

impl SchemaErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            SchemaErrorCode::FormSchemaUnreadable => "FORM_SCHEMA_UNREADABLE",
            SchemaErrorCode::FormSchemaMalformed => "FORM_SCHEMA_MALFORMED",
            SchemaErrorCode::FormUnknownField => "FORM_UNKNOWN_FIELD",
        }
    }
}

impl fmt::Display for SchemaErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Schema error with code and context
#[derive(Debug)]
pub struct SchemaError {
    code: SchemaErrorCode,
    message: String,
    /// Offending field, for lookup failures
    field: Option<String>,
}

impl SchemaError {
    /// Schema source could not be read
    pub fn unreadable(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::FormSchemaUnreadable,
            message: format!("Cannot read schema '{}': {}", origin.into(), reason.into()),
            field: None,
        }
    }

    /// Schema source parsed but is not a usable schema
    pub fn malformed(origin: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            code: SchemaErrorCode::FormSchemaMalformed,
            message: format!("Malformed schema '{}': {}", origin.into(), reason.into()),
            field: None,
        }
    }

    /// Field is not declared by the schema
    pub fn unknown_field(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            code: SchemaErrorCode::FormUnknownField,
            message: format!("Field '{}' is not part of the form schema", name),
            field: Some(name),
        }
    }

    pub fn code(&self) -> SchemaErrorCode {
        self.code
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn field(&self) -> Option<&str> {
        self.field.as_deref()
    }
}

impl fmt::Display for SchemaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for SchemaError {}

/// Result type for schema operations
pub type SchemaResult<T> = Result<T, SchemaError>;
