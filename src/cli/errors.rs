//! CLI-specific error types
//!
//! Every CLI error ends the process with a non-zero exit code.

use std::fmt;
use std::io;

use crate::config::ConfigError;
use crate::schema::SchemaError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file or environment error
    ConfigError,
    /// Schema could not be loaded
    SchemaError,
    /// I/O error (files, stdout)
    IoError,
    /// Server failed to start
    BootFailed,
    /// Payload failed validation
    InvalidPayload,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "FORM_CLI_CONFIG_ERROR",
            Self::SchemaError => "FORM_CLI_SCHEMA_ERROR",
            Self::IoError => "FORM_CLI_IO_ERROR",
            Self::BootFailed => "FORM_CLI_BOOT_FAILED",
            Self::InvalidPayload => "FORM_CLI_INVALID_PAYLOAD",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn boot_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::BootFailed, msg)
    }

    pub fn invalid_payload(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::InvalidPayload, msg)
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<SchemaError> for CliError {
    fn from(e: SchemaError) -> Self {
        Self::new(CliErrorCode::SchemaError, e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::invalid_payload("2 field(s) failed validation");
        assert_eq!(
            err.to_string(),
            "FORM_CLI_INVALID_PAYLOAD: 2 field(s) failed validation"
        );
    }

    #[test]
    fn test_schema_error_conversion() {
        let err = CliError::from(SchemaError::unreadable("forms/x.json", "No such file"));
        assert_eq!(err.code(), &CliErrorCode::SchemaError);
        assert!(err.message().contains("FORM_SCHEMA_UNREADABLE"));
    }
}
