//! # Store Errors

use thiserror::Error;

use crate::schema::ValidationErrors;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Submission store errors
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    /// Payload failed schema validation; nothing was written
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// No submission with this id
    #[error("Submission not found: {0}")]
    NotFound(String),

    /// Unexpected fault (e.g. poisoned lock)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }

    /// Field errors, when this is a validation failure
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            StoreError::Validation(errors) => Some(errors),
            _ => None,
        }
    }
}
