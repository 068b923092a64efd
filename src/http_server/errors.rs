//! # HTTP API Errors
//!
//! Maps store and request failures onto status codes and the
//! `{ success: false, message, errors? }` envelope.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::schema::{SchemaError, SchemaErrorCode, ValidationErrors};
use crate::store::StoreError;

/// Result type for HTTP handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// HTTP API errors
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Payload failed schema validation
    #[error("Validation failed")]
    Validation(ValidationErrors),

    /// Body could not be parsed as JSON
    #[error("Invalid JSON body: {0}")]
    InvalidBody(String),

    /// Body parsed but is not a JSON object
    #[error("Request body must be a JSON object")]
    BodyNotObject,

    /// Unknown submission id
    #[error("Submission not found")]
    SubmissionNotFound(String),

    /// Unknown schema field
    #[error("Field not found: {0}")]
    FieldNotFound(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Anything unexpected. The detail is logged, never returned.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::BodyNotObject => StatusCode::BAD_REQUEST,
            ApiError::SubmissionNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::FieldNotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message safe to show to clients
    pub fn public_message(&self) -> String {
        match self {
            ApiError::Validation(_) => "Validation failed".to_string(),
            ApiError::InvalidBody(_) => "Invalid JSON body".to_string(),
            ApiError::BodyNotObject => "Request body must be a JSON object".to_string(),
            ApiError::SubmissionNotFound(_) => "Submission not found".to_string(),
            ApiError::FieldNotFound(name) => format!("Field '{}' not found", name),
            ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation(errors) => ApiError::Validation(errors),
            StoreError::NotFound(id) => ApiError::SubmissionNotFound(id),
            StoreError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<SchemaError> for ApiError {
    fn from(err: SchemaError) -> Self {
        match (err.code(), err.field()) {
            (SchemaErrorCode::FormUnknownField, Some(name)) => {
                ApiError::FieldNotFound(name.to_string())
            }
            _ => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidBody(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<ValidationErrors>,
}

impl From<ApiError> for ErrorResponse {
    fn from(err: ApiError) -> Self {
        let message = err.public_message();
        let errors = match err {
            ApiError::Validation(errors) => Some(errors),
            _ => None,
        };
        Self {
            success: false,
            message,
            errors,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Internal(detail) => tracing::error!(%detail, "request failed"),
            ApiError::InvalidBody(detail) => tracing::debug!(%detail, "rejected request body"),
            _ => {}
        }
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldViolation;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Validation(ValidationErrors::new()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::SubmissionNotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_not_exposed() {
        let body = ErrorResponse::from(ApiError::Internal("Lock poisoned".into()));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["message"], "Internal server error");
        assert!(json.get("errors").is_none());
    }

    #[test]
    fn test_validation_body_carries_errors() {
        let mut errors = ValidationErrors::new();
        errors.push("fullName", FieldViolation::TooShort(3));
        let json = serde_json::to_value(ErrorResponse::from(ApiError::Validation(errors))).unwrap();
        assert_eq!(json["message"], "Validation failed");
        assert_eq!(json["errors"]["fullName"], "Must be at least 3 characters.");
    }

    #[test]
    fn test_store_error_mapping() {
        let err = ApiError::from(StoreError::NotFound("abc".into()));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        let err = ApiError::from(StoreError::Internal("x".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_unknown_field_maps_to_404() {
        let err = ApiError::from(SchemaError::unknown_field("nickname"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.public_message(), "Field 'nickname' not found");
    }
}
