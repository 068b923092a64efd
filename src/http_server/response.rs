//! # Response Formatting
//!
//! Success envelopes. Every body carries `success: true`.

use serde::Serialize;

use crate::store::{Pagination, SortInfo, Submission, SubmissionPage};

/// Single submission response (create, get, update, delete)
#[derive(Debug, Clone, Serialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub submission: Submission,
}

impl SubmissionResponse {
    pub fn new(submission: Submission) -> Self {
        Self {
            success: true,
            submission,
        }
    }
}

/// Paginated listing response
#[derive(Debug, Clone, Serialize)]
pub struct ListResponse {
    pub success: bool,
    pub data: Vec<Submission>,
    pub pagination: Pagination,
    pub sort: SortInfo,
}

impl From<SubmissionPage> for ListResponse {
    fn from(page: SubmissionPage) -> Self {
        Self {
            success: true,
            data: page.data,
            pagination: page.pagination,
            sort: page.sort,
        }
    }
}

/// Result of an interactive single-field check
#[derive(Debug, Clone, Serialize)]
pub struct FieldCheckResponse {
    pub success: bool,
    pub field: String,
    pub valid: bool,
    pub error: Option<String>,
}

impl FieldCheckResponse {
    pub fn new(field: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: true,
            field: field.into(),
            valid: error.is_none(),
            error,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
