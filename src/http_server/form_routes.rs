//! Form Schema HTTP Routes
//!
//! Serves the schema the client renders from, plus an interactive
//! single-field check that uses the same rules as submission validation.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::response::FieldCheckResponse;
use crate::schema::{FormSchema, SchemaValidator};

// ==================
// Shared State
// ==================

/// Read-only schema shared across handlers
pub struct FormState {
    pub schema: Arc<FormSchema>,
}

impl FormState {
    pub fn new(schema: Arc<FormSchema>) -> Self {
        Self { schema }
    }
}

// ==================
// Request Types
// ==================

#[derive(Debug, Deserialize)]
pub struct FieldCheckRequest {
    #[serde(default)]
    pub value: Option<Value>,
}

// ==================
// Routes
// ==================

pub fn form_routes(state: Arc<FormState>) -> Router {
    Router::new()
        .route("/form-schema", get(get_schema))
        .route("/form-schema/fields/:name/validate", post(check_field))
        .with_state(state)
}

// ==================
// Handlers
// ==================

async fn get_schema(State(state): State<Arc<FormState>>) -> Json<FormSchema> {
    Json(state.schema.as_ref().clone())
}

async fn check_field(
    State(state): State<Arc<FormState>>,
    Path(name): Path<String>,
    body: Result<Json<FieldCheckRequest>, JsonRejection>,
) -> ApiResult<Json<FieldCheckResponse>> {
    let Json(request) = body.map_err(ApiError::from)?;

    let outcome = SchemaValidator::new(&state.schema).check_field(&name, request.value.as_ref())?;
    let error = outcome.err().map(|violation| violation.to_string());

    Ok(Json(FieldCheckResponse::new(name, error)))
}
