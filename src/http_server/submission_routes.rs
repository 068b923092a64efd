//! Submission HTTP Routes
//!
//! CRUD and listing over the submission store. Validation happens in the
//! store; handlers only translate between HTTP and store calls.

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use super::errors::{ApiError, ApiResult};
use super::response::{ListResponse, SubmissionResponse};
use crate::store::{ListQuery, SubmissionData, SubmissionStore};

// ==================
// Shared State
// ==================

pub struct SubmissionState {
    pub store: Arc<dyn SubmissionStore>,
}

impl SubmissionState {
    pub fn new(store: Arc<dyn SubmissionStore>) -> Self {
        Self { store }
    }
}

// ==================
// Routes
// ==================

pub fn submission_routes(state: Arc<SubmissionState>) -> Router {
    Router::new()
        .route("/submissions", get(list_submissions).post(create_submission))
        .route(
            "/submissions/:id",
            get(get_submission)
                .put(update_submission)
                .delete(delete_submission),
        )
        .with_state(state)
}

/// Unwraps a JSON body that must be an object.
fn object_body(body: Result<Json<Value>, JsonRejection>) -> ApiResult<SubmissionData> {
    let Json(value) = body?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(ApiError::BodyNotObject),
    }
}

/// Listing parameters never fail a request; undecodable ones use the defaults.
fn list_query(params: Result<Query<HashMap<String, String>>, QueryRejection>) -> ListQuery {
    match params {
        Ok(Query(params)) => ListQuery::from_params(&params),
        Err(rejection) => {
            tracing::debug!(reason = %rejection.body_text(), "ignoring listing parameters");
            ListQuery::default()
        }
    }
}

// ==================
// Handlers
// ==================

async fn create_submission(
    State(state): State<Arc<SubmissionState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SubmissionResponse>)> {
    let data = object_body(body)?;
    let submission = state.store.create(data)?;
    Ok((StatusCode::CREATED, Json(SubmissionResponse::new(submission))))
}

async fn list_submissions(
    State(state): State<Arc<SubmissionState>>,
    params: Result<Query<HashMap<String, String>>, QueryRejection>,
) -> ApiResult<Json<ListResponse>> {
    let query = list_query(params);
    let page = state.store.list(&query)?;
    Ok(Json(ListResponse::from(page)))
}

async fn get_submission(
    State(state): State<Arc<SubmissionState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SubmissionResponse>> {
    let submission = state.store.get(&id)?;
    Ok(Json(SubmissionResponse::new(submission)))
}

async fn update_submission(
    State(state): State<Arc<SubmissionState>>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<SubmissionResponse>> {
    let data = object_body(body)?;
    let submission = state.store.update(&id, data)?;
    Ok(Json(SubmissionResponse::new(submission)))
}

async fn delete_submission(
    State(state): State<Arc<SubmissionState>>,
    Path(id): Path<String>,
) -> ApiResult<Json<SubmissionResponse>> {
    let submission = state.store.delete(&id)?;
    Ok(Json(SubmissionResponse::new(submission)))
}
