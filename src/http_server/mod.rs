//! HTTP Server Module
//!
//! JSON API for the form service:
//! - `/health` - liveness check
//! - `/api/form-schema` - the active schema and single-field checks
//! - `/api/submissions` - submission CRUD and paginated listing

mod config;
mod errors;
mod form_routes;
mod health_routes;
mod response;
mod server;
mod submission_routes;

pub use config::HttpServerConfig;
pub use errors::{ApiError, ApiResult, ErrorResponse};
pub use form_routes::{form_routes, FieldCheckRequest, FormState};
pub use health_routes::health_routes;
pub use response::{FieldCheckResponse, HealthResponse, ListResponse, SubmissionResponse};
pub use server::HttpServer;
pub use submission_routes::{submission_routes, SubmissionState};
