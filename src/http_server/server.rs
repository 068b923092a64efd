//! HTTP Server
//!
//! Combines the schema, submission and health routers behind CORS,
//! request tracing and panic recovery.

use std::any::Any;
use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowOrigin, Any as CorsAny, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::HttpServerConfig;
use super::errors::ApiError;
use super::form_routes::{form_routes, FormState};
use super::health_routes::health_routes;
use super::submission_routes::{submission_routes, SubmissionState};
use crate::schema::FormSchema;
use crate::store::SubmissionStore;

/// Form service HTTP server
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    pub fn new(
        config: HttpServerConfig,
        schema: Arc<FormSchema>,
        store: Arc<dyn SubmissionStore>,
    ) -> Self {
        let router = Self::build_router(&config, schema, store);
        Self { config, router }
    }

    fn build_router(
        config: &HttpServerConfig,
        schema: Arc<FormSchema>,
        store: Arc<dyn SubmissionStore>,
    ) -> Router {
        let form_state = Arc::new(FormState::new(schema));
        let submission_state = Arc::new(SubmissionState::new(store));

        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(CorsAny)
                .allow_methods(CorsAny)
                .allow_headers(CorsAny)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(CorsAny)
                .allow_headers(CorsAny)
        };

        Router::new()
            .merge(health_routes())
            .nest(
                "/api",
                form_routes(form_state).merge(submission_routes(submission_state)),
            )
            .layer(CatchPanicLayer::custom(panic_response))
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let listener = TcpListener::bind(self.config.socket_addr()).await?;
        let addr = listener.local_addr()?;
        tracing::info!(%addr, "form service listening");

        axum::serve(listener, self.router).await
    }
}

fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    ApiError::Internal(detail).into_response()
}
