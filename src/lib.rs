//! formbase - a schema-driven form validation and submission service
//!
//! One declarative schema drives both rendering and validation. Submissions
//! are validated against it before they are stored.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod observability;
pub mod schema;
pub mod store;
