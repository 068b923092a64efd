//! Observability
//!
//! Structured logging via `tracing`. Initialized once by the binary; library
//! code only emits events.

mod logging;

pub use logging::{init_logging, LogConfig, LogFormat};
