//! CLI module for formbase
//!
//! Provides command-line interface for:
//! - serve: run the HTTP API
//! - schema: print the effective schema or its default values
//! - validate: check a payload file offline

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{print_schema, resolve_config, run, run_command, serve, validate};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{read_json_file, write_json};
