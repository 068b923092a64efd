//! CLI argument definitions using clap
//!
//! Commands:
//! - formbase serve [--config <path>] [--host <host>] [--port <port>] [--schema <path>]
//! - formbase schema [--schema <path>] [--defaults]
//! - formbase validate --file <path> [--schema <path>]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// formbase - schema-driven form validation and submission service
#[derive(Parser, Debug)]
#[command(name = "formbase")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,

        /// Host to bind, overrides config and HOST
        #[arg(long)]
        host: Option<String>,

        /// Port to bind, overrides config and PORT
        #[arg(long)]
        port: Option<u16>,

        /// Schema file, overrides config and FORMBASE_SCHEMA
        #[arg(long)]
        schema: Option<PathBuf>,
    },

    /// Print the effective form schema as JSON
    Schema {
        /// Schema file (built-in schema when omitted)
        #[arg(long, env = "FORMBASE_SCHEMA")]
        schema: Option<PathBuf>,

        /// Print the empty-form default values instead
        #[arg(long)]
        defaults: bool,
    },

    /// Validate a JSON payload file against the schema
    Validate {
        /// Payload file
        #[arg(long)]
        file: PathBuf,

        /// Schema file (built-in schema when omitted)
        #[arg(long, env = "FORMBASE_SCHEMA")]
        schema: Option<PathBuf>,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
