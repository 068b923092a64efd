//! CLI command implementations

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use crate::config::AppConfig;
use crate::http_server::HttpServer;
use crate::observability::init_logging;
use crate::schema::{SchemaLoader, SchemaValidator};
use crate::store::{InMemorySubmissionStore, SubmissionStore};

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::{read_json_file, write_json};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            host,
            port,
            schema,
        } => {
            let config = resolve_config(config.as_deref(), host, port, schema)?;
            serve(config)
        }
        Command::Schema { schema, defaults } => print_schema(schema.as_deref(), defaults),
        Command::Validate { file, schema } => validate(&file, schema.as_deref()),
    }
}

/// Builds the effective configuration: file and environment first, then flags.
pub fn resolve_config(
    config_path: Option<&Path>,
    host: Option<String>,
    port: Option<u16>,
    schema: Option<PathBuf>,
) -> CliResult<AppConfig> {
    let mut config = AppConfig::load(config_path)?;

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }
    if let Some(schema) = schema {
        config.schema_path = Some(schema);
    }

    config.validate()?;
    Ok(config)
}

/// Start the HTTP API
///
/// 1. Install logging
/// 2. Load the schema (fatal on failure)
/// 3. Create the store
/// 4. Serve until stopped
pub fn serve(config: AppConfig) -> CliResult<()> {
    init_logging(&config.log)
        .map_err(|e| CliError::boot_failed(format!("Failed to initialize logging: {}", e)))?;

    let schema = SchemaLoader::load(config.schema_path.as_deref())?;
    let store: Arc<dyn SubmissionStore> = Arc::new(InMemorySubmissionStore::new(schema.clone()));
    let server = HttpServer::new(config.server.clone(), schema, store);

    tracing::info!(
        addr = %server.socket_addr(),
        log_format = %config.log.format,
        "starting form service"
    );

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Print the effective schema, or its empty-form defaults
pub fn print_schema(schema_path: Option<&Path>, defaults: bool) -> CliResult<()> {
    let schema = SchemaLoader::load(schema_path)?;

    if defaults {
        write_json(&Value::Object(schema.default_values(None)))
    } else {
        write_json(schema.as_ref())
    }
}

/// Validate a payload file offline
///
/// Prints `{ isValid, errors }` and fails when the payload is invalid.
pub fn validate(file: &Path, schema_path: Option<&Path>) -> CliResult<()> {
    let schema = SchemaLoader::load(schema_path)?;
    let payload = read_json_file(file)?;

    let outcome = SchemaValidator::new(&schema).validate_submission(&payload);
    write_json(&outcome)?;

    outcome.into_result().map_err(|errors| {
        CliError::invalid_payload(format!(
            "{} field(s) failed validation: {}",
            errors.len(),
            errors
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_flags_override_file() {
        let dir = TempDir::new().unwrap();
        let config_path = write_file(
            &dir,
            "formbase.json",
            r#"{"server": {"host": "10.0.0.1", "port": 8080}}"#,
        );

        let config = resolve_config(
            Some(&config_path),
            Some("127.0.0.1".into()),
            Some(9100),
            Some(PathBuf::from("forms/custom.json")),
        )
        .unwrap();

        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.schema_path, Some(PathBuf::from("forms/custom.json")));
    }

    #[test]
    fn test_zero_port_flag_rejected() {
        let result = resolve_config(None, None, Some(0), None);
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_missing_config_file() {
        let dir = TempDir::new().unwrap();
        let result = resolve_config(Some(&dir.path().join("absent.json")), None, None, None);
        assert_eq!(result.unwrap_err().code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_validate_accepts_valid_payload() {
        let dir = TempDir::new().unwrap();
        let payload = json!({
            "fullName": "Ada Lovelace",
            "email": "ada@example.com",
            "department": "engineering",
            "joiningDate": "2024-02-01"
        });
        let file = write_file(&dir, "payload.json", &payload.to_string());

        validate(&file, None).unwrap();
    }

    #[test]
    fn test_validate_rejects_invalid_payload() {
        let dir = TempDir::new().unwrap();
        let file = write_file(&dir, "payload.json", r#"{"fullName": "Jo"}"#);

        let err = validate(&file, None).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::InvalidPayload);
        assert!(err.message().starts_with("4 field(s) failed validation"));
    }

    #[test]
    fn test_validate_bad_schema_file() {
        let dir = TempDir::new().unwrap();
        let schema = write_file(&dir, "schema.json", r#"{"title": "x", "fields": [{"name": "a", "label": "A", "type": "color"}]}"#);
        let file = write_file(&dir, "payload.json", "{}");

        let err = validate(&file, Some(&schema)).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::SchemaError);
    }

    #[test]
    fn test_print_schema_defaults() {
        print_schema(None, true).unwrap();
        print_schema(None, false).unwrap();
    }
}
