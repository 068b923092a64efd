//! Schema loader
//!
//! The schema is loaded once at startup, either from a JSON file or from the
//! built-in onboarding form, and is immutable afterwards. A file that fails to
//! parse or fails the structural checks aborts startup.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use super::builtin;
use super::errors::{SchemaError, SchemaResult};
use super::types::FormSchema;

/// Produces the process-wide form schema.
pub struct SchemaLoader;

impl SchemaLoader {
    /// Loads the schema from `path`, or the built-in schema when `None`.
    pub fn load(path: Option<&Path>) -> SchemaResult<Arc<FormSchema>> {
        let schema = match path {
            Some(path) => Self::load_file(path)?,
            None => builtin::employee_onboarding(),
        };

        tracing::info!(
            title = %schema.title,
            fields = schema.fields.len(),
            "form schema loaded"
        );

        Ok(Arc::new(schema))
    }

    /// Loads and checks a single schema file.
    pub fn load_file(path: &Path) -> SchemaResult<FormSchema> {
        let origin = path.display().to_string();
        let content = fs::read_to_string(path)
            .map_err(|e| SchemaError::unreadable(&origin, e.to_string()))?;

        Self::parse(&content, &origin)
    }

    /// Parses schema JSON and runs the structural checks.
    pub fn parse(content: &str, origin: &str) -> SchemaResult<FormSchema> {
        let schema: FormSchema = serde_json::from_str(content)
            .map_err(|e| SchemaError::malformed(origin, format!("Invalid JSON: {}", e)))?;

        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed(origin, e))?;

        Ok(schema)
    }
}

#[cfg(test)]
mod tests {
    use super::super::errors::SchemaErrorCode;
    use super::super::types::FieldType;
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_load_builtin_when_no_path() {
        let schema = SchemaLoader::load(None).unwrap();
        assert_eq!(schema.title, "Employee Onboarding");
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("form.json");
        let content = json!({
            "title": "Feedback",
            "fields": [
                {"name": "rating", "label": "Rating", "type": "number", "required": true,
                 "validation": {"min": 1, "max": 5}},
                {"name": "comment", "label": "Comment", "type": "textarea"}
            ]
        });
        fs::write(&path, content.to_string()).unwrap();

        let schema = SchemaLoader::load(Some(&path)).unwrap();
        assert_eq!(schema.title, "Feedback");
        assert_eq!(schema.fields[0].field_type, FieldType::Number);
        assert_eq!(schema.fields[0].validation.max, Some(5.0));
        assert!(!schema.fields[1].required);
    }

    #[test]
    fn test_missing_file_is_unreadable() {
        let temp_dir = TempDir::new().unwrap();
        let err = SchemaLoader::load_file(&temp_dir.path().join("absent.json")).unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::FormSchemaUnreadable);
    }

    #[test]
    fn test_unknown_type_is_malformed() {
        let content = json!({
            "title": "Bad",
            "fields": [{"name": "x", "label": "X", "type": "color"}]
        });
        let err = SchemaLoader::parse(&content.to_string(), "<inline>").unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::FormSchemaMalformed);
    }

    #[test]
    fn test_structural_failure_is_malformed() {
        let content = json!({
            "title": "Dup",
            "fields": [
                {"name": "x", "label": "X", "type": "text"},
                {"name": "x", "label": "X", "type": "text"}
            ]
        });
        let err = SchemaLoader::parse(&content.to_string(), "<inline>").unwrap_err();
        assert!(err.message().contains("duplicate"));
    }

    #[test]
    fn test_builtin_round_trips_through_wire_format() {
        let builtin = builtin::employee_onboarding();
        let wire = serde_json::to_string(&builtin).unwrap();
        let parsed = SchemaLoader::parse(&wire, "<wire>").unwrap();
        assert_eq!(parsed, builtin);
    }
}
