//! Form schema type definitions
//!
//! Supported field types:
//! - text / textarea: free-form strings with length and pattern constraints
//! - number: finite numbers with inclusive bounds
//! - select: one value out of a declared option list
//! - multi-select: a list of option values with a size range
//! - date: calendar date with an inclusive lower bound
//! - switch: boolean toggle
//!
//! The wire format is camelCase JSON, identical for schema files on disk and
//! for `GET /api/form-schema`.

use std::collections::HashSet;
use std::fmt;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::coerce;

/// Closed set of field types.
///
/// Unknown type names fail deserialization, so a schema carrying one is
/// rejected when it is loaded rather than silently accepted at validation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldType {
    Text,
    Textarea,
    Number,
    Select,
    MultiSelect,
    Date,
    Switch,
}

impl FieldType {
    /// Returns the wire name of the type
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Textarea => "textarea",
            FieldType::Number => "number",
            FieldType::Select => "select",
            FieldType::MultiSelect => "multi-select",
            FieldType::Date => "date",
            FieldType::Switch => "switch",
        }
    }

    /// Whether the type draws its values from `options`
    pub fn uses_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::MultiSelect)
    }

    /// Value a freshly rendered, untouched input holds.
    pub fn empty_value(&self) -> Value {
        match self {
            FieldType::MultiSelect => Value::Array(Vec::new()),
            FieldType::Switch => Value::Bool(false),
            _ => Value::String(String::new()),
        }
    }
}

/// One selectable option of a select / multi-select field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldOption {
    pub label: String,
    pub value: String,
}

impl FieldOption {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// A `regex` constraint, compiled once when constructed.
///
/// Construction never fails; a pattern that does not compile is kept so
/// `FormSchema::validate_structure` can reject the schema with the
/// compiler's message.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    compiled: Result<Regex, regex::Error>,
}

impl Pattern {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let compiled = Regex::new(&source);
        Self { source, compiled }
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The compiled regex, or the reason it failed to compile
    pub fn regex(&self) -> Result<&Regex, &regex::Error> {
        self.compiled.as_ref()
    }

    /// Whether `text` matches. Uncompilable patterns match nothing.
    pub fn is_match(&self, text: &str) -> bool {
        self.compiled.as_ref().is_ok_and(|re| re.is_match(text))
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Self::new(source)
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Self::new(source)
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.source)
    }
}

impl<'de> Deserialize<'de> for Pattern {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Pattern::new)
    }
}

/// Type-specific constraint bag. An absent constraint leaves that axis
/// unconstrained.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub regex: Option<Pattern>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selected: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selected: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_date: Option<String>,
}

impl FieldValidation {
    /// True when no constraint is set
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn length(min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            min_length: min,
            max_length: max,
            ..Default::default()
        }
    }

    pub fn pattern(regex: impl Into<String>) -> Self {
        Self {
            regex: Some(Pattern::new(regex)),
            ..Default::default()
        }
    }

    pub fn range(min: Option<f64>, max: Option<f64>) -> Self {
        Self {
            min,
            max,
            ..Default::default()
        }
    }

    pub fn selected(min: Option<usize>, max: Option<usize>) -> Self {
        Self {
            min_selected: min,
            max_selected: max,
            ..Default::default()
        }
    }

    pub fn not_before(min_date: impl Into<String>) -> Self {
        Self {
            min_date: Some(min_date.into()),
            ..Default::default()
        }
    }
}

/// A single named, typed input slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDef {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<FieldOption>,
    #[serde(default, skip_serializing_if = "FieldValidation::is_empty")]
    pub validation: FieldValidation,
}

impl FieldDef {
    /// Create an optional field with no constraints
    pub fn new(name: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            field_type,
            placeholder: None,
            required: false,
            options: Vec::new(),
            validation: FieldValidation::default(),
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_options(mut self, options: Vec<FieldOption>) -> Self {
        self.options = options;
        self
    }

    pub fn with_validation(mut self, validation: FieldValidation) -> Self {
        self.validation = validation;
        self
    }

    /// Declared option values, in declaration order
    pub fn option_values(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.value.as_str())
    }

    /// Whether `value` is one of the declared option values
    pub fn has_option(&self, value: &str) -> bool {
        self.option_values().any(|v| v == value)
    }

    fn validate_structure(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("field names must not be empty".into());
        }

        if !self.options.is_empty() && !self.field_type.uses_options() {
            return Err(format!(
                "field '{}': options are not allowed on {} fields",
                self.name,
                self.field_type.type_name()
            ));
        }

        let mut seen = HashSet::new();
        for value in self.option_values() {
            if !seen.insert(value) {
                return Err(format!(
                    "field '{}' declares option value '{}' more than once",
                    self.name, value
                ));
            }
        }

        let v = &self.validation;
        if let (Some(min), Some(max)) = (v.min_length, v.max_length) {
            if min > max {
                return Err(format!("field '{}': minLength exceeds maxLength", self.name));
            }
        }
        if let (Some(min), Some(max)) = (v.min, v.max) {
            if min > max {
                return Err(format!("field '{}': min exceeds max", self.name));
            }
        }
        if let (Some(min), Some(max)) = (v.min_selected, v.max_selected) {
            if min > max {
                return Err(format!(
                    "field '{}': minSelected exceeds maxSelected",
                    self.name
                ));
            }
        }
        if let Some(pattern) = &v.regex {
            pattern
                .regex()
                .map_err(|e| format!("field '{}': invalid regex: {}", self.name, e))?;
        }
        if let Some(min_date) = &v.min_date {
            if coerce::parse_date(min_date).is_none() {
                return Err(format!(
                    "field '{}': minDate '{}' is not a calendar date",
                    self.name, min_date
                ));
            }
        }

        Ok(())
    }
}

/// Complete form definition. Field order is the canonical render and
/// error-reporting order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub fields: Vec<FieldDef>,
}

impl FormSchema {
    pub fn new(title: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        Self {
            title: title.into(),
            description: None,
            fields,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Looks up a field by name
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Validates the schema structure itself (not a submission)
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.fields.is_empty() {
            return Err("schema must define at least one field".into());
        }

        let mut names = HashSet::new();
        for field in &self.fields {
            field.validate_structure()?;
            if !names.insert(field.name.as_str()) {
                return Err(format!("duplicate field name '{}'", field.name));
            }
        }

        Ok(())
    }

    /// Initial value map for rendering the form.
    ///
    /// Values present in `seed` (e.g. an existing submission being edited)
    /// win over the per-type empty value. Keys outside the schema are dropped.
    pub fn default_values(&self, seed: Option<&Map<String, Value>>) -> Map<String, Value> {
        self.fields
            .iter()
            .map(|field| {
                let value = seed
                    .and_then(|s| s.get(&field.name))
                    .cloned()
                    .unwrap_or_else(|| field.field_type.empty_value());
                (field.name.clone(), value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_schema() -> FormSchema {
        FormSchema::new(
            "Sample",
            vec![
                FieldDef::new("name", "Name", FieldType::Text).required(),
                FieldDef::new("tags", "Tags", FieldType::MultiSelect),
                FieldDef::new("active", "Active", FieldType::Switch),
            ],
        )
    }

    #[test]
    fn test_schema_structure_valid() {
        assert!(sample_schema().validate_structure().is_ok());
    }

    #[test]
    fn test_duplicate_field_names_rejected() {
        let schema = FormSchema::new(
            "Dup",
            vec![
                FieldDef::new("a", "A", FieldType::Text),
                FieldDef::new("a", "A again", FieldType::Number),
            ],
        );
        let err = schema.validate_structure().unwrap_err();
        assert!(err.contains("duplicate"));
    }

    #[test]
    fn test_empty_schema_rejected() {
        let schema = FormSchema::new("Empty", vec![]);
        assert!(schema.validate_structure().is_err());
    }

    #[test]
    fn test_duplicate_option_values_rejected() {
        let field = FieldDef::new("dept", "Dept", FieldType::Select).with_options(vec![
            FieldOption::new("HR", "hr"),
            FieldOption::new("Human Resources", "hr"),
        ]);
        let schema = FormSchema::new("Opts", vec![field]);
        assert!(schema.validate_structure().unwrap_err().contains("'hr'"));
    }

    #[test]
    fn test_bad_regex_rejected() {
        let field = FieldDef::new("code", "Code", FieldType::Text)
            .with_validation(FieldValidation::pattern("(unclosed"));
        let schema = FormSchema::new("Regex", vec![field]);
        assert!(schema.validate_structure().unwrap_err().contains("regex"));
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let field = FieldDef::new("age", "Age", FieldType::Number)
            .with_validation(FieldValidation::range(Some(65.0), Some(18.0)));
        assert!(FormSchema::new("Bounds", vec![field]).validate_structure().is_err());
    }

    #[test]
    fn test_unparseable_min_date_rejected() {
        let field = FieldDef::new("start", "Start", FieldType::Date)
            .with_validation(FieldValidation::not_before("someday"));
        assert!(FormSchema::new("Dates", vec![field]).validate_structure().is_err());
    }

    #[test]
    fn test_field_type_wire_names() {
        assert_eq!(
            serde_json::to_value(FieldType::MultiSelect).unwrap(),
            json!("multi-select")
        );
        let parsed: FieldType = serde_json::from_value(json!("textarea")).unwrap();
        assert_eq!(parsed, FieldType::Textarea);
        assert_eq!(FieldType::MultiSelect.type_name(), "multi-select");
    }

    #[test]
    fn test_unknown_field_type_fails_to_parse() {
        let result: Result<FieldDef, _> =
            serde_json::from_value(json!({"name": "x", "type": "color"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_field_wire_format_is_camel_case() {
        let field = FieldDef::new("fullName", "Full Name", FieldType::Text)
            .required()
            .with_validation(FieldValidation::length(Some(3), Some(100)));
        let value = serde_json::to_value(&field).unwrap();
        assert_eq!(value["type"], "text");
        assert_eq!(value["validation"]["minLength"], 3);
        assert_eq!(value["validation"]["maxLength"], 100);
        assert!(value.get("options").is_none());
    }

    #[test]
    fn test_default_values_per_type() {
        let values = sample_schema().default_values(None);
        assert_eq!(values["name"], json!(""));
        assert_eq!(values["tags"], json!([]));
        assert_eq!(values["active"], json!(false));
    }

    #[test]
    fn test_default_values_seeded() {
        let seed = json!({"name": "Ada", "extra": 1});
        let values = sample_schema().default_values(seed.as_object());
        assert_eq!(values["name"], json!("Ada"));
        assert_eq!(values["active"], json!(false));
        assert!(!values.contains_key("extra"));
        let keys: Vec<_> = values.keys().cloned().collect();
        assert_eq!(keys.len(), 3);
    }

    #[test]
    fn test_default_values_follow_field_order() {
        let schema = FormSchema::new(
            "Order",
            vec![
                FieldDef::new("zeta", "Zeta", FieldType::Text),
                FieldDef::new("alpha", "Alpha", FieldType::Switch),
                FieldDef::new("mid", "Mid", FieldType::MultiSelect),
            ],
        );
        let values = schema.default_values(None);
        let keys: Vec<_> = values.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha", "mid"]);

        let rendered = serde_json::to_string(&Value::Object(values)).unwrap();
        assert_eq!(rendered, r#"{"zeta":"","alpha":false,"mid":[]}"#);
    }

    #[test]
    fn test_options_on_non_choice_field_rejected() {
        let field = FieldDef::new("name", "Name", FieldType::Text)
            .with_options(vec![FieldOption::new("A", "a")]);
        let err = FormSchema::new("Opts", vec![field])
            .validate_structure()
            .unwrap_err();
        assert!(err.contains("not allowed on text fields"));
    }

    #[test]
    fn test_pattern_compiled_once_and_round_trips_as_string() {
        let pattern = Pattern::new("^[a-z]+$");
        assert!(pattern.regex().is_ok());
        assert!(pattern.is_match("abc"));
        assert!(!pattern.is_match("ABC"));
        assert_eq!(serde_json::to_value(&pattern).unwrap(), json!("^[a-z]+$"));

        let parsed: FieldValidation =
            serde_json::from_value(json!({"regex": "(unclosed"})).unwrap();
        let broken = parsed.regex.unwrap();
        assert!(broken.regex().is_err());
        assert!(!broken.is_match("(unclosed"));
    }
}
