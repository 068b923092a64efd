//! Built-in employee onboarding form, served when no schema file is configured.

use super::types::{FieldDef, FieldOption, FieldType, FieldValidation, FormSchema};

/// Email shape: something@something.tld, no whitespace.
pub const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

pub fn employee_onboarding() -> FormSchema {
    FormSchema::new(
        "Employee Onboarding",
        vec![
            FieldDef::new("fullName", "Full Name", FieldType::Text)
                .required()
                .with_placeholder("Enter full name")
                .with_validation(FieldValidation::length(Some(3), Some(100))),
            FieldDef::new("email", "Email", FieldType::Text)
                .required()
                .with_placeholder("name@company.com")
                .with_validation(FieldValidation::pattern(EMAIL_PATTERN)),
            FieldDef::new("age", "Age", FieldType::Number)
                .with_placeholder("Enter age")
                .with_validation(FieldValidation::range(Some(18.0), Some(65.0))),
            FieldDef::new("department", "Department", FieldType::Select)
                .required()
                .with_placeholder("Select department")
                .with_options(vec![
                    FieldOption::new("Engineering", "engineering"),
                    FieldOption::new("HR", "hr"),
                    FieldOption::new("Finance", "finance"),
                ]),
            FieldDef::new("skills", "Skills", FieldType::MultiSelect)
                .with_placeholder("Add skills")
                .with_options(vec![
                    FieldOption::new("JavaScript", "JavaScript"),
                    FieldOption::new("React", "React"),
                    FieldOption::new("Node.js", "Node.js"),
                ])
                .with_validation(FieldValidation::selected(Some(1), Some(5))),
            FieldDef::new("joiningDate", "Joining Date", FieldType::Date)
                .required()
                .with_placeholder("Select joining date")
                .with_validation(FieldValidation::not_before("2020-01-01")),
            FieldDef::new("notes", "Notes", FieldType::Textarea)
                .with_placeholder("Additional information")
                .with_validation(FieldValidation::length(None, Some(500))),
            FieldDef::new("isRemote", "Remote Employee", FieldType::Switch),
        ],
    )
    .with_description("Onboarding form for new employees.")
}
