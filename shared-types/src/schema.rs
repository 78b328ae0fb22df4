//! The field schema drives both form rendering and validation. To add a
//! field, add an entry to `FIELDS`; no renderer or validator change is
//! needed.

use std::collections::HashMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    ShortText,
    Phone,
    Email,
    Date,
    LongText,
}

/// Constraints for one field. Absent components mean no constraint of that
/// kind. `message` is returned for whichever check fails first.
#[derive(Debug, Clone, Copy)]
pub struct ValidationRule {
    pub min_length: Option<usize>,
    pub max_length: Option<usize>,
    pub pattern: Option<&'static str>,
    pub message: &'static str,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    pub rule: ValidationRule,
    pub placeholder: &'static str,
    /// Column span out of 12 for grid layouts.
    pub layout_hint: u8,
}

const FIELDS: &[FieldDefinition] = &[
    FieldDefinition {
        name: "firstName",
        label: "First Name",
        kind: FieldKind::ShortText,
        required: true,
        rule: ValidationRule {
            min_length: Some(2),
            max_length: Some(50),
            pattern: None,
            message: "First name must be 2-50 characters",
        },
        placeholder: "Enter first name",
        layout_hint: 6,
    },
    FieldDefinition {
        name: "lastName",
        label: "Last Name",
        kind: FieldKind::ShortText,
        required: true,
        rule: ValidationRule {
            min_length: Some(2),
            max_length: Some(50),
            pattern: None,
            message: "Last name must be 2-50 characters",
        },
        placeholder: "Enter last name",
        layout_hint: 6,
    },
    FieldDefinition {
        name: "phone",
        label: "Phone Number",
        kind: FieldKind::Phone,
        required: true,
        rule: ValidationRule {
            min_length: None,
            max_length: None,
            pattern: Some(r"^[0-9]{10}$"),
            message: "Phone must be exactly 10 digits",
        },
        placeholder: "10-digit phone number",
        layout_hint: 6,
    },
    FieldDefinition {
        name: "email",
        label: "Email Address",
        kind: FieldKind::Email,
        required: true,
        rule: ValidationRule {
            min_length: None,
            max_length: None,
            pattern: Some(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"),
            message: "Please enter a valid email address",
        },
        placeholder: "your@email.com",
        layout_hint: 6,
    },
];

/// The ordered field schema. Single source of truth for rendering and
/// validation.
pub fn field_schema() -> &'static [FieldDefinition] {
    FIELDS
}

pub fn find_field(name: &str) -> Option<&'static FieldDefinition> {
    FIELDS.iter().find(|f| f.name == name)
}

/// Empty form values, one entry per schema field.
pub fn initial_values() -> HashMap<String, String> {
    FIELDS
        .iter()
        .map(|f| (f.name.to_string(), String::new()))
        .collect()
}

/// Name and label pair for read-only rendering.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DisplayField {
    pub name: &'static str,
    pub label: &'static str,
}

pub fn display_fields() -> Vec<DisplayField> {
    FIELDS
        .iter()
        .map(|f| DisplayField {
            name: f.name,
            label: f.label,
        })
        .collect()
}
