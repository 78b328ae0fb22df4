//! Schema-driven validation, used identically by the API server and the
//! client so the two never disagree on what a valid contact looks like.

use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::schema::{field_schema, find_field, FieldDefinition};
use crate::FieldError;

fn patterns() -> &'static HashMap<&'static str, Regex> {
    static COMPILED: OnceLock<HashMap<&'static str, Regex>> = OnceLock::new();
    COMPILED.get_or_init(|| {
        field_schema()
            .iter()
            .filter_map(|f| f.rule.pattern)
            .map(|p| (p, Regex::new(p).expect("field schema pattern must compile")))
            .collect()
    })
}

/// Validate one field value against its schema rule. Returns the error
/// message, or `None` if the value is valid.
///
/// Panics on an unknown field name; the schema is the only legal source of
/// names.
pub fn validate_field(name: &str, value: &str) -> Option<String> {
    let field = find_field(name).unwrap_or_else(|| panic!("unknown field: {name}"));
    apply_rules(field, value)
}

fn apply_rules(field: &FieldDefinition, value: &str) -> Option<String> {
    if value.trim().is_empty() {
        if field.required {
            return Some(format!("{} is required", field.label));
        }
        return None;
    }

    // First failing check wins: min length, then max length, then pattern.
    let rule = &field.rule;
    let len = value.chars().count();

    if let Some(min) = rule.min_length {
        if len < min {
            return Some(rule.message.to_string());
        }
    }
    if let Some(max) = rule.max_length {
        if len > max {
            return Some(rule.message.to_string());
        }
    }
    if let Some(pattern) = rule.pattern {
        if !patterns()[pattern].is_match(value) {
            return Some(rule.message.to_string());
        }
    }

    None
}

/// Validate every schema field against `values`. Missing entries are treated
/// as empty. The result contains only failing fields.
pub fn validate_form(values: &HashMap<String, String>) -> HashMap<String, String> {
    let mut errors = HashMap::new();
    for field in field_schema() {
        let value = values.get(field.name).map(String::as_str).unwrap_or("");
        if let Some(error) = validate_field(field.name, value) {
            errors.insert(field.name.to_string(), error);
        }
    }
    errors
}

pub fn is_valid(errors: &HashMap<String, String>) -> bool {
    errors.is_empty()
}

/// Flatten a `validate_form` result into wire-format field errors, in schema
/// order.
pub fn field_errors(errors: &HashMap<String, String>) -> Vec<FieldError> {
    field_schema()
        .iter()
        .filter_map(|f| errors.get(f.name).map(|msg| FieldError::new(f.name, msg.as_str())))
        .collect()
}
