use serde::{Deserialize, Serialize};

pub mod contact;
pub mod schema;
pub mod validation;

pub use contact::{Contact, CreateContactRequest, UpdateContactRequest};
pub use schema::{
    display_fields, field_schema, find_field, initial_values, DisplayField, FieldDefinition,
    FieldKind, ValidationRule,
};
pub use validation::{field_errors, is_valid, validate_field, validate_form};

/// A single field-level error message. `field` is absent for errors that are
/// not tied to one field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

/// Error body for validation and duplicate-email failures (HTTP 400)
#[derive(Debug, Serialize, Deserialize)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}

/// Error body for not-found and generic failures
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
