//! Transient state of an open contact form. Created when the form opens,
//! discarded on submit success or cancel.

use std::collections::{HashMap, HashSet};

use shared_types::{
    field_schema, initial_values, is_valid, validate_field, validate_form, CreateContactRequest,
};

pub struct FormState {
    values: HashMap<String, String>,
    touched: HashSet<String>,
    errors: HashMap<String, String>,
}

impl FormState {
    /// Empty form, one blank value per schema field.
    pub fn new() -> Self {
        Self {
            values: initial_values(),
            touched: HashSet::new(),
            errors: HashMap::new(),
        }
    }

    /// Form pre-filled for editing an existing contact.
    pub fn with_values(values: HashMap<String, String>) -> Self {
        let mut form = Self::new();
        form.values.extend(values);
        form
    }

    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    /// Error to display for a field. Untouched fields never show errors.
    pub fn error(&self, name: &str) -> Option<&str> {
        if !self.touched.contains(name) {
            return None;
        }
        self.errors.get(name).map(String::as_str)
    }

    /// Update a value. Fields the user has already left get re-validated as
    /// they type; untouched fields stay quiet.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if self.touched.contains(name) {
            self.apply_field_result(name, validate_field(name, &value));
        }
        self.values.insert(name.to_string(), value);
    }

    /// Mark a field as left (blur) and validate its current value.
    pub fn touch(&mut self, name: &str) {
        self.touched.insert(name.to_string());
        self.apply_field_result(name, validate_field(name, self.value(name)));
    }

    /// Validate every field and mark them all touched, as on submit. Returns
    /// whether the form may be submitted.
    pub fn validate_all(&mut self) -> bool {
        for field in field_schema() {
            self.touched.insert(field.name.to_string());
        }
        self.errors = validate_form(&self.values);
        is_valid(&self.errors)
    }

    pub fn is_valid(&self) -> bool {
        is_valid(&self.errors)
    }

    /// Request payload for the current values, for submitting the form.
    pub fn to_create_request(&self) -> CreateContactRequest {
        CreateContactRequest::from_values(&self.values)
    }

    /// Back to a blank form.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn apply_field_result(&mut self, name: &str, error: Option<String>) {
        match error {
            Some(message) => {
                self.errors.insert(name.to_string(), message);
            }
            None => {
                self.errors.remove(name);
            }
        }
    }
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_form_is_blank_and_quiet() {
        let form = FormState::new();
        for field in field_schema() {
            assert_eq!(form.value(field.name), "");
            assert_eq!(form.error(field.name), None);
        }
    }

    #[test]
    fn test_untouched_field_shows_no_error_while_typing() {
        let mut form = FormState::new();
        form.set_value("phone", "123");
        assert_eq!(form.error("phone"), None);
    }

    #[test]
    fn test_touch_validates_current_value() {
        let mut form = FormState::new();
        form.set_value("phone", "123");
        form.touch("phone");
        assert_eq!(form.error("phone"), Some("Phone must be exactly 10 digits"));

        // Typing after blur re-validates immediately.
        form.set_value("phone", "5551234567");
        assert_eq!(form.error("phone"), None);
    }

    #[test]
    fn test_validate_all_marks_everything_touched() {
        let mut form = FormState::new();
        form.set_value("firstName", "Ann");
        assert!(!form.validate_all());

        assert_eq!(form.error("firstName"), None);
        assert_eq!(form.error("lastName"), Some("Last Name is required"));
        assert_eq!(form.error("email"), Some("Email Address is required"));
    }

    #[test]
    fn test_valid_form_submits() {
        let mut form = FormState::new();
        form.set_value("firstName", "Ann");
        form.set_value("lastName", "Lee");
        form.set_value("phone", "5551234567");
        form.set_value("email", "ann@x.com");

        assert!(form.validate_all());
        assert!(form.is_valid());
    }

    #[test]
    fn test_to_create_request_carries_form_values() {
        let mut form = FormState::new();
        form.set_value("firstName", "Ann");
        form.set_value("lastName", "Lee");
        form.set_value("phone", "5551234567");
        form.set_value("email", "ann@x.com");
        assert!(form.validate_all());

        let request = form.to_create_request();
        assert_eq!(request.first_name, "Ann");
        assert_eq!(request.last_name, "Lee");
        assert_eq!(request.phone, "5551234567");
        assert_eq!(request.email, "ann@x.com");
    }

    #[test]
    fn test_reset_discards_values_and_errors() {
        let mut form = FormState::new();
        form.set_value("firstName", "A");
        form.touch("firstName");
        assert!(form.error("firstName").is_some());

        form.reset();
        assert_eq!(form.value("firstName"), "");
        assert_eq!(form.error("firstName"), None);
    }

    #[test]
    fn test_with_values_prefills_for_editing() {
        let mut values = HashMap::new();
        values.insert("firstName".to_string(), "Ann".to_string());
        let form = FormState::with_values(values);
        assert_eq!(form.value("firstName"), "Ann");
        assert_eq!(form.value("lastName"), "");
    }
}
