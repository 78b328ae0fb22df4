use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::schema::field_schema;

/// A single address-book record. Wire format is camelCase JSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Contact {
    /// Field values keyed by schema field name, for re-validation on update.
    pub fn values(&self) -> HashMap<String, String> {
        let mut values = HashMap::new();
        values.insert("firstName".to_string(), self.first_name.clone());
        values.insert("lastName".to_string(), self.last_name.clone());
        values.insert("phone".to_string(), self.phone.clone());
        values.insert("email".to_string(), self.email.clone());
        values
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateContactRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub email: String,
}

impl CreateContactRequest {
    /// Build a request from form values keyed by schema field name.
    pub fn from_values(values: &HashMap<String, String>) -> Self {
        Self {
            first_name: values.get("firstName").cloned().unwrap_or_default(),
            last_name: values.get("lastName").cloned().unwrap_or_default(),
            phone: values.get("phone").cloned().unwrap_or_default(),
            email: values.get("email").cloned().unwrap_or_default(),
        }
    }

    /// Field values keyed by schema field name. Missing fields validate as
    /// empty strings.
    pub fn values(&self) -> HashMap<String, String> {
        let mut values = HashMap::new();
        values.insert("firstName".to_string(), self.first_name.clone());
        values.insert("lastName".to_string(), self.last_name.clone());
        values.insert("phone".to_string(), self.phone.clone());
        values.insert("email".to_string(), self.email.clone());
        debug_assert!(field_schema().iter().all(|f| values.contains_key(f.name)));
        values
    }
}

/// Partial update: fields left as `None` keep their prior value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateContactRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UpdateContactRequest {
    /// Merge this request over an existing contact's values.
    pub fn merged_values(&self, existing: &Contact) -> HashMap<String, String> {
        let mut values = existing.values();
        if let Some(first_name) = &self.first_name {
            values.insert("firstName".to_string(), first_name.clone());
        }
        if let Some(last_name) = &self.last_name {
            values.insert("lastName".to_string(), last_name.clone());
        }
        if let Some(phone) = &self.phone {
            values.insert("phone".to_string(), phone.clone());
        }
        if let Some(email) = &self.email {
            values.insert("email".to_string(), email.clone());
        }
        values
    }
}
