//! In-memory mirror of the server's contact list plus the CRUD calls that
//! keep it synchronized.

use shared_types::{Contact, CreateContactRequest, UpdateContactRequest};

use crate::api::{ApiClient, ApiError};

/// Owns the cached contact list and per-operation `loading`/`error` status.
/// On any failure the cached list is left exactly as it was; the server
/// remains the source of truth.
pub struct ContactListController {
    api: ApiClient,
    contacts: Vec<Contact>,
    loading: bool,
    error: Option<String>,
}

impl ContactListController {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            contacts: Vec::new(),
            loading: false,
            error: None,
        }
    }

    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn fail(&mut self, error: ApiError, fallback: &str) -> String {
        let message = error.display_message(fallback);
        self.error = Some(message.clone());
        message
    }

    /// Replace the cached list with the server's.
    pub async fn refresh(&mut self) -> Result<(), String> {
        self.begin();
        let result = self.api.list_contacts().await;
        self.loading = false;

        match result {
            Ok(contacts) => {
                self.contacts = contacts;
                Ok(())
            }
            Err(e) => Err(self.fail(e, "Failed to fetch contacts")),
        }
    }

    /// Create a contact and prepend it locally, matching the server's
    /// newest-first ordering.
    pub async fn add(&mut self, request: &CreateContactRequest) -> Result<Contact, String> {
        self.begin();
        let result = self.api.create_contact(request).await;
        self.loading = false;

        match result {
            Ok(contact) => {
                self.contacts.insert(0, contact.clone());
                Ok(contact)
            }
            Err(e) => Err(self.fail(e, "Failed to add contact")),
        }
    }

    /// Update a contact and replace the matching cached entry in place.
    pub async fn edit(
        &mut self,
        id: &str,
        request: &UpdateContactRequest,
    ) -> Result<Contact, String> {
        self.begin();
        let result = self.api.update_contact(id, request).await;
        self.loading = false;

        match result {
            Ok(contact) => {
                if let Some(entry) = self.contacts.iter_mut().find(|c| c.id == id) {
                    *entry = contact.clone();
                }
                Ok(contact)
            }
            Err(e) => Err(self.fail(e, "Failed to update contact")),
        }
    }

    /// Delete a contact and splice it out of the cached list.
    pub async fn remove(&mut self, id: &str) -> Result<(), String> {
        self.begin();
        let result = self.api.delete_contact(id).await;
        self.loading = false;

        match result {
            Ok(_) => {
                self.contacts.retain(|c| c.id != id);
                Ok(())
            }
            Err(e) => Err(self.fail(e, "Failed to delete contact")),
        }
    }
}
