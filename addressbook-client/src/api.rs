use serde::de::DeserializeOwned;
use shared_types::{
    Contact, CreateContactRequest, FieldError, MessageResponse, UpdateContactRequest,
    ValidationErrorResponse,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Structured per-field messages from a 400 response.
    #[error("validation failed")]
    Validation(Vec<FieldError>),
    /// Server-supplied message (not found, internal errors).
    #[error("{0}")]
    Message(String),
    /// Network failure or unreadable response.
    #[error("{0}")]
    Transport(String),
}

impl ApiError {
    /// The string to show the user: the first field error if the server sent
    /// any, then the server message, then `fallback`.
    pub fn display_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Validation(errors) => errors
                .first()
                .map(|e| e.message.clone())
                .unwrap_or_else(|| fallback.to_string()),
            ApiError::Message(message) => message.clone(),
            ApiError::Transport(_) => fallback.to_string(),
        }
    }
}

/// Typed client for the contacts REST API. `base_url` includes the `/api`
/// prefix, e.g. `http://localhost:4000/api`.
pub struct ApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| ApiError::Transport(e.to_string()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        if let Ok(validation) = serde_json::from_slice::<ValidationErrorResponse>(&body) {
            return Err(ApiError::Validation(validation.errors));
        }
        if let Ok(generic) = serde_json::from_slice::<MessageResponse>(&body) {
            return Err(ApiError::Message(generic.message));
        }
        Err(ApiError::Message(format!(
            "Request failed with status {status}"
        )))
    }

    pub async fn list_contacts(&self) -> Result<Vec<Contact>, ApiError> {
        let response = self
            .client
            .get(format!("{}/contacts", self.base_url))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(response).await
    }

    pub async fn create_contact(
        &self,
        request: &CreateContactRequest,
    ) -> Result<Contact, ApiError> {
        let response = self
            .client
            .post(format!("{}/contacts", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(response).await
    }

    pub async fn update_contact(
        &self,
        id: &str,
        request: &UpdateContactRequest,
    ) -> Result<Contact, ApiError> {
        let response = self
            .client
            .put(format!("{}/contacts/{id}", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(response).await
    }

    pub async fn delete_contact(&self, id: &str) -> Result<MessageResponse, ApiError> {
        let response = self
            .client
            .delete(format!("{}/contacts/{id}", self.base_url))
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        Self::decode(response).await
    }
}
