use actix_web::{web, HttpResponse, Result as ActixResult};
use shared_types::{
    field_errors, is_valid, validate_form, CreateContactRequest, FieldError, MessageResponse,
    UpdateContactRequest,
};
use std::sync::Arc;

use crate::database::contacts as contacts_db;
use crate::database::contacts::ContactDbError;
use crate::database::Database;

#[derive(Debug)]
enum ContactError {
    Validation(Vec<FieldError>),
    DuplicateEmail,
    NotFound,
    Internal(String),
}

impl std::fmt::Display for ContactError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactError::Validation(errors) => {
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                write!(f, "{}", messages.join("; "))
            }
            ContactError::DuplicateEmail => {
                write!(f, "A contact with this email already exists")
            }
            ContactError::NotFound => write!(f, "Contact not found"),
            ContactError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl actix_web::error::ResponseError for ContactError {
    fn error_response(&self) -> HttpResponse {
        match self {
            ContactError::Validation(errors) => {
                HttpResponse::BadRequest().json(serde_json::json!({ "errors": errors }))
            }
            ContactError::DuplicateEmail => HttpResponse::BadRequest().json(serde_json::json!({
                "errors": [{
                    "field": "email",
                    "message": "A contact with this email already exists"
                }]
            })),
            ContactError::NotFound => HttpResponse::NotFound().json(MessageResponse {
                message: "Contact not found".to_string(),
            }),
            ContactError::Internal(msg) => HttpResponse::InternalServerError()
                .json(MessageResponse {
                    message: msg.clone(),
                }),
        }
    }
}

impl From<ContactDbError> for ContactError {
    fn from(e: ContactDbError) -> Self {
        match e {
            ContactDbError::ValidationFailed(errors) => ContactError::Validation(errors),
            ContactDbError::DuplicateEmail => ContactError::DuplicateEmail,
            ContactDbError::NotFound => ContactError::NotFound,
            ContactDbError::DatabaseError(msg) => {
                tracing::error!("contact store error: {}", msg);
                ContactError::Internal(msg)
            }
        }
    }
}

pub async fn create_contact(
    db: web::Data<Arc<Database>>,
    request: web::Json<CreateContactRequest>,
) -> ActixResult<HttpResponse> {
    let req = request.into_inner();

    // Reject invalid payloads before the store is involved.
    let errors = validate_form(&req.values());
    if !is_valid(&errors) {
        return Err(ContactError::Validation(field_errors(&errors)).into());
    }

    let contact = contacts_db::insert_contact(db.async_connection.clone(), &req)
        .await
        .map_err(ContactError::from)?;

    Ok(HttpResponse::Created().json(contact))
}

pub async fn list_contacts(db: web::Data<Arc<Database>>) -> ActixResult<HttpResponse> {
    let contacts = contacts_db::list_contacts(db.async_connection.clone())
        .await
        .map_err(ContactError::from)?;

    Ok(HttpResponse::Ok().json(contacts))
}

pub async fn get_contact(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();

    let contact = contacts_db::get_contact(db.async_connection.clone(), &id)
        .await
        .map_err(ContactError::from)?;

    Ok(HttpResponse::Ok().json(contact))
}

pub async fn update_contact(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
    request: web::Json<UpdateContactRequest>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();
    let req = request.into_inner();

    let contact = contacts_db::update_contact(db.async_connection.clone(), &id, &req)
        .await
        .map_err(ContactError::from)?;

    Ok(HttpResponse::Ok().json(contact))
}

pub async fn delete_contact(
    db: web::Data<Arc<Database>>,
    path: web::Path<String>,
) -> ActixResult<HttpResponse> {
    let id = path.into_inner();

    contacts_db::delete_contact(db.async_connection.clone(), &id)
        .await
        .map_err(ContactError::from)?;

    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Contact deleted".to_string(),
    }))
}
