use rusqlite::Row;
use shared_types::{
    field_errors, validate_form, Contact, CreateContactRequest, FieldError, UpdateContactRequest,
};

use crate::database::AsyncDbConnection;

#[derive(Debug)]
pub enum ContactDbError {
    ValidationFailed(Vec<FieldError>),
    DuplicateEmail,
    NotFound,
    DatabaseError(String),
}

impl std::fmt::Display for ContactDbError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContactDbError::ValidationFailed(errors) => {
                let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
                write!(f, "Validation failed: {}", messages.join("; "))
            }
            ContactDbError::DuplicateEmail => {
                write!(f, "A contact with this email already exists")
            }
            ContactDbError::NotFound => write!(f, "Contact not found"),
            ContactDbError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
        }
    }
}

impl std::error::Error for ContactDbError {}

impl From<rusqlite::Error> for ContactDbError {
    fn from(e: rusqlite::Error) -> Self {
        match e {
            rusqlite::Error::QueryReturnedNoRows => ContactDbError::NotFound,
            rusqlite::Error::SqliteFailure(err, _)
                if err.code == rusqlite::ErrorCode::ConstraintViolation =>
            {
                ContactDbError::DuplicateEmail
            }
            _ => ContactDbError::DatabaseError(e.to_string()),
        }
    }
}

fn map_contact(row: &Row<'_>) -> rusqlite::Result<Contact> {
    Ok(Contact {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        phone: row.get(3)?,
        email: row.get(4)?,
        created_at: row.get(5)?,
        updated_at: row.get(6)?,
    })
}

const CONTACT_COLUMNS: &str = "id, first_name, last_name, phone, email, created_at, updated_at";

/// Validate and insert a new contact. The store revalidates every request
/// against the field schema; it does not trust the caller.
pub async fn insert_contact(
    conn: AsyncDbConnection,
    request: &CreateContactRequest,
) -> Result<Contact, ContactDbError> {
    let errors = validate_form(&request.values());
    if !errors.is_empty() {
        return Err(ContactDbError::ValidationFailed(field_errors(&errors)));
    }

    let conn = conn.lock().await;

    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM contacts WHERE email = ?1",
        [&request.email],
        |row| row.get(0),
    )?;
    if count > 0 {
        return Err(ContactDbError::DuplicateEmail);
    }

    let now = chrono::Utc::now().timestamp_millis();
    // Name fields are stored trimmed.
    let contact = Contact {
        id: uuid::Uuid::new_v4().to_string(),
        first_name: request.first_name.trim().to_string(),
        last_name: request.last_name.trim().to_string(),
        phone: request.phone.clone(),
        email: request.email.clone(),
        created_at: now,
        updated_at: now,
    };

    conn.execute(
        "INSERT INTO contacts (id, first_name, last_name, phone, email, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        rusqlite::params![
            contact.id,
            contact.first_name,
            contact.last_name,
            contact.phone,
            contact.email,
            contact.created_at,
            contact.updated_at,
        ],
    )?;

    Ok(contact)
}

/// All contacts, most recently created first. The rowid tie-break keeps the
/// order stable when two rows share a millisecond.
pub async fn list_contacts(conn: AsyncDbConnection) -> Result<Vec<Contact>, ContactDbError> {
    let conn = conn.lock().await;

    let mut stmt = conn.prepare(&format!(
        "SELECT {CONTACT_COLUMNS} FROM contacts ORDER BY created_at DESC, rowid DESC"
    ))?;

    let rows = stmt.query_map([], map_contact)?;

    let mut contacts = Vec::new();
    for row in rows {
        contacts.push(row?);
    }

    Ok(contacts)
}

pub async fn get_contact(conn: AsyncDbConnection, id: &str) -> Result<Contact, ContactDbError> {
    let conn = conn.lock().await;

    let contact = conn.query_row(
        &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
        [id],
        map_contact,
    )?;

    Ok(contact)
}

/// Partial update with merge semantics: fields absent from the request keep
/// their prior values. The merged record is revalidated as a whole.
pub async fn update_contact(
    conn: AsyncDbConnection,
    id: &str,
    request: &UpdateContactRequest,
) -> Result<Contact, ContactDbError> {
    let conn = conn.lock().await;

    let existing = conn.query_row(
        &format!("SELECT {CONTACT_COLUMNS} FROM contacts WHERE id = ?1"),
        [id],
        map_contact,
    )?;

    let merged = request.merged_values(&existing);
    let errors = validate_form(&merged);
    if !errors.is_empty() {
        return Err(ContactDbError::ValidationFailed(field_errors(&errors)));
    }

    let email = &merged["email"];
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM contacts WHERE email = ?1 AND id != ?2",
        [email.as_str(), id],
        |row| row.get(0),
    )?;
    if count > 0 {
        return Err(ContactDbError::DuplicateEmail);
    }

    let updated = Contact {
        id: existing.id,
        first_name: merged["firstName"].trim().to_string(),
        last_name: merged["lastName"].trim().to_string(),
        phone: merged["phone"].clone(),
        email: email.clone(),
        created_at: existing.created_at,
        updated_at: chrono::Utc::now().timestamp_millis(),
    };

    conn.execute(
        "UPDATE contacts
         SET first_name = ?1, last_name = ?2, phone = ?3, email = ?4, updated_at = ?5
         WHERE id = ?6",
        rusqlite::params![
            updated.first_name,
            updated.last_name,
            updated.phone,
            updated.email,
            updated.updated_at,
            updated.id,
        ],
    )?;

    Ok(updated)
}

/// Hard delete. Fails with `NotFound` for an unknown id.
pub async fn delete_contact(conn: AsyncDbConnection, id: &str) -> Result<(), ContactDbError> {
    let conn = conn.lock().await;

    let rows_affected = conn.execute("DELETE FROM contacts WHERE id = ?1", [id])?;

    if rows_affected == 0 {
        return Err(ContactDbError::NotFound);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::Database;

    fn test_db() -> (tempfile::TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(&dir.path().join("contacts.db")).unwrap();
        (dir, db)
    }

    fn ann() -> CreateContactRequest {
        CreateContactRequest {
            first_name: "Ann".to_string(),
            last_name: "Lee".to_string(),
            phone: "5551234567".to_string(),
            email: "ann@x.com".to_string(),
        }
    }

    fn bob() -> CreateContactRequest {
        CreateContactRequest {
            first_name: "Bob".to_string(),
            last_name: "Ray".to_string(),
            phone: "5550000000".to_string(),
            email: "bob@x.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_then_list_round_trip() {
        let (_dir, db) = test_db();
        let conn = db.async_connection.clone();

        let created = insert_contact(conn.clone(), &ann()).await.unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.created_at, created.updated_at);

        let contacts = list_contacts(conn).await.unwrap();
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0], created);
    }

    #[tokio::test]
    async fn test_list_orders_newest_first() {
        let (_dir, db) = test_db();
        let conn = db.async_connection.clone();

        insert_contact(conn.clone(), &ann()).await.unwrap();
        insert_contact(conn.clone(), &bob()).await.unwrap();

        let contacts = list_contacts(conn).await.unwrap();
        assert_eq!(contacts.len(), 2);
        assert_eq!(contacts[0].email, "bob@x.com");
        assert_eq!(contacts[1].email, "ann@x.com");
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_fields_without_mutating() {
        let (_dir, db) = test_db();
        let conn = db.async_connection.clone();

        let mut request = ann();
        request.phone = "123".to_string();
        request.last_name = String::new();

        match insert_contact(conn.clone(), &request).await {
            Err(ContactDbError::ValidationFailed(errors)) => {
                assert_eq!(errors.len(), 2);
                assert_eq!(errors[0].field.as_deref(), Some("lastName"));
                assert_eq!(errors[1].field.as_deref(), Some("phone"));
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }

        assert!(list_contacts(conn).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_email() {
        let (_dir, db) = test_db();
        let conn = db.async_connection.clone();

        insert_contact(conn.clone(), &ann()).await.unwrap();

        let mut request = bob();
        request.email = "ann@x.com".to_string();
        match insert_contact(conn.clone(), &request).await {
            Err(ContactDbError::DuplicateEmail) => {}
            other => panic!("expected DuplicateEmail, got {other:?}"),
        }

        assert_eq!(list_contacts(conn).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_merges_missing_fields() {
        let (_dir, db) = test_db();
        let conn = db.async_connection.clone();

        let created = insert_contact(conn.clone(), &ann()).await.unwrap();
        let request = UpdateContactRequest {
            phone: Some("5559876543".to_string()),
            ..Default::default()
        };

        let updated = update_contact(conn.clone(), &created.id, &request)
            .await
            .unwrap();
        assert_eq!(updated.phone, "5559876543");
        assert_eq!(updated.first_name, "Ann");
        assert_eq!(updated.email, "ann@x.com");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at >= created.updated_at);

        let stored = get_contact(conn, &created.id).await.unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_update_rejects_email_owned_by_another_contact() {
        let (_dir, db) = test_db();
        let conn = db.async_connection.clone();

        insert_contact(conn.clone(), &ann()).await.unwrap();
        let target = insert_contact(conn.clone(), &bob()).await.unwrap();

        let request = UpdateContactRequest {
            email: Some("ann@x.com".to_string()),
            ..Default::default()
        };
        match update_contact(conn.clone(), &target.id, &request).await {
            Err(ContactDbError::DuplicateEmail) => {}
            other => panic!("expected DuplicateEmail, got {other:?}"),
        }

        let stored = get_contact(conn, &target.id).await.unwrap();
        assert_eq!(stored, target);
    }

    #[tokio::test]
    async fn test_update_keeping_own_email_is_allowed() {
        let (_dir, db) = test_db();
        let conn = db.async_connection.clone();

        let created = insert_contact(conn.clone(), &ann()).await.unwrap();
        let request = UpdateContactRequest {
            email: Some("ann@x.com".to_string()),
            first_name: Some("Anna".to_string()),
            ..Default::default()
        };

        let updated = update_contact(conn, &created.id, &request).await.unwrap();
        assert_eq!(updated.first_name, "Anna");
        assert_eq!(updated.email, "ann@x.com");
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_merged_record() {
        let (_dir, db) = test_db();
        let conn = db.async_connection.clone();

        let created = insert_contact(conn.clone(), &ann()).await.unwrap();
        let request = UpdateContactRequest {
            phone: Some("not-a-phone".to_string()),
            ..Default::default()
        };

        match update_contact(conn.clone(), &created.id, &request).await {
            Err(ContactDbError::ValidationFailed(errors)) => {
                assert_eq!(errors[0].message, "Phone must be exactly 10 digits");
            }
            other => panic!("expected ValidationFailed, got {other:?}"),
        }

        let stored = get_contact(conn, &created.id).await.unwrap();
        assert_eq!(stored.phone, "5551234567");
    }

    #[tokio::test]
    async fn test_delete_then_update_is_not_found() {
        let (_dir, db) = test_db();
        let conn = db.async_connection.clone();

        let created = insert_contact(conn.clone(), &ann()).await.unwrap();
        delete_contact(conn.clone(), &created.id).await.unwrap();

        let request = UpdateContactRequest {
            phone: Some("5559876543".to_string()),
            ..Default::default()
        };
        match update_contact(conn.clone(), &created.id, &request).await {
            Err(ContactDbError::NotFound) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }

        match delete_contact(conn, &created.id).await {
            Err(ContactDbError::NotFound) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_name_fields_are_stored_trimmed() {
        let (_dir, db) = test_db();
        let conn = db.async_connection.clone();

        let mut request = ann();
        request.first_name = "  Ann ".to_string();
        request.last_name = " Lee  ".to_string();

        let created = insert_contact(conn.clone(), &request).await.unwrap();
        assert_eq!(created.first_name, "Ann");
        assert_eq!(created.last_name, "Lee");

        let stored = get_contact(conn.clone(), &created.id).await.unwrap();
        assert_eq!(stored.first_name, "Ann");

        let request = UpdateContactRequest {
            first_name: Some("  Anna  ".to_string()),
            ..Default::default()
        };
        let updated = update_contact(conn, &created.id, &request).await.unwrap();
        assert_eq!(updated.first_name, "Anna");
        assert_eq!(updated.last_name, "Lee");
    }

    #[tokio::test]
    async fn test_full_lifecycle() {
        let (_dir, db) = test_db();
        let conn = db.async_connection.clone();

        let created = insert_contact(conn.clone(), &ann()).await.unwrap();
        assert_eq!(list_contacts(conn.clone()).await.unwrap().len(), 1);

        let request = UpdateContactRequest {
            phone: Some("5559876543".to_string()),
            ..Default::default()
        };
        let updated = update_contact(conn.clone(), &created.id, &request)
            .await
            .unwrap();
        assert_eq!(updated.phone, "5559876543");
        assert_eq!(updated.email, "ann@x.com");

        delete_contact(conn.clone(), &created.id).await.unwrap();
        assert!(list_contacts(conn).await.unwrap().is_empty());
    }
}
