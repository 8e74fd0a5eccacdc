//! SurrealDB access for user accounts.

use crate::error::IdentityError;
use crate::models::{
    CreateUserRequest, UpdateUserRequest, UserRecord, UserResponse, validate_password,
    validate_user,
};
use crate::password;
use chrono::Utc;
use ihub_database::Database;
use ihub_kernel::prelude::ResourceGuard;
use ihub_kernel::safe_nanoid;

const TABLE: &str = "user";

/// Creates a user with a freshly salted password digest.
///
/// # Errors
/// Returns `Conflict` when the email is already taken.
pub async fn create_user(
    db: &Database,
    request: CreateUserRequest,
) -> Result<UserResponse, IdentityError> {
    validate_user(&request.name, &request.email)?;
    validate_password(&request.password)?;
    require_free_email(db, &request.email, None).await?;

    let key = safe_nanoid!();
    let id = format!("{TABLE}:{key}");
    let now = Utc::now().to_rfc3339();
    let salt = password::new_salt();
    let digest = password::digest(&request.password, &salt);

    db.query(
        "CREATE type::record('user', $key) CONTENT {
             name: $name, email: $email, role: $role, salt: $salt, digest: $digest,
             created_at: $now, updated_at: $now
         } RETURN NONE;",
    )
    .bind(("key", key))
    .bind(("name", request.name))
    .bind(("email", request.email))
    .bind(("role", request.role.to_string()))
    .bind(("salt", salt))
    .bind(("digest", digest))
    .bind(("now", now))
    .await?
    .check()?;

    get_user(db, &id).await
}

/// Lists users ordered by name.
///
/// # Errors
/// Returns a database error if the query fails.
pub async fn list_users(
    db: &Database,
    limit: usize,
    start: usize,
) -> Result<Vec<UserResponse>, IdentityError> {
    let records: Vec<UserRecord> = db
        .query(
            "SELECT *, type::string(id) AS id FROM user \
             ORDER BY name LIMIT $limit START $start;",
        )
        .bind(("limit", limit))
        .bind(("start", start))
        .await?
        .take(0)?;

    records.into_iter().map(TryInto::try_into).collect()
}

/// Fetches one user.
///
/// # Errors
/// Returns `NotFound` if the record does not exist.
pub async fn get_user(db: &Database, id: &str) -> Result<UserResponse, IdentityError> {
    let id = ResourceGuard::verify(id, TABLE)?;
    fetch_record(db, &id).await?.try_into()
}

/// Updates a user, optionally replacing the password.
///
/// # Errors
/// Returns `Conflict` when the new email belongs to another user.
pub async fn update_user(
    db: &Database,
    id: &str,
    request: UpdateUserRequest,
) -> Result<UserResponse, IdentityError> {
    validate_user(&request.name, &request.email)?;

    let id = ResourceGuard::verify(id, TABLE)?;
    let current = fetch_record(db, &id).await?;
    require_free_email(db, &request.email, Some(&id)).await?;

    let (salt, digest) = match request.password {
        Some(new_password) => {
            validate_password(&new_password)?;
            let salt = password::new_salt();
            let digest = password::digest(&new_password, &salt);
            (salt, digest)
        }
        None => (current.salt, current.digest),
    };

    let key = ResourceGuard::key(&id).to_owned();
    db.query(
        "UPDATE type::record('user', $key) MERGE {
             name: $name, email: $email, role: $role, salt: $salt, digest: $digest,
             updated_at: $now
         } RETURN NONE;",
    )
    .bind(("key", key))
    .bind(("name", request.name))
    .bind(("email", request.email))
    .bind(("role", request.role.to_string()))
    .bind(("salt", salt))
    .bind(("digest", digest))
    .bind(("now", Utc::now().to_rfc3339()))
    .await?
    .check()?;

    get_user(db, &id).await
}

/// Deletes a user.
///
/// # Errors
/// Returns `Conflict` while work orders still assign the user as inspector.
pub async fn delete_user(db: &Database, id: &str) -> Result<(), IdentityError> {
    let id = ResourceGuard::verify(id, TABLE)?;
    fetch_record(db, &id).await?;

    let references: Vec<String> = db
        .query("SELECT VALUE type::string(id) FROM work_order WHERE $id IN inspectors LIMIT 1;")
        .bind(("id", id.clone()))
        .await?
        .take(0)?;
    if !references.is_empty() {
        return Err(IdentityError::Conflict(format!(
            "User {id} is still assigned to a work order"
        )));
    }

    let key = ResourceGuard::key(&id).to_owned();
    db.query("DELETE type::record('user', $key);").bind(("key", key)).await?.check()?;

    Ok(())
}

/// Checks credentials and returns the matching user.
///
/// # Errors
/// Returns `Unauthorized` for an unknown email or a wrong password; the two
/// cases are indistinguishable to the caller.
pub async fn authenticate(
    db: &Database,
    email: &str,
    provided_password: &str,
) -> Result<UserResponse, IdentityError> {
    let record: Option<UserRecord> = db
        .query("SELECT *, type::string(id) AS id FROM user WHERE email = $email;")
        .bind(("email", email.to_owned()))
        .await?
        .take(0)?;

    let record =
        record.ok_or_else(|| IdentityError::Unauthorized("Invalid credentials".into()))?;

    if !password::verify(provided_password, &record.salt, &record.digest) {
        return Err(IdentityError::Unauthorized("Invalid credentials".into()));
    }

    record.try_into()
}

async fn fetch_record(db: &Database, id: &str) -> Result<UserRecord, IdentityError> {
    let key = ResourceGuard::key(id).to_owned();
    let record: Option<UserRecord> = db
        .query("SELECT *, type::string(id) AS id FROM type::record('user', $key);")
        .bind(("key", key))
        .await?
        .take(0)?;

    record.ok_or_else(|| IdentityError::NotFound(id.to_owned()))
}

async fn require_free_email(
    db: &Database,
    email: &str,
    except: Option<&str>,
) -> Result<(), IdentityError> {
    let holder: Option<String> = db
        .query("SELECT VALUE type::string(id) FROM user WHERE email = $email;")
        .bind(("email", email.to_owned()))
        .await?
        .take(0)?;

    match holder {
        Some(id) if Some(id.as_str()) != except => {
            Err(IdentityError::Conflict(format!("Email {email} is already in use")))
        }
        _ => Ok(()),
    }
}
