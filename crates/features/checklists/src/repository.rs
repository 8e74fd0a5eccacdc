//! SurrealDB access for checklist templates.
//!
//! The nested location/task document lives inside the checklist record, so a
//! create or update replaces it in a single statement.

use crate::error::ChecklistsError;
use crate::models::{ChecklistRecord, ChecklistRequest, ChecklistResponse, ChecklistSummary};
use chrono::Utc;
use ihub_database::Database;
use ihub_kernel::prelude::ResourceGuard;
use ihub_kernel::safe_nanoid;

const TABLE: &str = "checklist";

/// Creates a checklist with its full nested document.
///
/// # Errors
/// Returns a validation error for blank names or a database error.
pub async fn create_checklist(
    db: &Database,
    request: ChecklistRequest,
) -> Result<ChecklistResponse, ChecklistsError> {
    request.validate()?;

    let key = safe_nanoid!();
    let id = format!("{TABLE}:{key}");
    let now = Utc::now().to_rfc3339();

    db.query(
        "CREATE type::record('checklist', $key) CONTENT {
             name: $name, property_type: $property_type, locations: $locations,
             created_at: $now, updated_at: $now
         } RETURN NONE;",
    )
    .bind(("key", key))
    .bind(("name", request.name))
    .bind(("property_type", request.property_type))
    .bind(("locations", request.locations))
    .bind(("now", now))
    .await?
    .check()?;

    get_checklist(db, &id).await
}

/// Lists checklist summaries ordered by name.
///
/// # Errors
/// Returns a database error if the query fails.
pub async fn list_checklists(
    db: &Database,
    limit: usize,
    start: usize,
) -> Result<Vec<ChecklistSummary>, ChecklistsError> {
    let records: Vec<ChecklistRecord> = db
        .query(
            "SELECT *, type::string(id) AS id FROM checklist \
             ORDER BY name LIMIT $limit START $start;",
        )
        .bind(("limit", limit))
        .bind(("start", start))
        .await?
        .take(0)?;

    Ok(records.into_iter().map(Into::into).collect())
}

/// Fetches one checklist with its nested document ordered by position.
///
/// # Errors
/// Returns `NotFound` if the record does not exist.
pub async fn get_checklist(db: &Database, id: &str) -> Result<ChecklistResponse, ChecklistsError> {
    let id = ResourceGuard::verify(id, TABLE)?;
    let key = ResourceGuard::key(&id).to_owned();

    let record: Option<ChecklistRecord> = db
        .query("SELECT *, type::string(id) AS id FROM type::record('checklist', $key);")
        .bind(("key", key))
        .await?
        .take(0)?;

    record.map(Into::into).ok_or(ChecklistsError::NotFound(id))
}

/// Replaces the checklist fields and its whole nested document atomically.
///
/// # Errors
/// Returns `NotFound` if the record does not exist.
pub async fn update_checklist(
    db: &Database,
    id: &str,
    request: ChecklistRequest,
) -> Result<ChecklistResponse, ChecklistsError> {
    request.validate()?;

    let id = ResourceGuard::verify(id, TABLE)?;
    require_checklist(db, &id).await?;

    let key = ResourceGuard::key(&id).to_owned();
    db.query(
        "UPDATE type::record('checklist', $key) MERGE {
             name: $name, property_type: $property_type, locations: $locations,
             updated_at: $now
         } RETURN NONE;",
    )
    .bind(("key", key))
    .bind(("name", request.name))
    .bind(("property_type", request.property_type))
    .bind(("locations", request.locations))
    .bind(("now", Utc::now().to_rfc3339()))
    .await?
    .check()?;

    get_checklist(db, &id).await
}

/// Deletes a checklist.
///
/// # Errors
/// Returns `Conflict` while contracts still reference the checklist.
pub async fn delete_checklist(db: &Database, id: &str) -> Result<(), ChecklistsError> {
    let id = ResourceGuard::verify(id, TABLE)?;
    require_checklist(db, &id).await?;

    let references: Vec<String> = db
        .query("SELECT VALUE type::string(id) FROM contract WHERE checklist = $id LIMIT 1;")
        .bind(("id", id.clone()))
        .await?
        .take(0)?;
    if !references.is_empty() {
        return Err(ChecklistsError::Conflict(format!(
            "Checklist {id} is referenced by a contract"
        )));
    }

    let key = ResourceGuard::key(&id).to_owned();
    db.query("DELETE type::record('checklist', $key);").bind(("key", key)).await?.check()?;

    Ok(())
}

async fn require_checklist(db: &Database, id: &str) -> Result<(), ChecklistsError> {
    let key = ResourceGuard::key(id).to_owned();
    let found: Option<String> = db
        .query("SELECT VALUE type::string(id) FROM type::record('checklist', $key);")
        .bind(("key", key))
        .await?
        .take(0)?;

    found.map(|_| ()).ok_or_else(|| ChecklistsError::NotFound(id.to_owned()))
}
