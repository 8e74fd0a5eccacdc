//! SurrealDB access for work orders.
//!
//! Entries live inside the work order record and are appended with a single
//! `UPDATE ... SET entries += $entry`, so a result can never be orphaned.

use crate::error::WorkOrdersError;
use crate::models::{
    CreateWorkOrderRequest, EntryDoc, EntryRequest, UpdateWorkOrderRequest, WorkOrderRecord,
    WorkOrderResponse, WorkOrderStatus, parse_status, validate_scheduled_date,
};
use chrono::Utc;
use ihub_database::Database;
use ihub_kernel::prelude::ResourceGuard;
use ihub_kernel::safe_nanoid;

const TABLE: &str = "work_order";

/// Creates a work order in `scheduled` status.
///
/// The referenced contract must exist and be `active`, and at least one
/// existing inspector (user) must be assigned.
///
/// # Errors
/// Returns `Conflict` for a non-active contract and `MissingReference` for
/// unknown inspectors.
pub async fn create_work_order(
    db: &Database,
    request: CreateWorkOrderRequest,
) -> Result<WorkOrderResponse, WorkOrdersError> {
    validate_scheduled_date(&request.scheduled_date)?;
    let contract = ResourceGuard::verify(&request.contract, "contract")?;
    let inspectors = verify_inspectors(db, request.inspectors).await?;

    let contract_status: Option<String> = db
        .query("SELECT VALUE status FROM type::record('contract', $key);")
        .bind(("key", ResourceGuard::key(&contract).to_owned()))
        .await?
        .take(0)?;
    match contract_status {
        None => return Err(WorkOrdersError::MissingReference(contract)),
        Some(status) if status != "active" => {
            return Err(WorkOrdersError::Conflict(format!(
                "Work orders require an active contract, {contract} is '{status}'"
            )));
        }
        Some(_) => {}
    }

    let key = safe_nanoid!();
    let id = format!("{TABLE}:{key}");
    let now = Utc::now().to_rfc3339();

    db.query(
        "CREATE type::record('work_order', $key) CONTENT {
             contract: $contract, scheduled_date: $scheduled_date,
             inspectors: $inspectors, status: $status, entries: [],
             created_at: $now, updated_at: $now
         } RETURN NONE;",
    )
    .bind(("key", key))
    .bind(("contract", contract))
    .bind(("scheduled_date", request.scheduled_date))
    .bind(("inspectors", inspectors))
    .bind(("status", WorkOrderStatus::Scheduled.to_string()))
    .bind(("now", now))
    .await?
    .check()?;

    get_work_order(db, &id).await
}

/// Lists work orders, optionally filtered by status, inspector, and scheduled
/// date, soonest first.
///
/// # Errors
/// Returns a database error if the query fails.
pub async fn list_work_orders(
    db: &Database,
    limit: usize,
    start: usize,
    status: Option<WorkOrderStatus>,
    inspector: Option<String>,
    date: Option<String>,
) -> Result<Vec<WorkOrderResponse>, WorkOrdersError> {
    let inspector = match inspector {
        Some(raw) => Some(ResourceGuard::verify(raw, "user")?),
        None => None,
    };
    if let Some(raw) = &date {
        validate_scheduled_date(raw)?;
    }

    let records: Vec<WorkOrderRecord> = db
        .query(
            "SELECT *, type::string(id) AS id FROM work_order \
             WHERE ($status IS NONE OR status = $status) \
               AND ($inspector IS NONE OR $inspector IN inspectors) \
               AND ($date IS NONE OR scheduled_date = $date) \
             ORDER BY scheduled_date ASC LIMIT $limit START $start;",
        )
        .bind(("status", status.map(|s| s.to_string())))
        .bind(("inspector", inspector))
        .bind(("date", date))
        .bind(("limit", limit))
        .bind(("start", start))
        .await?
        .take(0)?;

    records.into_iter().map(TryInto::try_into).collect()
}

/// Fetches one work order with its entries.
///
/// # Errors
/// Returns `NotFound` if the record does not exist.
pub async fn get_work_order(db: &Database, id: &str) -> Result<WorkOrderResponse, WorkOrdersError> {
    let id = ResourceGuard::verify(id, TABLE)?;
    fetch_record(db, &id).await?.try_into()
}

/// Reschedules a work order or changes the inspector assignment.
///
/// # Errors
/// Returns `Conflict` once the work order reached a terminal status.
pub async fn update_work_order(
    db: &Database,
    id: &str,
    request: UpdateWorkOrderRequest,
) -> Result<WorkOrderResponse, WorkOrdersError> {
    validate_scheduled_date(&request.scheduled_date)?;

    let id = ResourceGuard::verify(id, TABLE)?;
    let current = fetch_record(db, &id).await?;
    if parse_status(&current.status)?.is_terminal() {
        return Err(WorkOrdersError::Conflict(format!(
            "Work order in status '{}' can no longer be edited",
            current.status
        )));
    }
    let inspectors = verify_inspectors(db, request.inspectors).await?;

    let key = ResourceGuard::key(&id).to_owned();
    db.query(
        "UPDATE type::record('work_order', $key) MERGE {
             scheduled_date: $scheduled_date, inspectors: $inspectors, updated_at: $now
         } RETURN NONE;",
    )
    .bind(("key", key))
    .bind(("scheduled_date", request.scheduled_date))
    .bind(("inspectors", inspectors))
    .bind(("now", Utc::now().to_rfc3339()))
    .await?
    .check()?;

    get_work_order(db, &id).await
}

/// Appends a task result to a work order.
///
/// # Errors
/// Returns `Conflict` unless the work order is `in_progress`.
pub async fn add_entry(
    db: &Database,
    id: &str,
    request: EntryRequest,
) -> Result<WorkOrderResponse, WorkOrdersError> {
    if request.location.trim().is_empty() || request.task.trim().is_empty() {
        return Err(WorkOrdersError::Validation(
            "Entry location and task must not be empty".into(),
        ));
    }

    let id = ResourceGuard::verify(id, TABLE)?;
    let current = fetch_record(db, &id).await?;
    let status = parse_status(&current.status)?;
    if status != WorkOrderStatus::InProgress {
        return Err(WorkOrdersError::Conflict(format!(
            "Entries can only be recorded while in progress, work order is '{status}'"
        )));
    }

    let entry = EntryDoc {
        location: request.location,
        task: request.task,
        result: request.result.to_string(),
        note: request.note,
        recorded_at: Utc::now().to_rfc3339(),
    };

    let key = ResourceGuard::key(&id).to_owned();
    db.query(
        "UPDATE type::record('work_order', $key) \
         SET entries += $entry, updated_at = $now RETURN NONE;",
    )
    .bind(("key", key))
    .bind(("entry", entry))
    .bind(("now", Utc::now().to_rfc3339()))
    .await?
    .check()?;

    get_work_order(db, &id).await
}

/// Applies a status transition, validated against the lifecycle graph.
///
/// Completing additionally requires at least one recorded entry.
///
/// # Errors
/// Returns `InvalidTransition` or `Conflict`; the stored status stays
/// unchanged on rejection.
pub async fn transition_work_order(
    db: &Database,
    id: &str,
    next: WorkOrderStatus,
) -> Result<WorkOrderResponse, WorkOrdersError> {
    let id = ResourceGuard::verify(id, TABLE)?;
    let current = fetch_record(db, &id).await?;
    let status = parse_status(&current.status)?;

    if !status.can_transition(next) {
        return Err(WorkOrdersError::InvalidTransition {
            from: status.to_string(),
            to: next.to_string(),
        });
    }
    if next == WorkOrderStatus::Completed && current.entries.is_empty() {
        return Err(WorkOrdersError::Conflict(
            "A work order needs at least one recorded entry before completion".into(),
        ));
    }

    let key = ResourceGuard::key(&id).to_owned();
    db.query(
        "UPDATE type::record('work_order', $key) MERGE { status: $status, updated_at: $now } \
         RETURN NONE;",
    )
    .bind(("key", key))
    .bind(("status", next.to_string()))
    .bind(("now", Utc::now().to_rfc3339()))
    .await?
    .check()?;

    get_work_order(db, &id).await
}

/// Deletes a work order.
///
/// # Errors
/// Returns `Conflict` while a report still references the work order.
pub async fn delete_work_order(db: &Database, id: &str) -> Result<(), WorkOrdersError> {
    let id = ResourceGuard::verify(id, TABLE)?;
    fetch_record(db, &id).await?;

    let references: Vec<String> = db
        .query("SELECT VALUE type::string(id) FROM report WHERE work_order = $id LIMIT 1;")
        .bind(("id", id.clone()))
        .await?
        .take(0)?;
    if !references.is_empty() {
        return Err(WorkOrdersError::Conflict(format!(
            "Work order {id} is referenced by a report"
        )));
    }

    let key = ResourceGuard::key(&id).to_owned();
    db.query("DELETE type::record('work_order', $key);").bind(("key", key)).await?.check()?;

    Ok(())
}

pub(crate) async fn fetch_record(
    db: &Database,
    id: &str,
) -> Result<WorkOrderRecord, WorkOrdersError> {
    let key = ResourceGuard::key(id).to_owned();
    let record: Option<WorkOrderRecord> = db
        .query("SELECT *, type::string(id) AS id FROM type::record('work_order', $key);")
        .bind(("key", key))
        .await?
        .take(0)?;

    record.ok_or_else(|| WorkOrdersError::NotFound(id.to_owned()))
}

async fn verify_inspectors(
    db: &Database,
    inspectors: Vec<String>,
) -> Result<Vec<String>, WorkOrdersError> {
    if inspectors.is_empty() {
        return Err(WorkOrdersError::Validation(
            "A work order requires at least one inspector".into(),
        ));
    }

    let mut verified = Vec::with_capacity(inspectors.len());
    for inspector in inspectors {
        let id = ResourceGuard::verify(&inspector, "user")?;
        let found: Option<String> = db
            .query("SELECT VALUE type::string(id) FROM type::record('user', $key);")
            .bind(("key", ResourceGuard::key(&id).to_owned()))
            .await?
            .take(0)?;
        if found.is_none() {
            return Err(WorkOrdersError::MissingReference(id));
        }
        verified.push(id);
    }

    Ok(verified)
}
