//! SurrealDB access for contracts.

use crate::error::ContractsError;
use crate::models::{
    ContractRecord, ContractResponse, ContractStatus, CreateContractRequest,
    UpdateContractRequest, parse_status,
};
use chrono::Utc;
use ihub_database::Database;
use ihub_kernel::prelude::ResourceGuard;
use ihub_kernel::safe_nanoid;

const TABLE: &str = "contract";

/// Creates a contract in `draft` status after verifying that the referenced
/// customer, address, and checklist exist and belong together.
///
/// # Errors
/// Returns `MissingReference` when a referenced record does not exist.
pub async fn create_contract(
    db: &Database,
    request: CreateContractRequest,
) -> Result<ContractResponse, ContractsError> {
    if request.price < 0.0 {
        return Err(ContractsError::Validation("Price must not be negative".into()));
    }

    let customer = ResourceGuard::verify(&request.customer, "customer")?;
    let address = ResourceGuard::verify(&request.address, "address")?;
    let checklist = ResourceGuard::verify(&request.checklist, "checklist")?;
    verify_references(db, &customer, &address, &checklist).await?;

    let key = safe_nanoid!();
    let id = format!("{TABLE}:{key}");
    let now = Utc::now().to_rfc3339();

    db.query(
        "CREATE type::record('contract', $key) CONTENT {
             customer: $customer, address: $address, checklist: $checklist,
             status: $status, price: $price, notes: $notes,
             created_at: $now, updated_at: $now
         } RETURN NONE;",
    )
    .bind(("key", key))
    .bind(("customer", customer))
    .bind(("address", address))
    .bind(("checklist", checklist))
    .bind(("status", ContractStatus::Draft.to_string()))
    .bind(("price", request.price))
    .bind(("notes", request.notes))
    .bind(("now", now))
    .await?
    .check()?;

    get_contract(db, &id).await
}

/// Lists contracts, optionally filtered by status and customer, newest first.
///
/// # Errors
/// Returns a database error if the query fails.
pub async fn list_contracts(
    db: &Database,
    limit: usize,
    start: usize,
    status: Option<ContractStatus>,
    customer: Option<String>,
) -> Result<Vec<ContractResponse>, ContractsError> {
    let customer = match customer {
        Some(raw) => Some(ResourceGuard::verify(raw, "customer")?),
        None => None,
    };

    let records: Vec<ContractRecord> = db
        .query(
            "SELECT *, type::string(id) AS id FROM contract \
             WHERE ($status IS NONE OR status = $status) \
               AND ($customer IS NONE OR customer = $customer) \
             ORDER BY created_at DESC LIMIT $limit START $start;",
        )
        .bind(("status", status.map(|s| s.to_string())))
        .bind(("customer", customer))
        .bind(("limit", limit))
        .bind(("start", start))
        .await?
        .take(0)?;

    records.into_iter().map(TryInto::try_into).collect()
}

/// Fetches one contract.
///
/// # Errors
/// Returns `NotFound` if the record does not exist.
pub async fn get_contract(db: &Database, id: &str) -> Result<ContractResponse, ContractsError> {
    let id = ResourceGuard::verify(id, TABLE)?;
    fetch_record(db, &id).await?.try_into()
}

/// Updates the contract terms.
///
/// The referenced address and checklist may only change while the contract is
/// still in `draft`; price and notes are editable until the contract reaches
/// a terminal status.
///
/// # Errors
/// Returns `Conflict` for edits the current status does not allow.
pub async fn update_contract(
    db: &Database,
    id: &str,
    request: UpdateContractRequest,
) -> Result<ContractResponse, ContractsError> {
    if request.price < 0.0 {
        return Err(ContractsError::Validation("Price must not be negative".into()));
    }

    let id = ResourceGuard::verify(id, TABLE)?;
    let current = fetch_record(db, &id).await?;
    let status = parse_status(&current.status)?;

    if status.is_terminal() {
        return Err(ContractsError::Conflict(format!(
            "Contract in status '{status}' can no longer be edited"
        )));
    }

    let address = ResourceGuard::verify(&request.address, "address")?;
    let checklist = ResourceGuard::verify(&request.checklist, "checklist")?;
    if status != ContractStatus::Draft
        && (address != current.address || checklist != current.checklist)
    {
        return Err(ContractsError::Conflict(
            "Address and checklist can only change while the contract is a draft".into(),
        ));
    }
    verify_references(db, &current.customer, &address, &checklist).await?;

    let key = ResourceGuard::key(&id).to_owned();
    db.query(
        "UPDATE type::record('contract', $key) MERGE {
             address: $address, checklist: $checklist,
             price: $price, notes: $notes, updated_at: $now
         } RETURN NONE;",
    )
    .bind(("key", key))
    .bind(("address", address))
    .bind(("checklist", checklist))
    .bind(("price", request.price))
    .bind(("notes", request.notes))
    .bind(("now", Utc::now().to_rfc3339()))
    .await?
    .check()?;

    get_contract(db, &id).await
}

/// Applies a status transition, validated against the lifecycle graph.
///
/// # Errors
/// Returns `InvalidTransition` when the move is outside the graph; the stored
/// status stays unchanged.
pub async fn transition_contract(
    db: &Database,
    id: &str,
    next: ContractStatus,
) -> Result<ContractResponse, ContractsError> {
    let id = ResourceGuard::verify(id, TABLE)?;
    let current = fetch_record(db, &id).await?;
    let status = parse_status(&current.status)?;

    if !status.can_transition(next) {
        return Err(ContractsError::InvalidTransition {
            from: status.to_string(),
            to: next.to_string(),
        });
    }

    let key = ResourceGuard::key(&id).to_owned();
    db.query(
        "UPDATE type::record('contract', $key) MERGE { status: $status, updated_at: $now } \
         RETURN NONE;",
    )
    .bind(("key", key))
    .bind(("status", next.to_string()))
    .bind(("now", Utc::now().to_rfc3339()))
    .await?
    .check()?;

    get_contract(db, &id).await
}

/// Deletes a contract.
///
/// # Errors
/// Returns `Conflict` while work orders still reference the contract.
pub async fn delete_contract(db: &Database, id: &str) -> Result<(), ContractsError> {
    let id = ResourceGuard::verify(id, TABLE)?;
    fetch_record(db, &id).await?;

    let references: Vec<String> = db
        .query("SELECT VALUE type::string(id) FROM work_order WHERE contract = $id LIMIT 1;")
        .bind(("id", id.clone()))
        .await?
        .take(0)?;
    if !references.is_empty() {
        return Err(ContractsError::Conflict(format!(
            "Contract {id} is referenced by a work order"
        )));
    }

    let key = ResourceGuard::key(&id).to_owned();
    db.query("DELETE type::record('contract', $key);").bind(("key", key)).await?.check()?;

    Ok(())
}

pub(crate) async fn fetch_record(
    db: &Database,
    id: &str,
) -> Result<ContractRecord, ContractsError> {
    let key = ResourceGuard::key(id).to_owned();
    let record: Option<ContractRecord> = db
        .query("SELECT *, type::string(id) AS id FROM type::record('contract', $key);")
        .bind(("key", key))
        .await?
        .take(0)?;

    record.ok_or_else(|| ContractsError::NotFound(id.to_owned()))
}

async fn verify_references(
    db: &Database,
    customer: &str,
    address: &str,
    checklist: &str,
) -> Result<(), ContractsError> {
    let mut response = db
        .query("SELECT VALUE type::string(id) FROM type::record('customer', $customer_key);")
        .query(
            "SELECT VALUE customer FROM type::record('address', $address_key) \
             WHERE customer = $customer;",
        )
        .query("SELECT VALUE type::string(id) FROM type::record('checklist', $checklist_key);")
        .bind(("customer_key", ResourceGuard::key(customer).to_owned()))
        .bind(("address_key", ResourceGuard::key(address).to_owned()))
        .bind(("checklist_key", ResourceGuard::key(checklist).to_owned()))
        .bind(("customer", customer.to_owned()))
        .await?;

    let found_customer: Option<String> = response.take(0)?;
    if found_customer.is_none() {
        return Err(ContractsError::MissingReference(customer.to_owned()));
    }
    let found_address: Option<String> = response.take(1)?;
    if found_address.is_none() {
        return Err(ContractsError::MissingReference(format!(
            "{address} (must belong to {customer})"
        )));
    }
    let found_checklist: Option<String> = response.take(2)?;
    if found_checklist.is_none() {
        return Err(ContractsError::MissingReference(checklist.to_owned()));
    }

    Ok(())
}
