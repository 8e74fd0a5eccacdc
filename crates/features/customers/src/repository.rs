//! SurrealDB access for customers and their addresses.
//!
//! Cross-table references are stored as prefixed string IDs
//! (e.g. `customer:abc`), so reads never need record-link traversal.

use crate::error::CustomersError;
use crate::models::{
    AddressRecord, AddressResponse, AddressSeed, CreateCustomerRequest, CustomerDetailResponse,
    CustomerRecord, CustomerResponse, NewAddress, UpdateCustomerRequest,
};
use chrono::Utc;
use ihub_database::Database;
use ihub_kernel::prelude::ResourceGuard;
use ihub_kernel::safe_nanoid;

const TABLE: &str = "customer";

/// Creates a customer together with its initial addresses in one transaction.
///
/// # Errors
/// Returns a validation error for an invalid payload (including an empty
/// address list) or a database error if the transaction fails.
pub async fn create_customer(
    db: &Database,
    request: CreateCustomerRequest,
) -> Result<CustomerDetailResponse, CustomersError> {
    request.validate()?;

    let key = safe_nanoid!();
    let id = format!("{TABLE}:{key}");
    let now = Utc::now().to_rfc3339();
    let seeds: Vec<AddressSeed> = request
        .addresses
        .into_iter()
        .map(|address| AddressSeed {
            key: safe_nanoid!(),
            street: address.street,
            city: address.city,
            postal_code: address.postal_code,
            label: address.label,
        })
        .collect();

    db.query(
        "BEGIN TRANSACTION;
         CREATE type::record('customer', $key) CONTENT {
             name: $name, email: $email, phone: $phone, note: $note,
             created_at: $now, updated_at: $now
         };
         FOR $seed IN $seeds {
             CREATE type::record('address', $seed.key) CONTENT {
                 customer: $customer, street: $seed.street, city: $seed.city,
                 postal_code: $seed.postal_code, label: $seed.label
             };
         };
         COMMIT TRANSACTION;",
    )
    .bind(("key", key))
    .bind(("name", request.name))
    .bind(("email", request.email))
    .bind(("phone", request.phone))
    .bind(("note", request.note))
    .bind(("now", now))
    .bind(("customer", id.clone()))
    .bind(("seeds", seeds))
    .await?
    .check()?;

    get_customer(db, &id).await
}

/// Lists customers ordered by name.
///
/// # Errors
/// Returns a database error if the query fails.
pub async fn list_customers(
    db: &Database,
    limit: usize,
    start: usize,
) -> Result<Vec<CustomerResponse>, CustomersError> {
    let records: Vec<CustomerRecord> = db
        .query(
            "SELECT *, type::string(id) AS id FROM customer \
             ORDER BY name LIMIT $limit START $start;",
        )
        .bind(("limit", limit))
        .bind(("start", start))
        .await?
        .take(0)?;

    Ok(records.into_iter().map(Into::into).collect())
}

/// Fetches one customer with its addresses.
///
/// # Errors
/// Returns `CustomerNotFound` if the record does not exist.
pub async fn get_customer(
    db: &Database,
    id: &str,
) -> Result<CustomerDetailResponse, CustomersError> {
    let id = ResourceGuard::verify(id, TABLE)?;
    let key = ResourceGuard::key(&id).to_owned();

    let mut response = db
        .query("SELECT *, type::string(id) AS id FROM type::record('customer', $key);")
        .query(
            "SELECT *, type::string(id) AS id FROM address \
             WHERE customer = $id ORDER BY street;",
        )
        .bind(("key", key))
        .bind(("id", id.clone()))
        .await?;

    let customer: Option<CustomerRecord> = response.take(0)?;
    let customer = customer.ok_or(CustomersError::CustomerNotFound(id))?;
    let addresses: Vec<AddressRecord> = response.take(1)?;

    Ok(CustomerDetailResponse::from_parts(customer, addresses))
}

/// Replaces the customer contact fields.
///
/// # Errors
/// Returns `CustomerNotFound` if the record does not exist, or a validation
/// error for an invalid payload.
pub async fn update_customer(
    db: &Database,
    id: &str,
    request: UpdateCustomerRequest,
) -> Result<CustomerDetailResponse, CustomersError> {
    request.validate()?;

    let id = ResourceGuard::verify(id, TABLE)?;
    require_customer(db, &id).await?;

    let key = ResourceGuard::key(&id).to_owned();
    db.query(
        "UPDATE type::record('customer', $key) MERGE {
             name: $name, email: $email, phone: $phone, note: $note, updated_at: $now
         } RETURN NONE;",
    )
    .bind(("key", key))
    .bind(("name", request.name))
    .bind(("email", request.email))
    .bind(("phone", request.phone))
    .bind(("note", request.note))
    .bind(("now", Utc::now().to_rfc3339()))
    .await?
    .check()?;

    get_customer(db, &id).await
}

/// Deletes a customer and all of its addresses.
///
/// # Errors
/// Returns `Conflict` while contracts still reference the customer.
pub async fn delete_customer(db: &Database, id: &str) -> Result<(), CustomersError> {
    let id = ResourceGuard::verify(id, TABLE)?;
    require_customer(db, &id).await?;

    let references: Vec<String> = db
        .query("SELECT VALUE type::string(id) FROM contract WHERE customer = $id LIMIT 1;")
        .bind(("id", id.clone()))
        .await?
        .take(0)?;
    if !references.is_empty() {
        return Err(CustomersError::Conflict(format!(
            "Customer {id} is referenced by a contract"
        )));
    }

    let key = ResourceGuard::key(&id).to_owned();
    db.query(
        "BEGIN TRANSACTION;
         DELETE address WHERE customer = $id;
         DELETE type::record('customer', $key);
         COMMIT TRANSACTION;",
    )
    .bind(("id", id))
    .bind(("key", key))
    .await?
    .check()?;

    Ok(())
}

/// Adds an address to an existing customer.
///
/// # Errors
/// Returns `CustomerNotFound` if the owner does not exist.
pub async fn add_address(
    db: &Database,
    customer_id: &str,
    address: NewAddress,
) -> Result<AddressResponse, CustomersError> {
    address.validate()?;

    let customer_id = ResourceGuard::verify(customer_id, TABLE)?;
    require_customer(db, &customer_id).await?;

    let key = safe_nanoid!();
    let record: Option<AddressRecord> = db
        .query(
            "CREATE type::record('address', $key) CONTENT {
                 customer: $customer, street: $street, city: $city,
                 postal_code: $postal_code, label: $label
             } RETURN NONE;",
        )
        .query("SELECT *, type::string(id) AS id FROM type::record('address', $key);")
        .bind(("key", key))
        .bind(("customer", customer_id))
        .bind(("street", address.street))
        .bind(("city", address.city))
        .bind(("postal_code", address.postal_code))
        .bind(("label", address.label))
        .await?
        .take(1)?;

    record
        .map(Into::into)
        .ok_or_else(|| CustomersError::Validation("Address row was not created".into()))
}

/// Removes one address from a customer.
///
/// # Errors
/// Returns `Conflict` when the address is the customer's last one, and
/// `AddressNotFound` when it does not belong to the customer.
pub async fn remove_address(
    db: &Database,
    customer_id: &str,
    address_id: &str,
) -> Result<(), CustomersError> {
    let customer_id = ResourceGuard::verify(customer_id, TABLE)?;
    require_customer(db, &customer_id).await?;
    let address_id = ResourceGuard::verify(address_id, "address")?;

    let owned: Vec<String> = db
        .query("SELECT VALUE type::string(id) FROM address WHERE customer = $customer;")
        .bind(("customer", customer_id))
        .await?
        .take(0)?;

    if !owned.contains(&address_id) {
        return Err(CustomersError::AddressNotFound(address_id));
    }
    if owned.len() == 1 {
        return Err(CustomersError::Conflict(
            "The last address of a customer cannot be removed".into(),
        ));
    }

    let key = ResourceGuard::key(&address_id).to_owned();
    db.query("DELETE type::record('address', $key);").bind(("key", key)).await?.check()?;

    Ok(())
}

async fn require_customer(db: &Database, id: &str) -> Result<(), CustomersError> {
    let key = ResourceGuard::key(id).to_owned();
    let found: Option<String> = db
        .query("SELECT VALUE type::string(id) FROM type::record('customer', $key);")
        .bind(("key", key))
        .await?
        .take(0)?;

    found.map(|_| ()).ok_or_else(|| CustomersError::CustomerNotFound(id.to_owned()))
}
