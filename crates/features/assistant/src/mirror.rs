//! The cache mirror: denormalized snapshots of select tables under fixed
//! keys, refreshed best-effort and serialized by a mutex.

use crate::error::AssistantError;
use crate::models::{
    ChecklistSummary, ContractSummary, CustomerSummary, MirrorKeyStatus, MirrorStatusResponse,
    UserSummary, WorkOrderSummary,
};
use fxhash::FxHashMap;
use ihub_cache::CacheStore;
use ihub_database::Database;
use ihub_domain::constants::{
    MIRROR_CHECKLISTS, MIRROR_CONTRACTS, MIRROR_CUSTOMERS, MIRROR_KEYS, MIRROR_USERS,
    MIRROR_WORK_ORDERS,
};
use ihub_domain::events::EntityKind;
use serde_json::Value;
use std::sync::Arc;
use surrealdb::types::SurrealValue;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// The mirror key affected by a mutation of the given entity family.
///
/// Reports are not mirrored.
#[must_use]
pub fn mirror_key_for(kind: EntityKind) -> Option<&'static str> {
    match kind {
        EntityKind::Customer => Some(MIRROR_CUSTOMERS),
        EntityKind::Contract => Some(MIRROR_CONTRACTS),
        EntityKind::Checklist => Some(MIRROR_CHECKLISTS),
        EntityKind::WorkOrder => Some(MIRROR_WORK_ORDERS),
        EntityKind::User => Some(MIRROR_USERS),
        EntityKind::Report => None,
    }
}

#[derive(Debug, SurrealValue)]
struct NameRow {
    id: String,
    name: String,
}

#[derive(Debug, SurrealValue)]
struct CustomerRow {
    id: String,
    name: String,
    email: String,
}

#[derive(Debug, SurrealValue)]
struct AddressRow {
    customer: String,
    city: String,
}

#[derive(Debug, SurrealValue)]
struct ContractRow {
    id: String,
    customer: String,
    status: String,
    price: f64,
}

#[derive(Debug, SurrealValue)]
struct TaskRow {
    name: String,
}

#[derive(Debug, SurrealValue)]
struct LocationRow {
    tasks: Vec<TaskRow>,
}

#[derive(Debug, SurrealValue)]
struct ChecklistRow {
    id: String,
    name: String,
    property_type: String,
    locations: Vec<LocationRow>,
}

#[derive(Debug, SurrealValue)]
struct WorkOrderRow {
    id: String,
    contract: String,
    scheduled_date: String,
    status: String,
    inspectors: Vec<String>,
}

#[derive(Debug, SurrealValue)]
struct ContractCustomerRow {
    id: String,
    customer: String,
}

#[derive(Debug, SurrealValue)]
struct UserRow {
    id: String,
    name: String,
    role: String,
}

/// Reads tables, flattens rows, and writes the mirror keys.
#[derive(Debug)]
pub struct MirrorService {
    db: Database,
    cache: CacheStore,
    refresh_lock: Mutex<()>,
}

impl MirrorService {
    #[must_use]
    pub fn new(db: Database, cache: CacheStore) -> Self {
        Self { db, cache, refresh_lock: Mutex::new(()) }
    }

    /// Refreshes every mirror key, skipping tables whose read fails.
    ///
    /// Concurrent refreshes are serialized; returns the number of keys that
    /// were rewritten.
    pub async fn refresh_all(&self) -> usize {
        let _guard = self.refresh_lock.lock().await;

        let mut refreshed = 0;
        for key in MIRROR_KEYS {
            match self.rewrite_key(key).await {
                Ok(records) => {
                    debug!(key, records, "Mirror key refreshed");
                    refreshed += 1;
                }
                Err(error) => warn!(%error, key, "Mirror refresh skipped key"),
            }
        }
        refreshed
    }

    /// Refreshes a single mirror key from the database.
    ///
    /// # Errors
    /// Returns `UnknownKey` for a key outside the fixed set, or the underlying
    /// read/serialization error.
    pub async fn refresh_key(&self, key: &str) -> Result<usize, AssistantError> {
        let _guard = self.refresh_lock.lock().await;
        self.rewrite_key(key).await
    }

    /// The cached value under `key`, if present and fresh.
    #[must_use]
    pub fn cached(&self, key: &str) -> Option<Arc<Value>> {
        self.cache.get(key)
    }

    /// Read-through access: a miss (expired TTL) triggers a single-key
    /// refresh from the database.
    ///
    /// # Errors
    /// Returns the refresh error when the key is absent and cannot be rebuilt.
    pub async fn get_or_refresh(&self, key: &str) -> Result<Arc<Value>, AssistantError> {
        if let Some(value) = self.cache.get(key) {
            return Ok(value);
        }

        self.refresh_key(key).await?;
        Ok(self.cache.get(key).unwrap_or_else(|| Arc::new(Value::Array(Vec::new()))))
    }

    /// Per-key presence and record counts.
    #[must_use]
    pub fn status(&self) -> MirrorStatusResponse {
        let keys = MIRROR_KEYS
            .iter()
            .map(|key| match self.cache.entry(key) {
                Some(entry) => MirrorKeyStatus {
                    key: (*key).to_owned(),
                    present: true,
                    records: entry.record_count(),
                    stored_at: Some(entry.stored_at.to_rfc3339()),
                },
                None => MirrorKeyStatus {
                    key: (*key).to_owned(),
                    present: false,
                    records: 0,
                    stored_at: None,
                },
            })
            .collect();

        MirrorStatusResponse { ttl_seconds: self.cache.ttl().as_secs(), keys }
    }

    async fn rewrite_key(&self, key: &str) -> Result<usize, AssistantError> {
        let value = match key {
            MIRROR_CUSTOMERS => serde_json::to_value(self.read_customers().await?)?,
            MIRROR_CONTRACTS => serde_json::to_value(self.read_contracts().await?)?,
            MIRROR_CHECKLISTS => serde_json::to_value(self.read_checklists().await?)?,
            MIRROR_WORK_ORDERS => serde_json::to_value(self.read_work_orders().await?)?,
            MIRROR_USERS => serde_json::to_value(self.read_users().await?)?,
            other => return Err(AssistantError::UnknownKey(other.to_owned())),
        };

        let records = value.as_array().map_or(0, Vec::len);
        self.cache.insert(key, value);
        Ok(records)
    }

    async fn read_customers(&self) -> Result<Vec<CustomerSummary>, AssistantError> {
        let mut response = self
            .db
            .query("SELECT type::string(id) AS id, name, email FROM customer ORDER BY name;")
            .query("SELECT customer, city FROM address;")
            .await?;
        let customers: Vec<CustomerRow> = response.take(0)?;
        let addresses: Vec<AddressRow> = response.take(1)?;

        let mut cities: FxHashMap<String, Vec<String>> = FxHashMap::default();
        for address in addresses {
            let entry = cities.entry(address.customer).or_default();
            if !entry.contains(&address.city) {
                entry.push(address.city);
            }
        }

        Ok(customers
            .into_iter()
            .map(|row| CustomerSummary {
                cities: cities.remove(&row.id).unwrap_or_default(),
                id: row.id,
                name: row.name,
                email: row.email,
            })
            .collect())
    }

    async fn read_contracts(&self) -> Result<Vec<ContractSummary>, AssistantError> {
        let mut response = self
            .db
            // No ordering: the chat replies only count and group statuses.
            .query("SELECT type::string(id) AS id, customer, status, price FROM contract;")
            .query("SELECT type::string(id) AS id, name FROM customer;")
            .await?;
        let contracts: Vec<ContractRow> = response.take(0)?;
        let names = name_map(response.take(1)?);

        Ok(contracts
            .into_iter()
            .map(|row| ContractSummary {
                customer_name: names.get(&row.customer).cloned().unwrap_or(row.customer),
                id: row.id,
                status: row.status,
                price: row.price,
            })
            .collect())
    }

    async fn read_checklists(&self) -> Result<Vec<ChecklistSummary>, AssistantError> {
        let checklists: Vec<ChecklistRow> = self
            .db
            .query(
                "SELECT type::string(id) AS id, name, property_type, locations \
                 FROM checklist ORDER BY name;",
            )
            .await?
            .take(0)?;

        Ok(checklists
            .into_iter()
            .map(|row| ChecklistSummary {
                id: row.id,
                name: row.name,
                property_type: row.property_type,
                locations: row.locations.len(),
                tasks: row.locations.iter().map(|location| location.tasks.len()).sum(),
            })
            .collect())
    }

    async fn read_work_orders(&self) -> Result<Vec<WorkOrderSummary>, AssistantError> {
        let mut response = self
            .db
            .query(
                "SELECT type::string(id) AS id, contract, scheduled_date, status, inspectors \
                 FROM work_order ORDER BY scheduled_date;",
            )
            .query("SELECT type::string(id) AS id, customer FROM contract;")
            .query("SELECT type::string(id) AS id, name FROM customer;")
            .query("SELECT type::string(id) AS id, name FROM user;")
            .await?;
        let orders: Vec<WorkOrderRow> = response.take(0)?;
        let contract_rows: Vec<ContractCustomerRow> = response.take(1)?;
        let customer_names = name_map(response.take(2)?);
        let user_names = name_map(response.take(3)?);

        let contract_customers: FxHashMap<String, String> =
            contract_rows.into_iter().map(|row| (row.id, row.customer)).collect();

        Ok(orders
            .into_iter()
            .map(|row| {
                let customer_name = contract_customers
                    .get(&row.contract)
                    .and_then(|customer| customer_names.get(customer))
                    .cloned()
                    .unwrap_or_else(|| row.contract.clone());
                WorkOrderSummary {
                    customer_name,
                    inspector_names: row
                        .inspectors
                        .iter()
                        .map(|user| user_names.get(user).cloned().unwrap_or_else(|| user.clone()))
                        .collect(),
                    id: row.id,
                    scheduled_date: row.scheduled_date,
                    status: row.status,
                }
            })
            .collect())
    }

    async fn read_users(&self) -> Result<Vec<UserSummary>, AssistantError> {
        let users: Vec<UserRow> = self
            .db
            .query("SELECT type::string(id) AS id, name, role FROM user ORDER BY name;")
            .await?
            .take(0)?;

        Ok(users
            .into_iter()
            .map(|row| UserSummary { id: row.id, name: row.name, role: row.role })
            .collect())
    }
}

fn name_map(rows: Vec<NameRow>) -> FxHashMap<String, String> {
    rows.into_iter().map(|row| (row.id, row.name)).collect()
}
