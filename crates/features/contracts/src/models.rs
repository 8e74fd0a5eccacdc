//! Contract records, API payloads, and the status lifecycle.

use crate::error::ContractsError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use surrealdb::types::SurrealValue;
use utoipa::{IntoParams, ToSchema};

/// Contract lifecycle.
///
/// Allowed transitions: draft → active → completed; draft and active may also
/// be cancelled. Completed and cancelled are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ContractStatus {
    Draft,
    Active,
    Completed,
    Cancelled,
}

impl ContractStatus {
    #[must_use]
    pub const fn can_transition(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Draft, Self::Active)
                | (Self::Active, Self::Completed)
                | (Self::Draft | Self::Active, Self::Cancelled)
        )
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

pub(crate) fn parse_status(raw: &str) -> Result<ContractStatus, ContractsError> {
    raw.parse()
        .map_err(|_| ContractsError::Validation(format!("Unknown contract status: {raw}")))
}

#[derive(Debug, Clone, SurrealValue)]
pub struct ContractRecord {
    pub id: String,
    pub customer: String,
    pub address: String,
    pub checklist: String,
    pub status: String,
    pub price: f64,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateContractRequest {
    pub customer: String,
    pub address: String,
    pub checklist: String,
    pub price: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateContractRequest {
    pub address: String,
    pub checklist: String,
    pub price: f64,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct ContractStatusRequest {
    pub status: ContractStatus,
}

/// Pagination plus the `status` and `customer` list filters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default, rename_all = "camelCase")]
pub struct ContractListParams {
    pub limit: Option<usize>,
    pub start: Option<usize>,
    pub status: Option<ContractStatus>,
    pub customer: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContractResponse {
    pub id: String,
    pub customer: String,
    pub address: String,
    pub checklist: String,
    pub status: ContractStatus,
    pub price: f64,
    pub notes: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<ContractRecord> for ContractResponse {
    type Error = ContractsError;

    fn try_from(record: ContractRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            customer: record.customer,
            address: record.address,
            checklist: record.checklist,
            status: parse_status(&record.status)?,
            price: record.price,
            notes: record.notes,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}
