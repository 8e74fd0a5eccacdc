//! Mirror summary records and chat payloads.
//!
//! Summaries are the flattened rows stored under the mirror keys: record IDs
//! are replaced by display names so the chat engine never touches the
//! primary database.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerSummary {
    pub id: String,
    pub name: String,
    pub email: String,
    pub cities: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContractSummary {
    pub id: String,
    pub customer_name: String,
    pub status: String,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChecklistSummary {
    pub id: String,
    pub name: String,
    pub property_type: String,
    pub locations: usize,
    pub tasks: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderSummary {
    pub id: String,
    pub customer_name: String,
    pub scheduled_date: String,
    pub status: String,
    pub inspector_names: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub role: String,
}

/// Per-key mirror state for the status endpoint.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MirrorKeyStatus {
    pub key: String,
    pub present: bool,
    pub records: usize,
    /// RFC 3339 instant of the last write, when the key is present.
    pub stored_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MirrorStatusResponse {
    pub ttl_seconds: u64,
    pub keys: Vec<MirrorKeyStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub reply: String,
    /// Mirror keys the answer was drawn from.
    pub source_keys: Vec<String>,
}
