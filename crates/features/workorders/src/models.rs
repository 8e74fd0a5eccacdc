//! Work order records, entries, and the status lifecycle.

use crate::error::WorkOrdersError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use surrealdb::types::SurrealValue;
use utoipa::{IntoParams, ToSchema};

/// Work order lifecycle.
///
/// Allowed transitions: scheduled → in_progress → completed; scheduled and
/// in_progress may also be cancelled. Completed and cancelled are terminal.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WorkOrderStatus {
    Scheduled,
    InProgress,
    Completed,
    Cancelled,
}

impl WorkOrderStatus {
    #[must_use]
    pub const fn can_transition(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Scheduled, Self::InProgress)
                | (Self::InProgress, Self::Completed)
                | (Self::Scheduled | Self::InProgress, Self::Cancelled)
        )
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }
}

/// Outcome of a single checklist task during inspection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum EntryResult {
    Pass,
    Fail,
    NotApplicable,
}

pub(crate) fn parse_status(raw: &str) -> Result<WorkOrderStatus, WorkOrdersError> {
    raw.parse()
        .map_err(|_| WorkOrdersError::Validation(format!("Unknown work order status: {raw}")))
}

pub(crate) fn parse_result(raw: &str) -> Result<EntryResult, WorkOrdersError> {
    raw.parse()
        .map_err(|_| WorkOrdersError::Validation(format!("Unknown entry result: {raw}")))
}

/// A recorded task result, stored inside the work order record.
#[derive(Debug, Clone, SurrealValue)]
pub struct EntryDoc {
    pub location: String,
    pub task: String,
    pub result: String,
    pub note: Option<String>,
    pub recorded_at: String,
}

#[derive(Debug, Clone, SurrealValue)]
pub struct WorkOrderRecord {
    pub id: String,
    pub contract: String,
    pub scheduled_date: String,
    pub inspectors: Vec<String>,
    pub status: String,
    pub entries: Vec<EntryDoc>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateWorkOrderRequest {
    pub contract: String,
    /// ISO 8601 date (`YYYY-MM-DD`).
    pub scheduled_date: String,
    pub inspectors: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateWorkOrderRequest {
    pub scheduled_date: String,
    pub inspectors: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EntryRequest {
    pub location: String,
    pub task: String,
    pub result: EntryResult,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct WorkOrderStatusRequest {
    pub status: WorkOrderStatus,
}

/// Pagination plus the `status`, `inspector`, and `date` list filters.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(default, rename_all = "camelCase")]
pub struct WorkOrderListParams {
    pub limit: Option<usize>,
    pub start: Option<usize>,
    pub status: Option<WorkOrderStatus>,
    pub inspector: Option<String>,
    /// Exact scheduled date (`YYYY-MM-DD`).
    pub date: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub location: String,
    pub task: String,
    pub result: EntryResult,
    pub note: Option<String>,
    pub recorded_at: String,
}

impl TryFrom<EntryDoc> for EntryResponse {
    type Error = WorkOrdersError;

    fn try_from(doc: EntryDoc) -> Result<Self, Self::Error> {
        Ok(Self {
            location: doc.location,
            task: doc.task,
            result: parse_result(&doc.result)?,
            note: doc.note,
            recorded_at: doc.recorded_at,
        })
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrderResponse {
    pub id: String,
    pub contract: String,
    pub scheduled_date: String,
    pub inspectors: Vec<String>,
    pub status: WorkOrderStatus,
    pub entries: Vec<EntryResponse>,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<WorkOrderRecord> for WorkOrderResponse {
    type Error = WorkOrdersError;

    fn try_from(record: WorkOrderRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            contract: record.contract,
            scheduled_date: record.scheduled_date,
            inspectors: record.inspectors,
            status: parse_status(&record.status)?,
            entries: record
                .entries
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<_, _>>()?,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

pub(crate) fn validate_scheduled_date(raw: &str) -> Result<(), WorkOrdersError> {
    chrono::NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        WorkOrdersError::Validation(format!("Scheduled date must be YYYY-MM-DD, got '{raw}'"))
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transition_graph() {
        use WorkOrderStatus::{Cancelled, Completed, InProgress, Scheduled};

        assert!(Scheduled.can_transition(InProgress));
        assert!(InProgress.can_transition(Completed));
        assert!(Scheduled.can_transition(Cancelled));
        assert!(InProgress.can_transition(Cancelled));

        assert!(!Scheduled.can_transition(Completed));
        assert!(!Completed.can_transition(Cancelled));
        assert!(!Cancelled.can_transition(InProgress));
    }

    #[test]
    fn status_and_result_round_trip() {
        assert_eq!(WorkOrderStatus::InProgress.to_string(), "in_progress");
        assert_eq!(parse_status("in_progress").unwrap(), WorkOrderStatus::InProgress);
        assert_eq!(parse_result("not_applicable").unwrap(), EntryResult::NotApplicable);
        assert!(parse_result("maybe").is_err());
    }

    #[test]
    fn scheduled_date_format() {
        assert!(validate_scheduled_date("2026-09-01").is_ok());
        assert!(validate_scheduled_date("01-09-2026").is_err());
        assert!(validate_scheduled_date("tomorrow").is_err());
    }
}
