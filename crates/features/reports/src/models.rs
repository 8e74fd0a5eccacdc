//! Report documents. The nested section/task shape is shared between storage
//! and the API; a stored report is returned exactly as generated.

use serde::{Deserialize, Serialize};
use surrealdb::types::SurrealValue;
use utoipa::ToSchema;

/// One task outcome inside a report section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SurrealValue, ToSchema)]
pub struct ReportTask {
    pub task: String,
    pub result: String,
    pub note: Option<String>,
}

/// All task outcomes recorded for one location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, SurrealValue, ToSchema)]
pub struct ReportSection {
    pub location: String,
    pub tasks: Vec<ReportTask>,
}

/// Pass/fail tallies over every recorded entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, SurrealValue, ToSchema)]
pub struct ReportSummary {
    pub pass: u32,
    pub fail: u32,
    pub not_applicable: u32,
    pub total: u32,
}

#[derive(Debug, Clone, SurrealValue)]
pub struct ReportRecord {
    pub id: String,
    pub work_order: String,
    pub customer_name: String,
    pub address_line: String,
    pub checklist_name: String,
    pub scheduled_date: String,
    pub inspector_names: Vec<String>,
    pub sections: Vec<ReportSection>,
    pub summary: ReportSummary,
    pub generated_at: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportResponse {
    pub id: String,
    pub work_order: String,
    pub customer_name: String,
    pub address_line: String,
    pub checklist_name: String,
    pub scheduled_date: String,
    pub inspector_names: Vec<String>,
    pub sections: Vec<ReportSection>,
    pub summary: ReportSummary,
    pub generated_at: String,
}

impl From<ReportRecord> for ReportResponse {
    fn from(record: ReportRecord) -> Self {
        Self {
            id: record.id,
            work_order: record.work_order,
            customer_name: record.customer_name,
            address_line: record.address_line,
            checklist_name: record.checklist_name,
            scheduled_date: record.scheduled_date,
            inspector_names: record.inspector_names,
            sections: record.sections,
            summary: record.summary,
            generated_at: record.generated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReportListItem {
    pub id: String,
    pub work_order: String,
    pub customer_name: String,
    pub scheduled_date: String,
    pub generated_at: String,
}

impl From<ReportRecord> for ReportListItem {
    fn from(record: ReportRecord) -> Self {
        Self {
            id: record.id,
            work_order: record.work_order,
            customer_name: record.customer_name,
            scheduled_date: record.scheduled_date,
            generated_at: record.generated_at,
        }
    }
}
