//! Report generation and retrieval.
//!
//! Generation joins the work order, contract, customer, address, checklist,
//! and users by their stored string references; the resulting document is
//! denormalized so a report stays readable even after the source records
//! change or disappear.

use crate::error::ReportsError;
use crate::models::{
    ReportListItem, ReportRecord, ReportResponse, ReportSection, ReportSummary, ReportTask,
};
use chrono::Utc;
use ihub_database::Database;
use ihub_kernel::prelude::ResourceGuard;
use ihub_kernel::safe_nanoid;
use surrealdb::types::SurrealValue;

#[derive(Debug, SurrealValue)]
struct EntryRow {
    location: String,
    task: String,
    result: String,
    note: Option<String>,
}

#[derive(Debug, SurrealValue)]
struct WorkOrderRow {
    contract: String,
    scheduled_date: String,
    inspectors: Vec<String>,
    status: String,
    entries: Vec<EntryRow>,
}

#[derive(Debug, SurrealValue)]
struct ContractRow {
    customer: String,
    address: String,
    checklist: String,
}

#[derive(Debug, SurrealValue)]
struct AddressRow {
    street: String,
    city: String,
}

/// Generates (or regenerates) the report for a completed work order.
///
/// # Errors
/// Returns `Conflict` unless the work order status is `completed`.
pub async fn generate_report(
    db: &Database,
    work_order_id: &str,
) -> Result<ReportResponse, ReportsError> {
    let work_order_id = ResourceGuard::verify(work_order_id, "work_order")?;

    let order: Option<WorkOrderRow> = db
        .query(
            "SELECT contract, scheduled_date, inspectors, status, entries \
             FROM type::record('work_order', $key);",
        )
        .bind(("key", ResourceGuard::key(&work_order_id).to_owned()))
        .await?
        .take(0)?;
    let order = order.ok_or_else(|| ReportsError::WorkOrderNotFound(work_order_id.clone()))?;

    if order.status != "completed" {
        return Err(ReportsError::Conflict(format!(
            "Reports can only be generated for completed work orders, {work_order_id} is '{}'",
            order.status
        )));
    }

    let contract: Option<ContractRow> = db
        .query("SELECT customer, address, checklist FROM type::record('contract', $key);")
        .bind(("key", ResourceGuard::key(&order.contract).to_owned()))
        .await?
        .take(0)?;
    let contract =
        contract.ok_or_else(|| ReportsError::Validation(format!(
            "Contract {} of the work order no longer exists",
            order.contract
        )))?;

    let customer_name = lookup_name(db, "customer", &contract.customer).await?;
    let checklist_name = lookup_name(db, "checklist", &contract.checklist).await?;
    let address: Option<AddressRow> = db
        .query("SELECT street, city FROM type::record('address', $key);")
        .bind(("key", ResourceGuard::key(&contract.address).to_owned()))
        .await?
        .take(0)?;
    let address_line = address
        .map_or_else(|| contract.address.clone(), |a| format!("{}, {}", a.street, a.city));

    let mut inspector_names = Vec::with_capacity(order.inspectors.len());
    for inspector in &order.inspectors {
        inspector_names.push(lookup_name(db, "user", inspector).await?);
    }

    let sections = build_sections(order.entries);
    let summary = summarize(&sections);

    let key = safe_nanoid!();
    let id = format!("report:{key}");

    // One report per work order: regeneration replaces the previous document.
    db.query(
        "BEGIN TRANSACTION;
         DELETE report WHERE work_order = $work_order;
         CREATE type::record('report', $key) CONTENT {
             work_order: $work_order, customer_name: $customer_name,
             address_line: $address_line, checklist_name: $checklist_name,
             scheduled_date: $scheduled_date, inspector_names: $inspector_names,
             sections: $sections, summary: $summary, generated_at: $generated_at
         };
         COMMIT TRANSACTION;",
    )
    .bind(("key", key))
    .bind(("work_order", work_order_id))
    .bind(("customer_name", customer_name))
    .bind(("address_line", address_line))
    .bind(("checklist_name", checklist_name))
    .bind(("scheduled_date", order.scheduled_date))
    .bind(("inspector_names", inspector_names))
    .bind(("sections", sections))
    .bind(("summary", summary))
    .bind(("generated_at", Utc::now().to_rfc3339()))
    .await?
    .check()?;

    get_report(db, &id).await
}

/// Fetches one report.
///
/// # Errors
/// Returns `NotFound` if the record does not exist.
pub async fn get_report(db: &Database, id: &str) -> Result<ReportResponse, ReportsError> {
    let id = ResourceGuard::verify(id, "report")?;
    let record: Option<ReportRecord> = db
        .query("SELECT *, type::string(id) AS id FROM type::record('report', $key);")
        .bind(("key", ResourceGuard::key(&id).to_owned()))
        .await?
        .take(0)?;

    record.map(Into::into).ok_or(ReportsError::NotFound(id))
}

/// Lists report summaries, newest generation first.
///
/// # Errors
/// Returns a database error if the query fails.
pub async fn list_reports(
    db: &Database,
    limit: usize,
    start: usize,
) -> Result<Vec<ReportListItem>, ReportsError> {
    let records: Vec<ReportRecord> = db
        .query(
            "SELECT *, type::string(id) AS id FROM report \
             ORDER BY generated_at DESC LIMIT $limit START $start;",
        )
        .bind(("limit", limit))
        .bind(("start", start))
        .await?
        .take(0)?;

    Ok(records.into_iter().map(Into::into).collect())
}

async fn lookup_name(db: &Database, table: &str, id: &str) -> Result<String, ReportsError> {
    let name: Option<String> = db
        .query("SELECT VALUE name FROM type::record($table, $key);")
        .bind(("table", table.to_owned()))
        .bind(("key", ResourceGuard::key(id).to_owned()))
        .await?
        .take(0)?;

    // A deleted source record degrades to its raw reference.
    Ok(name.unwrap_or_else(|| id.to_owned()))
}

fn build_sections(entries: Vec<EntryRow>) -> Vec<ReportSection> {
    let mut sections: Vec<ReportSection> = Vec::new();

    for entry in entries {
        let task =
            ReportTask { task: entry.task, result: entry.result, note: entry.note };

        match sections.iter_mut().find(|section| section.location == entry.location) {
            Some(section) => section.tasks.push(task),
            None => sections.push(ReportSection { location: entry.location, tasks: vec![task] }),
        }
    }

    sections
}

fn summarize(sections: &[ReportSection]) -> ReportSummary {
    let mut summary = ReportSummary { pass: 0, fail: 0, not_applicable: 0, total: 0 };

    for task in sections.iter().flat_map(|section| &section.tasks) {
        summary.total += 1;
        match task.result.as_str() {
            "pass" => summary.pass += 1,
            "fail" => summary.fail += 1,
            _ => summary.not_applicable += 1,
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_preserve_first_appearance_order() {
        let entries = vec![
            EntryRow {
                location: "Kitchen".into(),
                task: "Stove".into(),
                result: "pass".into(),
                note: None,
            },
            EntryRow {
                location: "Bathroom".into(),
                task: "Ventilation".into(),
                result: "fail".into(),
                note: None,
            },
            EntryRow {
                location: "Kitchen".into(),
                task: "Taps".into(),
                result: "not_applicable".into(),
                note: None,
            },
        ];

        let sections = build_sections(entries);
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].location, "Kitchen");
        assert_eq!(sections[0].tasks.len(), 2);
        assert_eq!(sections[1].location, "Bathroom");

        let summary = summarize(&sections);
        assert_eq!(summary.pass, 1);
        assert_eq!(summary.fail, 1);
        assert_eq!(summary.not_applicable, 1);
        assert_eq!(summary.total, 3);
    }
}
