//! Keyword intent resolution over the mirrored records.
//!
//! The chat engine only ever reads the cache mirror; it never queries the
//! primary database directly.

use crate::error::AssistantError;
use crate::mirror::MirrorService;
use crate::models::{
    ChatResponse, ChecklistSummary, ContractSummary, CustomerSummary, WorkOrderSummary,
};
use ihub_domain::constants::{
    MIRROR_CHECKLISTS, MIRROR_CONTRACTS, MIRROR_CUSTOMERS, MIRROR_WORK_ORDERS,
};
use serde::de::DeserializeOwned;

const SCHEDULE_KEYWORDS: &[&str] = &["schedule", "agenda", "planning", "planned", "upcoming", "today"];
const WORK_ORDER_KEYWORDS: &[&str] = &["work order", "work-order", "workorder", "inspection"];

const HELP_REPLY: &str = "I can answer questions about the schedule (\"what is planned today?\"), \
customers (\"who is customer Jansen?\"), contract status (\"how many active contracts?\"), \
work orders (\"how many inspections are in progress?\"), and checklists (\"which checklists exist?\").";

/// Resolves a chat message to a reply over the mirrored records.
///
/// # Errors
/// Returns the underlying refresh error when a needed mirror key cannot be
/// read or rebuilt.
pub async fn chat_reply(
    mirror: &MirrorService,
    message: &str,
) -> Result<ChatResponse, AssistantError> {
    let normalized = message.to_lowercase();

    if contains_any(&normalized, SCHEDULE_KEYWORDS) {
        let orders: Vec<WorkOrderSummary> = load(mirror, MIRROR_WORK_ORDERS).await?;
        return Ok(schedule_reply(&orders));
    }

    if normalized.contains("checklist") {
        let checklists: Vec<ChecklistSummary> = load(mirror, MIRROR_CHECKLISTS).await?;
        return Ok(checklist_reply(&checklists));
    }

    if normalized.contains("contract") {
        let contracts: Vec<ContractSummary> = load(mirror, MIRROR_CONTRACTS).await?;
        return Ok(contract_reply(&contracts));
    }

    if contains_any(&normalized, WORK_ORDER_KEYWORDS) {
        let orders: Vec<WorkOrderSummary> = load(mirror, MIRROR_WORK_ORDERS).await?;
        return Ok(work_order_reply(&orders));
    }

    let customers: Vec<CustomerSummary> = load(mirror, MIRROR_CUSTOMERS).await?;
    if let Some(found) = match_customer(&normalized, &customers) {
        return Ok(customer_detail_reply(found));
    }
    if normalized.contains("customer") {
        return Ok(customer_overview_reply(&customers));
    }

    Ok(ChatResponse { reply: HELP_REPLY.to_owned(), source_keys: Vec::new() })
}

async fn load<T: DeserializeOwned>(
    mirror: &MirrorService,
    key: &str,
) -> Result<Vec<T>, AssistantError> {
    let value = mirror.get_or_refresh(key).await?;
    Ok(serde_json::from_value(value.as_ref().clone())?)
}

fn contains_any(message: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| message.contains(keyword))
}

fn match_customer<'a>(
    message: &str,
    customers: &'a [CustomerSummary],
) -> Option<&'a CustomerSummary> {
    customers
        .iter()
        .filter(|customer| customer.name.len() >= 3)
        .find(|customer| message.contains(&customer.name.to_lowercase()))
}

fn schedule_reply(orders: &[WorkOrderSummary]) -> ChatResponse {
    let open: Vec<&WorkOrderSummary> = orders
        .iter()
        .filter(|order| order.status == "scheduled" || order.status == "in_progress")
        .collect();

    let reply = if open.is_empty() {
        "There are no open work orders on the schedule.".to_owned()
    } else {
        let lines: Vec<String> = open
            .iter()
            .take(5)
            .map(|order| {
                format!(
                    "{} — {} ({}, {})",
                    order.scheduled_date,
                    order.customer_name,
                    order.status,
                    order.inspector_names.join(", ")
                )
            })
            .collect();
        format!("{} open work order(s). Next up: {}", open.len(), lines.join("; "))
    };

    ChatResponse { reply, source_keys: vec![MIRROR_WORK_ORDERS.to_owned()] }
}

fn checklist_reply(checklists: &[ChecklistSummary]) -> ChatResponse {
    let reply = if checklists.is_empty() {
        "No checklist templates exist yet.".to_owned()
    } else {
        let lines: Vec<String> = checklists
            .iter()
            .map(|checklist| {
                format!(
                    "{} ({}, {} locations, {} tasks)",
                    checklist.name, checklist.property_type, checklist.locations, checklist.tasks
                )
            })
            .collect();
        format!("{} checklist template(s): {}", checklists.len(), lines.join("; "))
    };

    ChatResponse { reply, source_keys: vec![MIRROR_CHECKLISTS.to_owned()] }
}

fn contract_reply(contracts: &[ContractSummary]) -> ChatResponse {
    let reply = format!(
        "There are {} contract(s): {}.",
        contracts.len(),
        status_counts(contracts.iter().map(|contract| contract.status.as_str()))
    );

    ChatResponse { reply, source_keys: vec![MIRROR_CONTRACTS.to_owned()] }
}

fn work_order_reply(orders: &[WorkOrderSummary]) -> ChatResponse {
    let reply = format!(
        "There are {} work order(s): {}.",
        orders.len(),
        status_counts(orders.iter().map(|order| order.status.as_str()))
    );

    ChatResponse { reply, source_keys: vec![MIRROR_WORK_ORDERS.to_owned()] }
}

fn customer_detail_reply(customer: &CustomerSummary) -> ChatResponse {
    let cities = if customer.cities.is_empty() {
        "no registered addresses".to_owned()
    } else {
        format!("addresses in {}", customer.cities.join(", "))
    };
    let reply = format!("{} can be reached at {}; {}.", customer.name, customer.email, cities);

    ChatResponse { reply, source_keys: vec![MIRROR_CUSTOMERS.to_owned()] }
}

fn customer_overview_reply(customers: &[CustomerSummary]) -> ChatResponse {
    let reply = if customers.is_empty() {
        "No customers are registered yet.".to_owned()
    } else {
        let names: Vec<&str> =
            customers.iter().take(5).map(|customer| customer.name.as_str()).collect();
        format!("There are {} customer(s), including: {}.", customers.len(), names.join(", "))
    };

    ChatResponse { reply, source_keys: vec![MIRROR_CUSTOMERS.to_owned()] }
}

fn status_counts<'a>(statuses: impl Iterator<Item = &'a str>) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for status in statuses {
        match counts.iter_mut().find(|(name, _)| *name == status) {
            Some((_, count)) => *count += 1,
            None => counts.push((status, 1)),
        }
    }

    if counts.is_empty() {
        return "none yet".to_owned();
    }
    counts
        .iter()
        .map(|(status, count)| format!("{count} {status}"))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(date: &str, status: &str) -> WorkOrderSummary {
        WorkOrderSummary {
            id: "work_order:x".into(),
            customer_name: "Jansen Vastgoed".into(),
            scheduled_date: date.into(),
            status: status.into(),
            inspector_names: vec!["Eva".into()],
        }
    }

    #[test]
    fn schedule_reply_ignores_terminal_orders() {
        let orders =
            vec![order("2026-09-01", "scheduled"), order("2026-08-01", "completed")];
        let response = schedule_reply(&orders);
        assert!(response.reply.contains("1 open work order"));
        assert!(response.reply.contains("2026-09-01"));
        assert_eq!(response.source_keys, vec![MIRROR_WORK_ORDERS.to_owned()]);
    }

    #[test]
    fn status_counts_formats_groups() {
        let formatted =
            status_counts(["draft", "active", "draft"].into_iter());
        assert_eq!(formatted, "2 draft, 1 active");
    }

    #[test]
    fn customer_match_is_case_insensitive() {
        let customers = vec![CustomerSummary {
            id: "customer:x".into(),
            name: "Jansen Vastgoed".into(),
            email: "info@jansen.example".into(),
            cities: vec!["Utrecht".into()],
        }];
        assert!(match_customer("tell me about jansen vastgoed", &customers).is_some());
        assert!(match_customer("tell me about bakker", &customers).is_none());
    }
}
