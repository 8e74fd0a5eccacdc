use ihub_checklists::models::{ChecklistRequest, LocationDoc, TaskDoc};
use ihub_contracts::ContractStatus;
use ihub_contracts::models::CreateContractRequest;
use ihub_customers::models::{CreateCustomerRequest, NewAddress};
use ihub_database::Database;
use ihub_identity::Role;
use ihub_identity::models::CreateUserRequest;
use ihub_reports::{ReportsError, render_text, repository};
use ihub_workorders::models::{CreateWorkOrderRequest, EntryRequest};
use ihub_workorders::{EntryResult, WorkOrderStatus};

struct Fixture {
    db: Database,
    work_order: String,
}

async fn fixture() -> Fixture {
    let db = Database::builder()
        .url("mem://")
        .session("ihub", "reports_test")
        .init()
        .await
        .expect("in-memory database");

    let customer = ihub_customers::repository::create_customer(
        &db,
        CreateCustomerRequest {
            name: "Jansen Vastgoed".into(),
            email: "info@jansen.example".into(),
            phone: None,
            note: None,
            addresses: vec![NewAddress {
                street: "Main St 1".into(),
                city: "Utrecht".into(),
                postal_code: "3511AA".into(),
                label: None,
            }],
        },
    )
    .await
    .expect("customer fixture");

    let checklist = ihub_checklists::repository::create_checklist(
        &db,
        ChecklistRequest {
            name: "Apartment intake".into(),
            property_type: "apartment".into(),
            locations: vec![LocationDoc {
                name: "Kitchen".into(),
                position: 1,
                tasks: vec![
                    TaskDoc { name: "Check stove".into(), position: 1 },
                    TaskDoc { name: "Check taps".into(), position: 2 },
                ],
            }],
        },
    )
    .await
    .expect("checklist fixture");

    let contract = ihub_contracts::repository::create_contract(
        &db,
        CreateContractRequest {
            customer: customer.id.clone(),
            address: customer.addresses[0].id.clone(),
            checklist: checklist.id,
            price: 450.0,
            notes: None,
        },
    )
    .await
    .expect("contract fixture");
    ihub_contracts::repository::transition_contract(&db, &contract.id, ContractStatus::Active)
        .await
        .expect("activate contract");

    let inspector = ihub_identity::repository::create_user(
        &db,
        CreateUserRequest {
            name: "Eva de Vries".into(),
            email: "eva@example.test".into(),
            role: Role::Inspector,
            password: "correct horse battery".into(),
        },
    )
    .await
    .expect("inspector fixture");

    let order = ihub_workorders::repository::create_work_order(
        &db,
        CreateWorkOrderRequest {
            contract: contract.id,
            scheduled_date: "2026-09-01".into(),
            inspectors: vec![inspector.id],
        },
    )
    .await
    .expect("work order fixture");

    Fixture { db, work_order: order.id }
}

async fn complete_with_entries(fx: &Fixture) {
    ihub_workorders::repository::transition_work_order(
        &fx.db,
        &fx.work_order,
        WorkOrderStatus::InProgress,
    )
    .await
    .unwrap();

    for (task, result) in
        [("Check stove", EntryResult::Pass), ("Check taps", EntryResult::Fail)]
    {
        ihub_workorders::repository::add_entry(
            &fx.db,
            &fx.work_order,
            EntryRequest {
                location: "Kitchen".into(),
                task: task.into(),
                result,
                note: None,
            },
        )
        .await
        .unwrap();
    }

    ihub_workorders::repository::transition_work_order(
        &fx.db,
        &fx.work_order,
        WorkOrderStatus::Completed,
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn non_completed_work_order_is_rejected() {
    let fx = fixture().await;

    let result = repository::generate_report(&fx.db, &fx.work_order).await;
    assert!(matches!(result, Err(ReportsError::Conflict(_))));
}

#[tokio::test]
async fn generates_joined_document_with_summary() {
    let fx = fixture().await;
    complete_with_entries(&fx).await;

    let report = repository::generate_report(&fx.db, &fx.work_order).await.unwrap();
    assert_eq!(report.customer_name, "Jansen Vastgoed");
    assert_eq!(report.address_line, "Main St 1, Utrecht");
    assert_eq!(report.checklist_name, "Apartment intake");
    assert_eq!(report.inspector_names, vec!["Eva de Vries".to_owned()]);
    assert_eq!(report.sections.len(), 1);
    assert_eq!(report.sections[0].tasks.len(), 2);
    assert_eq!(report.summary.pass, 1);
    assert_eq!(report.summary.fail, 1);
    assert_eq!(report.summary.total, 2);

    let text = render_text(&report);
    assert!(text.contains("Jansen Vastgoed"));
    assert!(text.contains("[FAIL] Check taps"));
}

#[tokio::test]
async fn regeneration_replaces_the_stored_report() {
    let fx = fixture().await;
    complete_with_entries(&fx).await;

    let first = repository::generate_report(&fx.db, &fx.work_order).await.unwrap();
    let second = repository::generate_report(&fx.db, &fx.work_order).await.unwrap();
    assert_ne!(first.id, second.id);

    let listed = repository::list_reports(&fx.db, 50, 0).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, second.id);

    let result = repository::get_report(&fx.db, &first.id).await;
    assert!(matches!(result, Err(ReportsError::NotFound(_))));
}

#[tokio::test]
async fn unknown_work_order_is_not_found() {
    let fx = fixture().await;

    let result = repository::generate_report(&fx.db, "work_order:ghost").await;
    assert!(matches!(result, Err(ReportsError::WorkOrderNotFound(_))));
}
