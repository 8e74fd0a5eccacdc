use ihub_checklists::models::{ChecklistRequest, LocationDoc, TaskDoc};
use ihub_contracts::ContractStatus;
use ihub_contracts::models::CreateContractRequest;
use ihub_customers::models::{CreateCustomerRequest, NewAddress};
use ihub_database::Database;
use ihub_identity::Role;
use ihub_identity::models::CreateUserRequest;
use ihub_workorders::models::{CreateWorkOrderRequest, EntryRequest};
use ihub_workorders::{EntryResult, WorkOrderStatus, WorkOrdersError, repository};

struct Fixture {
    db: Database,
    contract: String,
    inspector: String,
}

async fn fixture() -> Fixture {
    let db = Database::builder()
        .url("mem://")
        .session("ihub", "workorders_test")
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
                tasks: vec![TaskDoc { name: "Check stove".into(), position: 1 }],
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

    Fixture { db, contract: contract.id, inspector: inspector.id }
}

fn create_request(fx: &Fixture) -> CreateWorkOrderRequest {
    CreateWorkOrderRequest {
        contract: fx.contract.clone(),
        scheduled_date: "2026-09-01".into(),
        inspectors: vec![fx.inspector.clone()],
    }
}

fn sample_entry() -> EntryRequest {
    EntryRequest {
        location: "Kitchen".into(),
        task: "Check stove".into(),
        result: EntryResult::Pass,
        note: None,
    }
}

#[tokio::test]
async fn create_requires_active_contract_and_inspectors() {
    let fx = fixture().await;

    let order = repository::create_work_order(&fx.db, create_request(&fx)).await.unwrap();
    assert_eq!(order.status, WorkOrderStatus::Scheduled);
    assert!(order.entries.is_empty());

    let mut no_inspectors = create_request(&fx);
    no_inspectors.inspectors.clear();
    let result = repository::create_work_order(&fx.db, no_inspectors).await;
    assert!(matches!(result, Err(WorkOrdersError::Validation(_))));

    // Drive the contract to completion and retry: not active -> conflict.
    ihub_contracts::repository::transition_contract(
        &fx.db,
        &fx.contract,
        ContractStatus::Completed,
    )
    .await
    .unwrap();
    let result = repository::create_work_order(&fx.db, create_request(&fx)).await;
    assert!(matches!(result, Err(WorkOrdersError::Conflict(_))));
}

#[tokio::test]
async fn entries_only_while_in_progress() {
    let fx = fixture().await;
    let order = repository::create_work_order(&fx.db, create_request(&fx)).await.unwrap();

    let result = repository::add_entry(&fx.db, &order.id, sample_entry()).await;
    assert!(matches!(result, Err(WorkOrdersError::Conflict(_))));

    repository::transition_work_order(&fx.db, &order.id, WorkOrderStatus::InProgress)
        .await
        .unwrap();

    let updated = repository::add_entry(&fx.db, &order.id, sample_entry()).await.unwrap();
    assert_eq!(updated.entries.len(), 1);
    assert_eq!(updated.entries[0].result, EntryResult::Pass);
}

#[tokio::test]
async fn completion_requires_an_entry() {
    let fx = fixture().await;
    let order = repository::create_work_order(&fx.db, create_request(&fx)).await.unwrap();
    repository::transition_work_order(&fx.db, &order.id, WorkOrderStatus::InProgress)
        .await
        .unwrap();

    let result =
        repository::transition_work_order(&fx.db, &order.id, WorkOrderStatus::Completed).await;
    assert!(matches!(result, Err(WorkOrdersError::Conflict(_))));
    let unchanged = repository::get_work_order(&fx.db, &order.id).await.unwrap();
    assert_eq!(unchanged.status, WorkOrderStatus::InProgress);

    repository::add_entry(&fx.db, &order.id, sample_entry()).await.unwrap();
    let completed =
        repository::transition_work_order(&fx.db, &order.id, WorkOrderStatus::Completed)
            .await
            .unwrap();
    assert_eq!(completed.status, WorkOrderStatus::Completed);
}

#[tokio::test]
async fn invalid_transitions_are_rejected() {
    let fx = fixture().await;
    let order = repository::create_work_order(&fx.db, create_request(&fx)).await.unwrap();

    let result =
        repository::transition_work_order(&fx.db, &order.id, WorkOrderStatus::Completed).await;
    assert!(matches!(result, Err(WorkOrdersError::InvalidTransition { .. })));

    repository::transition_work_order(&fx.db, &order.id, WorkOrderStatus::Cancelled)
        .await
        .unwrap();
    let result =
        repository::transition_work_order(&fx.db, &order.id, WorkOrderStatus::InProgress).await;
    assert!(matches!(result, Err(WorkOrdersError::InvalidTransition { .. })));
}

#[tokio::test]
async fn list_filters_by_status_inspector_and_date() {
    let fx = fixture().await;
    repository::create_work_order(&fx.db, create_request(&fx)).await.unwrap();

    let mut later = create_request(&fx);
    later.scheduled_date = "2026-09-15".into();
    let second = repository::create_work_order(&fx.db, later).await.unwrap();
    repository::transition_work_order(&fx.db, &second.id, WorkOrderStatus::InProgress)
        .await
        .unwrap();

    let scheduled = repository::list_work_orders(
        &fx.db,
        50,
        0,
        Some(WorkOrderStatus::Scheduled),
        None,
        None,
    )
    .await
    .unwrap();
    assert_eq!(scheduled.len(), 1);

    let by_inspector = repository::list_work_orders(
        &fx.db,
        50,
        0,
        None,
        Some(fx.inspector.clone()),
        None,
    )
    .await
    .unwrap();
    assert_eq!(by_inspector.len(), 2);
    // Soonest first.
    assert_eq!(by_inspector[0].scheduled_date, "2026-09-01");

    let on_date = repository::list_work_orders(
        &fx.db,
        50,
        0,
        None,
        None,
        Some("2026-09-15".into()),
    )
    .await
    .unwrap();
    assert_eq!(on_date.len(), 1);
    assert_eq!(on_date[0].id, second.id);
}

#[tokio::test]
async fn unknown_inspector_is_rejected() {
    let fx = fixture().await;

    let mut request = create_request(&fx);
    request.inspectors.push("user:ghost".into());

    let result = repository::create_work_order(&fx.db, request).await;
    assert!(matches!(result, Err(WorkOrdersError::MissingReference(_))));
}
