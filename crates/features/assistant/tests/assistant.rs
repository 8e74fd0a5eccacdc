use ihub_assistant::chat::chat_reply;
use ihub_assistant::models::{ContractSummary, CustomerSummary, WorkOrderSummary};
use ihub_assistant::{Assistant, MirrorService, mirror_key_for};
use ihub_cache::CacheStore;
use ihub_checklists::models::{ChecklistRequest, LocationDoc, TaskDoc};
use ihub_contracts::ContractStatus;
use ihub_contracts::models::CreateContractRequest;
use ihub_customers::models::{CreateCustomerRequest, NewAddress};
use ihub_database::Database;
use ihub_domain::config::ApiConfig;
use ihub_domain::constants::{
    MIRROR_CONTRACTS, MIRROR_CUSTOMERS, MIRROR_KEYS, MIRROR_WORK_ORDERS,
};
use ihub_domain::events::{ChangeAction, EntityChanged, EntityKind};
use ihub_event_bus::EventBus;
use ihub_identity::Role;
use ihub_identity::models::CreateUserRequest;
use ihub_kernel::prelude::ApiState;
use ihub_workorders::models::CreateWorkOrderRequest;
use std::time::Duration;

async fn seeded_db(database: &str) -> Database {
    let db = Database::builder()
        .url("mem://")
        .session("ihub", database)
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

    ihub_workorders::repository::create_work_order(
        &db,
        CreateWorkOrderRequest {
            contract: contract.id,
            scheduled_date: "2026-09-01".into(),
            inspectors: vec![inspector.id],
        },
    )
    .await
    .expect("work order fixture");

    db
}

fn mirror(db: &Database, ttl: Duration) -> MirrorService {
    let cache = CacheStore::builder().ttl(ttl).capacity(8).build();
    MirrorService::new(db.clone(), cache)
}

fn records<T: serde::de::DeserializeOwned>(value: &serde_json::Value) -> Vec<T> {
    serde_json::from_value(value.clone()).expect("mirror payload decodes")
}

#[tokio::test]
async fn refresh_all_flattens_names_into_every_key() {
    let db = seeded_db("assistant_refresh").await;
    let mirror = mirror(&db, Duration::from_secs(60));

    let refreshed = mirror.refresh_all().await;
    assert_eq!(refreshed, MIRROR_KEYS.len());
    for key in MIRROR_KEYS {
        assert!(mirror.cached(key).is_some(), "{key} should be populated");
    }

    let customers: Vec<CustomerSummary> =
        records(&mirror.cached(MIRROR_CUSTOMERS).unwrap());
    assert_eq!(customers.len(), 1);
    assert_eq!(customers[0].cities, vec!["Utrecht".to_owned()]);

    let contracts: Vec<ContractSummary> =
        records(&mirror.cached(MIRROR_CONTRACTS).unwrap());
    assert_eq!(contracts[0].customer_name, "Jansen Vastgoed");
    assert_eq!(contracts[0].status, "active");

    let orders: Vec<WorkOrderSummary> =
        records(&mirror.cached(MIRROR_WORK_ORDERS).unwrap());
    assert_eq!(orders[0].customer_name, "Jansen Vastgoed");
    assert_eq!(orders[0].inspector_names, vec!["Eva de Vries".to_owned()]);
}

#[tokio::test]
async fn expired_key_is_rebuilt_on_read_through() {
    let db = seeded_db("assistant_ttl").await;
    let mirror = mirror(&db, Duration::from_millis(50));

    mirror.refresh_key(MIRROR_CUSTOMERS).await.unwrap();
    assert!(mirror.cached(MIRROR_CUSTOMERS).is_some());

    tokio::time::sleep(Duration::from_millis(120)).await;
    assert!(mirror.cached(MIRROR_CUSTOMERS).is_none(), "key should expire after the TTL");

    let value = mirror.get_or_refresh(MIRROR_CUSTOMERS).await.unwrap();
    let customers: Vec<CustomerSummary> = records(&value);
    assert_eq!(customers.len(), 1);
    assert!(mirror.cached(MIRROR_CUSTOMERS).is_some());
}

#[tokio::test]
async fn status_tracks_presence_per_key() {
    let db = seeded_db("assistant_status").await;
    let mirror = mirror(&db, Duration::from_secs(60));

    mirror.refresh_key(MIRROR_CUSTOMERS).await.unwrap();
    let status = mirror.status();
    assert_eq!(status.ttl_seconds, 60);
    assert_eq!(status.keys.len(), MIRROR_KEYS.len());

    let customers = status.keys.iter().find(|key| key.key == MIRROR_CUSTOMERS).unwrap();
    assert!(customers.present);
    assert_eq!(customers.records, 1);
    assert!(customers.stored_at.is_some());

    let contracts = status.keys.iter().find(|key| key.key == MIRROR_CONTRACTS).unwrap();
    assert!(!contracts.present);
    assert_eq!(contracts.records, 0);
}

#[test]
fn reports_have_no_mirror_key() {
    assert_eq!(mirror_key_for(EntityKind::Customer), Some(MIRROR_CUSTOMERS));
    assert_eq!(mirror_key_for(EntityKind::WorkOrder), Some(MIRROR_WORK_ORDERS));
    assert_eq!(mirror_key_for(EntityKind::Report), None);
}

#[tokio::test(flavor = "multi_thread")]
async fn entity_change_rewrites_the_affected_key() {
    let db = seeded_db("assistant_events").await;
    let events = EventBus::default();
    let config = ApiConfig::default();

    let slice = ihub_assistant::init(&config, &db, &events).expect("assistant init");
    let state = ApiState::builder()
        .config(config)
        .db(db.clone())
        .events(events.clone())
        .register_slice(slice)
        .build()
        .expect("api state");
    let assistant = state.try_get_slice::<Assistant>().expect("registered slice");

    // Warm-up runs in the background; wait for the first write.
    wait_for(|| assistant.mirror.cached(MIRROR_CUSTOMERS).is_some()).await;

    ihub_customers::repository::create_customer(
        &db,
        CreateCustomerRequest {
            name: "Bakker Beheer".into(),
            email: "post@bakker.example".into(),
            phone: None,
            note: None,
            addresses: vec![NewAddress {
                street: "Kade 7".into(),
                city: "Rotterdam".into(),
                postal_code: "3011AB".into(),
                label: None,
            }],
        },
    )
    .await
    .unwrap();
    events
        .publish(EntityChanged::new(EntityKind::Customer, "customer:bakker", ChangeAction::Created))
        .unwrap();

    wait_for(|| {
        assistant
            .mirror
            .cached(MIRROR_CUSTOMERS)
            .is_some_and(|value| value.as_array().map_or(0, Vec::len) == 2)
    })
    .await;
}

async fn wait_for(mut condition: impl FnMut() -> bool) {
    for _ in 0..100 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(25)).await;
    }
    panic!("condition not met within 2.5s");
}

#[tokio::test]
async fn chat_answers_from_mirrored_records() {
    let db = seeded_db("assistant_chat").await;
    let mirror = mirror(&db, Duration::from_secs(60));

    // No warm-up: read-through populates the keys on demand.
    let schedule = chat_reply(&mirror, "What is planned this week?").await.unwrap();
    assert!(schedule.reply.contains("1 open work order"));
    assert!(schedule.reply.contains("Jansen Vastgoed"));
    assert_eq!(schedule.source_keys, vec![MIRROR_WORK_ORDERS.to_owned()]);

    let contracts = chat_reply(&mirror, "How many contracts do we have?").await.unwrap();
    assert!(contracts.reply.contains("1 contract(s)"));
    assert!(contracts.reply.contains("1 active"));

    let customer = chat_reply(&mirror, "Who is Jansen Vastgoed?").await.unwrap();
    assert!(customer.reply.contains("info@jansen.example"));
    assert!(customer.reply.contains("Utrecht"));
    assert_eq!(customer.source_keys, vec![MIRROR_CUSTOMERS.to_owned()]);

    let help = chat_reply(&mirror, "sing me a song").await.unwrap();
    assert!(help.source_keys.is_empty());
}
