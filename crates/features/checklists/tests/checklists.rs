use ihub_checklists::models::{ChecklistRequest, LocationDoc, TaskDoc};
use ihub_checklists::{ChecklistsError, repository};
use ihub_database::Database;

async fn test_db() -> Database {
    Database::builder()
        .url("mem://")
        .session("ihub", "checklists_test")
        .init()
        .await
        .expect("in-memory database")
}

fn apartment_template() -> ChecklistRequest {
    ChecklistRequest {
        name: "Apartment intake".into(),
        property_type: "apartment".into(),
        locations: vec![
            LocationDoc {
                name: "Kitchen".into(),
                position: 1,
                tasks: vec![
                    TaskDoc { name: "Check stove".into(), position: 1 },
                    TaskDoc { name: "Check taps".into(), position: 2 },
                ],
            },
            LocationDoc {
                name: "Bathroom".into(),
                position: 2,
                tasks: vec![TaskDoc { name: "Check ventilation".into(), position: 1 }],
            },
        ],
    }
}

#[tokio::test]
async fn create_and_read_back_nested_document() {
    let db = test_db().await;

    let created = repository::create_checklist(&db, apartment_template()).await.unwrap();
    assert!(created.id.starts_with("checklist:"));
    assert_eq!(created.locations.len(), 2);
    assert_eq!(created.locations[0].name, "Kitchen");
    assert_eq!(created.locations[0].tasks.len(), 2);

    let summaries = repository::list_checklists(&db, 50, 0).await.unwrap();
    assert_eq!(summaries.len(), 1);
    assert_eq!(summaries[0].property_type, "apartment");
}

#[tokio::test]
async fn update_replaces_the_whole_document() {
    let db = test_db().await;
    let created = repository::create_checklist(&db, apartment_template()).await.unwrap();

    let replacement = ChecklistRequest {
        name: "Apartment intake v2".into(),
        property_type: "apartment".into(),
        locations: vec![LocationDoc {
            name: "Living room".into(),
            position: 1,
            tasks: vec![TaskDoc { name: "Check windows".into(), position: 1 }],
        }],
    };

    let updated = repository::update_checklist(&db, &created.id, replacement).await.unwrap();

    // No mix of old and new locations after the replace.
    assert_eq!(updated.locations.len(), 1);
    assert_eq!(updated.locations[0].name, "Living room");

    let fetched = repository::get_checklist(&db, &created.id).await.unwrap();
    assert_eq!(fetched.locations.len(), 1);
    assert!(fetched.locations.iter().all(|location| location.name != "Kitchen"));
}

#[tokio::test]
async fn detail_is_ordered_by_position() {
    let db = test_db().await;

    let mut request = apartment_template();
    request.locations.reverse();
    request.locations[1].tasks.reverse();

    let created = repository::create_checklist(&db, request).await.unwrap();
    assert_eq!(created.locations[0].name, "Kitchen");
    assert_eq!(created.locations[0].tasks[0].name, "Check stove");
}

#[tokio::test]
async fn blank_names_are_rejected() {
    let db = test_db().await;

    let mut request = apartment_template();
    request.name = " ".into();

    let result = repository::create_checklist(&db, request).await;
    assert!(matches!(result, Err(ChecklistsError::Validation(_))));
}

#[tokio::test]
async fn delete_removes_the_checklist() {
    let db = test_db().await;
    let created = repository::create_checklist(&db, apartment_template()).await.unwrap();

    repository::delete_checklist(&db, &created.id).await.unwrap();

    let result = repository::get_checklist(&db, &created.id).await;
    assert!(matches!(result, Err(ChecklistsError::NotFound(_))));
}
