use ihub_customers::models::{CreateCustomerRequest, NewAddress, UpdateCustomerRequest};
use ihub_customers::{CustomersError, repository};
use ihub_database::Database;

async fn test_db() -> Database {
    Database::builder()
        .url("mem://")
        .session("ihub", "customers_test")
        .init()
        .await
        .expect("in-memory database")
}

fn sample_request() -> CreateCustomerRequest {
    CreateCustomerRequest {
        name: "Jansen Vastgoed".into(),
        email: "info@jansen.example".into(),
        phone: Some("+31 30 1234567".into()),
        note: None,
        addresses: vec![NewAddress {
            street: "Main St 1".into(),
            city: "Utrecht".into(),
            postal_code: "3511AA".into(),
            label: Some("Head office".into()),
        }],
    }
}

#[tokio::test]
async fn create_customer_persists_customer_and_addresses() {
    let db = test_db().await;

    let created = repository::create_customer(&db, sample_request()).await.unwrap();
    assert!(created.id.starts_with("customer:"));
    assert_eq!(created.addresses.len(), 1);
    assert_eq!(created.addresses[0].city, "Utrecht");

    let fetched = repository::get_customer(&db, &created.id).await.unwrap();
    assert_eq!(fetched.name, "Jansen Vastgoed");
    assert_eq!(fetched.addresses.len(), 1);
}

#[tokio::test]
async fn create_customer_rejects_empty_address_list() {
    let db = test_db().await;

    let mut request = sample_request();
    request.addresses.clear();

    let result = repository::create_customer(&db, request).await;
    assert!(matches!(result, Err(CustomersError::Validation(_))));

    let listed = repository::list_customers(&db, 50, 0).await.unwrap();
    assert!(listed.is_empty());
}

#[tokio::test]
async fn update_replaces_contact_fields() {
    let db = test_db().await;
    let created = repository::create_customer(&db, sample_request()).await.unwrap();

    let updated = repository::update_customer(
        &db,
        &created.id,
        UpdateCustomerRequest {
            name: "Jansen Vastgoed BV".into(),
            email: "contact@jansen.example".into(),
            phone: None,
            note: Some("Renamed".into()),
        },
    )
    .await
    .unwrap();

    assert_eq!(updated.name, "Jansen Vastgoed BV");
    assert_eq!(updated.phone, None);
    assert_eq!(updated.addresses.len(), 1);
}

#[tokio::test]
async fn last_address_cannot_be_removed() {
    let db = test_db().await;
    let created = repository::create_customer(&db, sample_request()).await.unwrap();
    let only_address = created.addresses[0].id.clone();

    let result = repository::remove_address(&db, &created.id, &only_address).await;
    assert!(matches!(result, Err(CustomersError::Conflict(_))));

    let second = repository::add_address(
        &db,
        &created.id,
        NewAddress {
            street: "Canal 2".into(),
            city: "Amsterdam".into(),
            postal_code: "1011AB".into(),
            label: None,
        },
    )
    .await
    .unwrap();

    repository::remove_address(&db, &created.id, &second.id).await.unwrap();

    let fetched = repository::get_customer(&db, &created.id).await.unwrap();
    assert_eq!(fetched.addresses.len(), 1);
}

#[tokio::test]
async fn delete_cascades_addresses() {
    let db = test_db().await;
    let created = repository::create_customer(&db, sample_request()).await.unwrap();

    repository::delete_customer(&db, &created.id).await.unwrap();

    let result = repository::get_customer(&db, &created.id).await;
    assert!(matches!(result, Err(CustomersError::CustomerNotFound(_))));

    let orphans: Vec<String> = db
        .query("SELECT VALUE type::string(id) FROM address;")
        .await
        .unwrap()
        .take(0)
        .unwrap();
    assert!(orphans.is_empty());
}

#[tokio::test]
async fn unknown_customer_is_not_found() {
    let db = test_db().await;

    let result = repository::get_customer(&db, "customer:missing").await;
    assert!(matches!(result, Err(CustomersError::CustomerNotFound(_))));

    let result = repository::get_customer(&db, "contract:abc").await;
    assert!(matches!(result, Err(CustomersError::Validation(_))));
}
