use ihub_database::Database;
use ihub_identity::models::{CreateUserRequest, UpdateUserRequest};
use ihub_identity::{IdentityError, Role, repository};

async fn test_db() -> Database {
    Database::builder()
        .url("mem://")
        .session("ihub", "identity_test")
        .init()
        .await
        .expect("in-memory database")
}

fn inspector() -> CreateUserRequest {
    CreateUserRequest {
        name: "Eva de Vries".into(),
        email: "eva@example.test".into(),
        role: Role::Inspector,
        password: "correct horse battery".into(),
    }
}

#[tokio::test]
async fn create_and_authenticate() {
    let db = test_db().await;

    let user = repository::create_user(&db, inspector()).await.unwrap();
    assert!(user.id.starts_with("user:"));
    assert_eq!(user.role, Role::Inspector);

    let authed = repository::authenticate(&db, "eva@example.test", "correct horse battery")
        .await
        .unwrap();
    assert_eq!(authed.id, user.id);

    let result = repository::authenticate(&db, "eva@example.test", "wrong").await;
    assert!(matches!(result, Err(IdentityError::Unauthorized(_))));

    let result = repository::authenticate(&db, "nobody@example.test", "irrelevant").await;
    assert!(matches!(result, Err(IdentityError::Unauthorized(_))));
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let db = test_db().await;
    repository::create_user(&db, inspector()).await.unwrap();

    let result = repository::create_user(&db, inspector()).await;
    assert!(matches!(result, Err(IdentityError::Conflict(_))));
}

#[tokio::test]
async fn update_can_rotate_the_password() {
    let db = test_db().await;
    let user = repository::create_user(&db, inspector()).await.unwrap();

    repository::update_user(
        &db,
        &user.id,
        UpdateUserRequest {
            name: "Eva de Vries".into(),
            email: "eva@example.test".into(),
            role: Role::Admin,
            password: Some("another long password".into()),
        },
    )
    .await
    .unwrap();

    let result = repository::authenticate(&db, "eva@example.test", "correct horse battery").await;
    assert!(result.is_err());

    let authed = repository::authenticate(&db, "eva@example.test", "another long password")
        .await
        .unwrap();
    assert_eq!(authed.role, Role::Admin);
}

#[tokio::test]
async fn short_password_is_rejected() {
    let db = test_db().await;

    let mut request = inspector();
    request.password = "short".into();

    let result = repository::create_user(&db, request).await;
    assert!(matches!(result, Err(IdentityError::Validation(_))));
}

#[tokio::test]
async fn delete_removes_the_user() {
    let db = test_db().await;
    let user = repository::create_user(&db, inspector()).await.unwrap();

    repository::delete_user(&db, &user.id).await.unwrap();

    let result = repository::get_user(&db, &user.id).await;
    assert!(matches!(result, Err(IdentityError::NotFound(_))));
}
