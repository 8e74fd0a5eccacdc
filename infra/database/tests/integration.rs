use ihub_database::*;

#[tokio::test]
async fn connect_in_memory_and_health_check() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "test_db")
        .init()
        .await
        .expect("connect to mem://");

    // Health should be OK for mem://
    db.health().await.expect("health check");
    db.use_ns("test_ns").use_db("test_db").await.expect("session switch");
    assert_eq!(db.namespace(), "test_ns");
}

#[tokio::test]
async fn missing_parameters_fail_validation() {
    let err = Database::builder().init().await.unwrap_err();
    assert!(matches!(err, DatabaseError::Validation(_)));
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let db = Database::builder()
        .url("mem://")
        .session("test_ns", "migrations")
        .init()
        .await
        .expect("first init applies migrations");

    use surrealdb::types::SurrealValue;

    #[derive(Debug, SurrealValue)]
    struct Row {
        slice: String,
        version: String,
        checksum: String,
    }

    // A second init against the same engine would skip everything; here we
    // assert the bookkeeping table exists and holds one row per slice script.
    let mut response = db
        .query("SELECT slice, version, checksum FROM migration")
        .await
        .expect("migration table query");
    let rows = response.take::<Vec<Row>>(0).expect("rows decode");
    assert_eq!(rows.len(), 6, "expected one applied migration per slice");
    assert!(rows.iter().all(|r| r.version == "0001" && r.checksum.len() == 64));
    assert!(rows.iter().any(|r| r.slice == "customers"));
}
