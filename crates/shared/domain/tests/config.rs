use ihub_domain::config::{ApiConfig, AssistantConfig, DatabaseConfig, ServerConfig};
use serde_json::json;

#[test]
fn config_defaults_are_sane() {
    let server = ServerConfig::default();
    assert_eq!(server.port, 4710);
    assert!(server.ssl.is_none());

    let db = DatabaseConfig::default();
    assert_eq!(db.url, "mem://");
    assert_eq!(db.namespace, "ihub");
    assert_eq!(db.database, "core");
    assert!(db.credentials.is_none());

    let assistant = AssistantConfig::default();
    assert_eq!(assistant.mirror_ttl_seconds, 300);
    assert!(assistant.refresh_interval_seconds > 0);
}

#[test]
fn api_config_deserializes() {
    let raw = json!({
        "server": { "address": "::", "port": 8080 },
        "database": { "url": "mem://", "namespace": "n", "database": "d", "credentials": null },
        "assistant": { "mirror_ttl_seconds": 42 }
    });

    let cfg: ApiConfig = serde_json::from_value(raw).expect("config deserialize");
    assert_eq!(cfg.server.port, 8080);
    assert_eq!(cfg.database.namespace, "n");
    assert_eq!(cfg.assistant.mirror_ttl_seconds, 42);
    // Untouched sections fall back to defaults.
    assert_eq!(cfg.security.jwt.issuer, "ihub");
}
