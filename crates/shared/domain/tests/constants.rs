use ihub_domain::constants::{MIRROR_CUSTOMERS, MIRROR_KEYS, MIRROR_WORK_ORDERS};

#[test]
fn mirror_keys_are_namespaced_and_complete() {
    assert_eq!(MIRROR_CUSTOMERS, "mirror:customers");
    assert_eq!(MIRROR_WORK_ORDERS, "mirror:work-orders");
    assert_eq!(MIRROR_KEYS.len(), 5);

    for key in MIRROR_KEYS {
        assert!(key.starts_with("mirror:"), "unexpected mirror key: {key}");
    }
}
