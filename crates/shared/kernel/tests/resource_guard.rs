use ihub_kernel::security::resource::ResourceGuard;

#[test]
fn resource_guard_validates_and_prefixes() {
    assert_eq!(ResourceGuard::verify("customer:123", "customer").unwrap(), "customer:123");

    assert_eq!(ResourceGuard::verify("123", "customer").unwrap(), "customer:123");

    assert!(ResourceGuard::verify("contract:123", "customer").is_err());
}
