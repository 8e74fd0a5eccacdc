//! Shared string constants: OpenAPI tags and cache-mirror keys.

// OpenAPI tags, one per slice.
pub const SYSTEM_TAG: &str = "System";
pub const CUSTOMERS_TAG: &str = "Customers";
pub const CONTRACTS_TAG: &str = "Contracts";
pub const CHECKLISTS_TAG: &str = "Checklists";
pub const WORK_ORDERS_TAG: &str = "Work Orders";
pub const IDENTITY_TAG: &str = "Identity";
pub const REPORTS_TAG: &str = "Reports";
pub const ASSISTANT_TAG: &str = "Assistant";

// Well-known mirror keys. Each key holds a flat JSON array of summary records.
pub const MIRROR_CUSTOMERS: &str = "mirror:customers";
pub const MIRROR_CONTRACTS: &str = "mirror:contracts";
pub const MIRROR_CHECKLISTS: &str = "mirror:checklists";
pub const MIRROR_WORK_ORDERS: &str = "mirror:work-orders";
pub const MIRROR_USERS: &str = "mirror:users";

/// Every mirror key, in warm-up order.
pub const MIRROR_KEYS: &[&str] =
    &[MIRROR_CUSTOMERS, MIRROR_CONTRACTS, MIRROR_CHECKLISTS, MIRROR_WORK_ORDERS, MIRROR_USERS];
