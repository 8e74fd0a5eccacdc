//! Facade crate for `InspectHub` features and shared modules.
//! Re-exports domain/kernel primitives and aggregates feature initialization.
//! Keep this crate thin: it should compose other crates, not implement business logic.
//!
//! ## Usage
//! - Call [`init`] to register all feature slices with their dependencies.
//! - Mount [`server::router::api_router`] to expose every feature's HTTP surface.

use ihub_database::Database;
pub use ihub_domain as domain;
use ihub_domain::config::ApiConfig;
use ihub_event_bus::EventBus;
pub use ihub_kernel as kernel;

pub mod server {
    pub mod router {
        use ihub_kernel::prelude::ApiState;
        pub use ihub_kernel::server::router::system_router;
        use utoipa_axum::router::OpenApiRouter;

        /// Every feature's HTTP surface plus the system endpoints, merged
        /// into a single router.
        pub fn api_router() -> OpenApiRouter<ApiState> {
            OpenApiRouter::new()
                .merge(system_router())
                .merge(crate::features::customers::router())
                .merge(crate::features::checklists::router())
                .merge(crate::features::contracts::router())
                .merge(crate::features::workorders::router())
                .merge(crate::features::identity::router())
                .merge(crate::features::reports::router())
                .merge(crate::features::assistant::router())
        }
    }
}

/// Feature registry for runtime introspection.
pub mod features {
    pub use ihub_assistant as assistant;
    pub use ihub_checklists as checklists;
    pub use ihub_contracts as contracts;
    pub use ihub_customers as customers;
    pub use ihub_identity as identity;
    pub use ihub_reports as reports;
    pub use ihub_workorders as workorders;

    /// Feature slices compiled into this build.
    pub const ENABLED: &[&str] = &[
        "customers",
        "checklists",
        "contracts",
        "workorders",
        "identity",
        "reports",
        "assistant",
    ];

    #[must_use]
    pub fn is_enabled(name: &str) -> bool {
        ENABLED.contains(&name)
    }
}

/// Initialize all feature slices.
///
/// # Errors
/// Returns an error if any feature initialization fails.
pub fn init(
    config: &ApiConfig,
    database: &Database,
    events: &EventBus,
) -> Result<Vec<domain::registry::InitializedSlice>, Box<dyn std::error::Error>> {
    let mut slices = Vec::new();

    // Administration
    slices.push(features::customers::init());
    slices.push(features::checklists::init());
    slices.push(features::contracts::init());
    slices.push(features::workorders::init());

    // Identity & Access Management (IAM)
    slices.push(features::identity::init(config));

    // Reporting
    slices.push(features::reports::init());

    // Assistant (cache mirror + chat)
    slices.push(features::assistant::init(config, database, events)?);

    Ok(slices)
}
