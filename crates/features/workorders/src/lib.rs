//! Work orders feature slice.
//!
//! A work order schedules inspectors against an active contract and collects
//! task results (entries) while the inspection is in progress. Lifecycle:
//! scheduled → in_progress → completed, with scheduled/in_progress also
//! allowed to cancel. Completion requires at least one recorded entry.

mod error;
pub mod models;
pub mod repository;
mod routes;

pub use error::WorkOrdersError;
pub use models::{EntryResult, WorkOrderStatus};

use ihub_kernel::prelude::{ApiState, FeatureSlice, InitializedSlice};
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[derive(Debug)]
pub struct WorkOrdersInner {}

/// Work orders feature state.
#[derive(Debug, Clone)]
pub struct WorkOrders {
    inner: Arc<WorkOrdersInner>,
}

impl WorkOrders {
    #[must_use]
    pub fn new(inner: WorkOrdersInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for WorkOrders {
    type Target = WorkOrdersInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for WorkOrders {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the work orders feature.
#[must_use]
pub fn init() -> InitializedSlice {
    tracing::info!("Work orders slice initialized");

    let slice = WorkOrders::new(WorkOrdersInner {});
    InitializedSlice::new(slice)
}

/// The work orders HTTP surface.
#[must_use]
pub fn router() -> OpenApiRouter<ApiState> {
    routes::router()
}
