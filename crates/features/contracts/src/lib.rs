//! Contracts feature slice.
//!
//! A contract binds a customer, one of their addresses, and a checklist
//! template, and carries a status lifecycle:
//! draft → active → completed, with draft/active also allowed to cancel.

mod error;
pub mod models;
pub mod repository;
mod routes;

pub use error::ContractsError;
pub use models::ContractStatus;

use ihub_kernel::prelude::{ApiState, FeatureSlice, InitializedSlice};
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[derive(Debug)]
pub struct ContractsInner {}

/// Contracts feature state.
#[derive(Debug, Clone)]
pub struct Contracts {
    inner: Arc<ContractsInner>,
}

impl Contracts {
    #[must_use]
    pub fn new(inner: ContractsInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Contracts {
    type Target = ContractsInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Contracts {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the contracts feature.
#[must_use]
pub fn init() -> InitializedSlice {
    tracing::info!("Contracts slice initialized");

    let slice = Contracts::new(ContractsInner {});
    InitializedSlice::new(slice)
}

/// The contracts HTTP surface.
#[must_use]
pub fn router() -> OpenApiRouter<ApiState> {
    routes::router()
}
