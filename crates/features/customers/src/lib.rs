//! Customers feature slice: customer and address CRUD.

mod error;
pub mod models;
pub mod repository;
mod routes;

pub use error::CustomersError;

use ihub_kernel::prelude::{ApiState, FeatureSlice, InitializedSlice};
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[derive(Debug)]
pub struct CustomersInner {}

/// Customers feature state.
#[derive(Debug, Clone)]
pub struct Customers {
    inner: Arc<CustomersInner>,
}

impl Customers {
    #[must_use]
    pub fn new(inner: CustomersInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Customers {
    type Target = CustomersInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Customers {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the customers feature.
#[must_use]
pub fn init() -> InitializedSlice {
    tracing::info!("Customers slice initialized");

    let slice = Customers::new(CustomersInner {});
    InitializedSlice::new(slice)
}

/// The customers HTTP surface.
#[must_use]
pub fn router() -> OpenApiRouter<ApiState> {
    routes::router()
}
