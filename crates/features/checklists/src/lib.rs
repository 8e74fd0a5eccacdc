//! Checklist templates feature slice.
//!
//! A checklist is a reusable inspection template: an ordered set of locations,
//! each holding an ordered set of tasks. The nested document is stored inside
//! the checklist record, so create and update replace it atomically.

mod error;
pub mod models;
pub mod repository;
mod routes;

pub use error::ChecklistsError;

use ihub_kernel::prelude::{ApiState, FeatureSlice, InitializedSlice};
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[derive(Debug)]
pub struct ChecklistsInner {}

/// Checklists feature state.
#[derive(Debug, Clone)]
pub struct Checklists {
    inner: Arc<ChecklistsInner>,
}

impl Checklists {
    #[must_use]
    pub fn new(inner: ChecklistsInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Checklists {
    type Target = ChecklistsInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Checklists {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the checklists feature.
#[must_use]
pub fn init() -> InitializedSlice {
    tracing::info!("Checklists slice initialized");

    let slice = Checklists::new(ChecklistsInner {});
    InitializedSlice::new(slice)
}

/// The checklists HTTP surface.
#[must_use]
pub fn router() -> OpenApiRouter<ApiState> {
    routes::router()
}
