//! Reports feature slice.
//!
//! Generates an inspection report for a completed work order by joining the
//! contract, customer, checklist, and recorded entries into one structured
//! document. The document is persisted (one report per work order, newer
//! generations replace older ones) and can be rendered as plain text.

mod error;
pub mod models;
mod render;
pub mod repository;
mod routes;

pub use error::ReportsError;
pub use render::render_text;

use ihub_kernel::prelude::{ApiState, FeatureSlice, InitializedSlice};
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[derive(Debug)]
pub struct ReportsInner {}

/// Reports feature state.
#[derive(Debug, Clone)]
pub struct Reports {
    inner: Arc<ReportsInner>,
}

impl Reports {
    #[must_use]
    pub fn new(inner: ReportsInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Reports {
    type Target = ReportsInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Reports {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the reports feature.
#[must_use]
pub fn init() -> InitializedSlice {
    tracing::info!("Reports slice initialized");

    let slice = Reports::new(ReportsInner {});
    InitializedSlice::new(slice)
}

/// The reports HTTP surface.
#[must_use]
pub fn router() -> OpenApiRouter<ApiState> {
    routes::router()
}
