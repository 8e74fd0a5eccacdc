use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ihub_kernel::prelude::ResourceGuardError;
use ihub_kernel::server::response::error_response;

/// Reports error type.
#[derive(Debug, thiserror::Error)]
pub enum ReportsError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Report not found: {0}")]
    NotFound(String),
    #[error("Work order not found: {0}")]
    WorkOrderNotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] surrealdb::Error),
}

impl From<ResourceGuardError> for ReportsError {
    fn from(error: ResourceGuardError) -> Self {
        Self::Validation(error.to_string())
    }
}

impl IntoResponse for ReportsError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) | Self::WorkOrderNotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(error) => {
                tracing::error!(%error, "Reports database failure");
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
            }
        };

        error_response(status, &self.to_string())
    }
}
