use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ihub_kernel::prelude::ResourceGuardError;
use ihub_kernel::server::response::error_response;

/// Work orders error type.
#[derive(Debug, thiserror::Error)]
pub enum WorkOrdersError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Work order not found: {0}")]
    NotFound(String),
    #[error("Referenced record not found: {0}")]
    MissingReference(String),
    #[error("Invalid status transition: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] surrealdb::Error),
}

impl From<ResourceGuardError> for WorkOrdersError {
    fn from(error: ResourceGuardError) -> Self {
        Self::Validation(error.to_string())
    }
}

impl IntoResponse for WorkOrdersError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::MissingReference(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidTransition { .. } | Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(error) => {
                tracing::error!(%error, "Work orders database failure");
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
            }
        };

        error_response(status, &self.to_string())
    }
}
