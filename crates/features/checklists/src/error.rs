use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ihub_kernel::prelude::ResourceGuardError;
use ihub_kernel::server::response::error_response;

/// Checklists error type.
#[derive(Debug, thiserror::Error)]
pub enum ChecklistsError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Checklist not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] surrealdb::Error),
}

impl From<ResourceGuardError> for ChecklistsError {
    fn from(error: ResourceGuardError) -> Self {
        Self::Validation(error.to_string())
    }
}

impl IntoResponse for ChecklistsError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(error) => {
                tracing::error!(%error, "Checklists database failure");
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
            }
        };

        error_response(status, &self.to_string())
    }
}
