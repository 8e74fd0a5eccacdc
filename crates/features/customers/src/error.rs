use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ihub_kernel::prelude::ResourceGuardError;
use ihub_kernel::server::response::error_response;

/// Customers error type.
#[derive(Debug, thiserror::Error)]
pub enum CustomersError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),
    #[error("Address not found: {0}")]
    AddressNotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Database(#[from] surrealdb::Error),
}

impl From<ResourceGuardError> for CustomersError {
    fn from(error: ResourceGuardError) -> Self {
        Self::Validation(error.to_string())
    }
}

impl IntoResponse for CustomersError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::CustomerNotFound(_) | Self::AddressNotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Database(error) => {
                tracing::error!(%error, "Customers database failure");
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
            }
        };

        error_response(status, &self.to_string())
    }
}
