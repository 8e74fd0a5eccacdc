use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ihub_kernel::prelude::ResourceGuardError;
use ihub_kernel::server::response::error_response;

/// Identity error type.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("User not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("{0}")]
    Conflict(String),
    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
    #[error(transparent)]
    Database(#[from] surrealdb::Error),
}

impl From<ResourceGuardError> for IdentityError {
    fn from(error: ResourceGuardError) -> Self {
        Self::Validation(error.to_string())
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            // Token details stay out of the response body.
            Self::Unauthorized(_) | Self::Token(_) => {
                return error_response(StatusCode::UNAUTHORIZED, "Unauthorized");
            }
            Self::Database(error) => {
                tracing::error!(%error, "Identity database failure");
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
            }
        };

        error_response(status, &self.to_string())
    }
}
