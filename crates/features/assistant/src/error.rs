use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ihub_kernel::server::response::error_response;

/// Assistant error type.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Unknown mirror key: {0}")]
    UnknownKey(String),
    #[error("Event bus error: {0}")]
    Events(#[from] ihub_event_bus::EventBusError),
    #[error("State error: {0}")]
    State(#[from] ihub_kernel::server::ApiStateError),
    #[error(transparent)]
    Database(#[from] surrealdb::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl IntoResponse for AssistantError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) | Self::UnknownKey(_) => StatusCode::BAD_REQUEST,
            Self::Events(_) | Self::Database(_) | Self::Serialization(_) | Self::State(_) => {
                tracing::error!(error = %self, "Assistant internal failure");
                return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");
            }
        };

        error_response(status, &self.to_string())
    }
}
