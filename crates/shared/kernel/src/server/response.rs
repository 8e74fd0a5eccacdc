//! Uniform HTTP response helpers shared by every slice router.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use serde_json::json;
use utoipa::IntoParams;

const DEFAULT_LIMIT: usize = 50;
const MAX_LIMIT: usize = 500;

/// Builds the uniform error body: `{ "error": "<message>" }`.
#[must_use]
pub fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

/// Pagination query parameters accepted by every list endpoint.
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[serde(default, deny_unknown_fields)]
pub struct ListParams {
    /// Maximum number of records to return (clamped to 500, default 50).
    pub limit: Option<usize>,
    /// Number of records to skip.
    pub start: Option<usize>,
}

impl ListParams {
    /// The effective `(limit, start)` pair after clamping.
    #[must_use]
    pub fn effective(&self) -> (usize, usize) {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        (limit, self.start.unwrap_or(0))
    }
}
