//! Bearer-token extractor for authenticated endpoints.

use crate::error::IdentityError;
use crate::models::Role;
use crate::{Claims, Identity};
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use ihub_kernel::prelude::ApiState;

/// The authenticated caller, resolved from the `Authorization: Bearer` header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: String,
    pub role: Role,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self { id: claims.sub, role: claims.role }
    }
}

impl FromRequestParts<ApiState> for AuthUser {
    type Rejection = IdentityError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ApiState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| IdentityError::Unauthorized("Missing Authorization header".into()))?;

        let token = header
            .strip_prefix("Bearer ")
            .ok_or_else(|| IdentityError::Unauthorized("Expected a bearer token".into()))?;

        let identity = state
            .get_slice::<Identity>()
            .ok_or_else(|| IdentityError::Unauthorized("Identity slice not registered".into()))?;

        let claims = identity.tokens.validate(token)?;
        Ok(claims.into())
    }
}
