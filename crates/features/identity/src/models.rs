//! User records and API payloads. The password digest and salt never leave
//! the slice: responses are built from [`UserResponse`] only.

use crate::error::IdentityError;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use surrealdb::types::SurrealValue;
use utoipa::ToSchema;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    Admin,
    Inspector,
}

pub(crate) fn parse_role(raw: &str) -> Result<Role, IdentityError> {
    raw.parse().map_err(|_| IdentityError::Validation(format!("Unknown role: {raw}")))
}

#[derive(Debug, Clone, SurrealValue)]
pub struct UserRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
    pub salt: String,
    pub digest: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateUserRequest {
    pub name: String,
    pub email: String,
    pub role: Role,
    /// When present, re-salts and replaces the stored digest.
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: String,
    pub updated_at: String,
}

impl TryFrom<UserRecord> for UserResponse {
    type Error = IdentityError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id,
            name: record.name,
            email: record.email,
            role: parse_role(&record.role)?,
            created_at: record.created_at,
            updated_at: record.updated_at,
        })
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user: UserResponse,
}

pub(crate) fn validate_user(name: &str, email: &str) -> Result<(), IdentityError> {
    if name.trim().is_empty() {
        return Err(IdentityError::Validation("User name must not be empty".into()));
    }
    if email.trim().is_empty() || !email.contains('@') {
        return Err(IdentityError::Validation("User email is not valid".into()));
    }
    Ok(())
}

pub(crate) fn validate_password(password: &str) -> Result<(), IdentityError> {
    if password.len() < 8 {
        return Err(IdentityError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips() {
        assert_eq!(Role::Inspector.to_string(), "inspector");
        assert_eq!(parse_role("admin").unwrap(), Role::Admin);
        assert!(parse_role("root").is_err());
    }

    #[test]
    fn short_password_is_rejected() {
        assert!(validate_password("hunter2").is_err());
        assert!(validate_password("long enough").is_ok());
    }

    #[test]
    fn user_response_never_carries_the_digest() {
        let json = serde_json::to_value(UserResponse {
            id: "user:x".into(),
            name: "Eva".into(),
            email: "eva@example.test".into(),
            role: Role::Inspector,
            created_at: String::new(),
            updated_at: String::new(),
        })
        .unwrap();
        assert!(json.get("digest").is_none());
        assert!(json.get("salt").is_none());
    }
}
