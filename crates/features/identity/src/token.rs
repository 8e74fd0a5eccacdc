//! HS256 token issuance and validation.

use crate::error::IdentityError;
use crate::models::Role;
use chrono::Utc;
use ihub_domain::config::JwtConfig;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User record ID.
    pub sub: String,
    pub role: Role,
    pub iss: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    issuer: String,
    ttl_seconds: u64,
    validation: Validation,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("issuer", &self.issuer)
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.leeway = config.clock_skew_seconds;

        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            ttl_seconds: config.ttl_seconds,
            validation,
        }
    }

    /// Issues a bearer token for the given user.
    ///
    /// # Errors
    /// Returns a token error if signing fails.
    pub fn issue(&self, user_id: &str, role: Role) -> Result<String, IdentityError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(self.ttl_seconds).unwrap_or(i64::MAX);
        let claims = Claims {
            sub: user_id.to_owned(),
            role,
            iss: self.issuer.clone(),
            iat: now,
            exp: now + ttl,
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Validates a bearer token and returns its claims.
    ///
    /// # Errors
    /// Returns a token error for expired, malformed, or mis-issued tokens.
    pub fn validate(&self, token: &str) -> Result<Claims, IdentityError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&JwtConfig {
            secret: "test-secret".into(),
            issuer: "ihub-test".into(),
            ttl_seconds: 60,
            clock_skew_seconds: 0,
        })
    }

    #[test]
    fn issued_token_validates() {
        let tokens = service();
        let token = tokens.issue("user:abc", Role::Inspector).unwrap();
        let claims = tokens.validate(&token).unwrap();
        assert_eq!(claims.sub, "user:abc");
        assert_eq!(claims.role, Role::Inspector);
        assert_eq!(claims.iss, "ihub-test");
    }

    #[test]
    fn foreign_issuer_is_rejected() {
        let token = service().issue("user:abc", Role::Admin).unwrap();
        let other = TokenService::new(&JwtConfig {
            secret: "test-secret".into(),
            issuer: "someone-else".into(),
            ttl_seconds: 60,
            clock_skew_seconds: 0,
        });
        assert!(other.validate(&token).is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        let tokens = service();
        let mut token = tokens.issue("user:abc", Role::Admin).unwrap();
        token.push('x');
        assert!(tokens.validate(&token).is_err());
    }
}
