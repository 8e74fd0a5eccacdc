//! Identity feature slice: user accounts, salted password digests, and
//! HS256 bearer tokens.

mod error;
mod extract;
pub mod models;
mod password;
pub mod repository;
mod routes;
mod token;

pub use error::IdentityError;
pub use extract::AuthUser;
pub use models::Role;
pub use token::{Claims, TokenService};

use ihub_kernel::prelude::{ApiConfig, ApiState, FeatureSlice, InitializedSlice};
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;
use utoipa_axum::router::OpenApiRouter;

#[derive(Debug)]
pub struct IdentityInner {
    pub tokens: TokenService,
}

/// Identity feature state.
#[derive(Debug, Clone)]
pub struct Identity {
    inner: Arc<IdentityInner>,
}

impl Identity {
    #[must_use]
    pub fn new(inner: IdentityInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Identity {
    type Target = IdentityInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Identity {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the identity feature from the JWT configuration.
#[must_use]
pub fn init(config: &ApiConfig) -> InitializedSlice {
    tracing::info!("Identity slice initialized");

    let tokens = TokenService::new(&config.security.jwt);
    let slice = Identity::new(IdentityInner { tokens });
    InitializedSlice::new(slice)
}

/// The identity HTTP surface: user CRUD and the auth endpoints.
#[must_use]
pub fn router() -> OpenApiRouter<ApiState> {
    routes::router()
}
