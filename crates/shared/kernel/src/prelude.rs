//! Ergonomic re-exports for slice authors.

pub use crate::config::load_config;
pub use crate::safe_nanoid;
pub use crate::security::resource::{ResourceGuard, ResourceGuardError};
pub use crate::server::response::{ListParams, error_response};
pub use crate::server::{ApiState, ApiStateError};
pub use ihub_domain::config::ApiConfig;
pub use ihub_domain::events::{ChangeAction, EntityChanged, EntityKind};
pub use ihub_domain::registry::{FeatureSlice, InitializedSlice};
