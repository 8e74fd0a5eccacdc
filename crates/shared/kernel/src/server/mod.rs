mod health;
pub mod response;
pub mod router;
mod state;

pub use state::{ApiState, ApiStateBuilder, ApiStateError};
