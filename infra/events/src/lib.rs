//! # Event Bus
//!
//! A type-safe, asynchronous broadcast bus connecting decoupled feature slices.
//!
//! Events are identified by their Rust type; each type gets its own bounded
//! `tokio::sync::broadcast` channel, created lazily on first subscribe or
//! publish. Payloads travel as `Arc<T>` so fan-out never clones the event.
//!
//! # Example
//!
//! ```rust
//! use ihub_event_bus::{EventBus, EventReceiverExt, EventBusError};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct CustomerCreated { id: u64 }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), EventBusError> {
//!     let bus = EventBus::new();
//!
//!     let mut rx = bus.subscribe::<CustomerCreated>()?;
//!     bus.publish(CustomerCreated { id: 42 })?;
//!
//!     if let Some(event) = rx.recv_event().await {
//!         assert_eq!(event.id, 42);
//!     }
//!     Ok(())
//! }
//! ```

mod bus;
mod error;
mod receiver;

pub use bus::{Event, EventBus};
pub use error::EventBusError;
pub use receiver::EventReceiverExt;
