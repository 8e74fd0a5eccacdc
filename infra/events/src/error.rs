/// Errors that can occur during event bus operations.
#[derive(Debug, thiserror::Error)]
pub enum EventBusError {
    /// Occurs when an internal dynamic cast fails.
    /// This usually indicates an invariant violation in the type registry.
    #[error("Type mismatch for event {0}")]
    TypeMismatch(&'static str),

    /// Capacity must be greater than zero for bounded channels.
    #[error("Invalid capacity: {0}")]
    InvalidCapacity(usize),
}
