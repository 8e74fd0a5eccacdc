use crate::error::EventBusError;
use fxhash::FxHashMap;
use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::{trace, warn};

/// A safe default for channel buffers.
/// 128 is usually enough for domain events in a vertical slice.
const DEFAULT_CAPACITY: usize = 128;

/// Marker trait for types that can be sent across the [`EventBus`].
///
/// Any type that is `Send + Sync + 'static` automatically implements this trait.
pub trait Event: Any + Send + Sync + 'static {}
impl<T: Any + Send + Sync + 'static> Event for T {}

#[derive(Debug)]
struct ChannelState {
    capacity: usize,
    sender: Box<dyn Any + Send + Sync>,
}

/// A thread-safe broadcast event bus.
///
/// Manages channels indexed by [`TypeId`] of the event.
#[derive(Debug, Clone, Default)]
pub struct EventBus {
    channels: Arc<RwLock<FxHashMap<TypeId, ChannelState>>>,
}

impl EventBus {
    /// Creates a new, empty `EventBus`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribes to an event of type `T` with the default buffer capacity.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] if the registered channel holds
    /// a different sender type (registry invariant violation).
    pub fn subscribe<T: Event>(&self) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        self.subscribe_with_capacity::<T>(DEFAULT_CAPACITY)
    }

    /// Subscribes to an event of type `T` with a specific buffer capacity.
    ///
    /// The capacity only applies if the channel does not exist yet; a mismatch
    /// against an existing channel is logged, not an error.
    ///
    /// # Errors
    /// Returns [`EventBusError::InvalidCapacity`] if `capacity` is zero, or
    /// [`EventBusError::TypeMismatch`] on a registry invariant violation.
    pub fn subscribe_with_capacity<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Receiver<Arc<T>>, EventBusError> {
        let sender = self.ensure_channel::<T>(validate_capacity(capacity)?)?;
        Ok(sender.subscribe())
    }

    /// Publishes an event via broadcast, wrapping it in an [`Arc`].
    ///
    /// Returns the number of receivers the event reached. An event published
    /// with no active subscribers is dropped silently (traced, not an error).
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] on a registry invariant violation.
    pub fn publish<T: Event>(&self, event: T) -> Result<usize, EventBusError> {
        self.publish_arc(Arc::new(event))
    }

    /// Publishes a shared event instance without re-wrapping.
    ///
    /// # Errors
    /// Returns [`EventBusError::TypeMismatch`] on a registry invariant violation.
    pub fn publish_arc<T: Event>(&self, event: Arc<T>) -> Result<usize, EventBusError> {
        let sender = self.ensure_channel::<T>(DEFAULT_CAPACITY)?;

        sender.send(event).map_or_else(
            |_| {
                trace!(event = std::any::type_name::<T>(), "Event dropped: no active subscribers");
                Ok(0)
            },
            |count| {
                trace!(event = std::any::type_name::<T>(), count, "Event dispatched");
                Ok(count)
            },
        )
    }

    /// Gracefully shuts down the bus by dropping all underlying channels.
    ///
    /// Returns the number of event channels that were closed.
    #[must_use]
    pub fn shutdown(&self) -> usize {
        let mut channels = self.channels.write();
        let count = channels.len();
        channels.clear();
        count
    }

    fn ensure_channel<T: Event>(
        &self,
        capacity: usize,
    ) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
        let id = TypeId::of::<T>();

        {
            let channels = self.channels.read();
            if let Some(existing) = channels.get(&id) {
                return sender_from_state::<T>(existing, capacity);
            }
        }

        let mut channels = self.channels.write();
        let entry = channels.entry(id).or_insert_with(|| {
            trace!(event = std::any::type_name::<T>(), capacity, "Initializing new event channel");
            let (tx, _) = broadcast::channel::<Arc<T>>(capacity);
            ChannelState { capacity, sender: Box::new(tx) }
        });

        sender_from_state::<T>(entry, capacity)
    }
}

fn sender_from_state<T: Event>(
    state: &ChannelState,
    requested_capacity: usize,
) -> Result<broadcast::Sender<Arc<T>>, EventBusError> {
    if state.capacity != requested_capacity {
        warn!(
            event = std::any::type_name::<T>(),
            existing_capacity = state.capacity,
            requested_capacity,
            "Channel already initialized with a different capacity"
        );
    }
    state
        .sender
        .downcast_ref::<broadcast::Sender<Arc<T>>>()
        .cloned()
        .ok_or(EventBusError::TypeMismatch(std::any::type_name::<T>()))
}

fn validate_capacity(capacity: usize) -> Result<usize, EventBusError> {
    if capacity == 0 {
        return Err(EventBusError::InvalidCapacity(capacity));
    }
    Ok(capacity)
}
