//! Assistant feature slice.
//!
//! Answers inspector questions from a denormalized cache mirror of select
//! tables. The mirror is warmed on slice start, refreshed on an interval and
//! on demand, and rewritten when another slice publishes an `EntityChanged`
//! event. The chat engine resolves keyword intents over mirrored records
//! only.

pub mod chat;
mod error;
pub mod mirror;
pub mod models;
mod routes;

pub use error::AssistantError;
pub use mirror::{MirrorService, mirror_key_for};

use ihub_cache::CacheStore;
use ihub_database::Database;
use ihub_event_bus::{EventBus, EventReceiverExt};
use ihub_kernel::prelude::{
    ApiConfig, ApiState, EntityChanged, FeatureSlice, InitializedSlice,
};
use std::any::Any;
use std::ops::Deref;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::warn;
use utoipa_axum::router::OpenApiRouter;

#[derive(Debug)]
pub struct AssistantInner {
    pub mirror: Arc<MirrorService>,
    pub max_message_bytes: usize,
    tasks: Vec<JoinHandle<()>>,
}

impl Drop for AssistantInner {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
        tracing::info!("Assistant background tasks stopped");
    }
}

/// Assistant feature state.
#[derive(Debug, Clone)]
pub struct Assistant {
    inner: Arc<AssistantInner>,
}

impl Assistant {
    #[must_use]
    pub fn new(inner: AssistantInner) -> Self {
        Self { inner: Arc::new(inner) }
    }
}

impl Deref for Assistant {
    type Target = AssistantInner;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl FeatureSlice for Assistant {
    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Initialize the assistant feature.
///
/// Builds the mirror store, spawns the warm-up/interval refresh task and the
/// `EntityChanged` subscriber. Both tasks abort when the slice is dropped.
///
/// # Errors
/// Returns an error if the event bus subscription fails.
pub fn init(
    config: &ApiConfig,
    db: &Database,
    events: &EventBus,
) -> Result<InitializedSlice, AssistantError> {
    let settings = &config.assistant;
    let cache = CacheStore::builder()
        .ttl(Duration::from_secs(settings.mirror_ttl_seconds))
        .capacity(settings.cache_capacity)
        .build();
    let mirror = Arc::new(MirrorService::new(db.clone(), cache));

    let mut tasks = Vec::with_capacity(2);

    // Warm-up on start, then periodic refresh (0 disables the interval).
    let interval_seconds = settings.refresh_interval_seconds;
    {
        let mirror = Arc::clone(&mirror);
        tasks.push(tokio::spawn(async move {
            let refreshed = mirror.refresh_all().await;
            tracing::info!(refreshed, "Assistant mirror warmed up");

            if interval_seconds == 0 {
                return;
            }
            let mut ticker =
                tokio::time::interval(Duration::from_secs(interval_seconds));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately; the warm-up already covered it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                mirror.refresh_all().await;
            }
        }));
    }

    // Rewrite the affected key on every entity mutation.
    let mut receiver = events.subscribe::<EntityChanged>()?;
    {
        let mirror = Arc::clone(&mirror);
        tasks.push(tokio::spawn(async move {
            while let Some(event) = receiver.recv_event().await {
                let Some(key) = mirror_key_for(event.kind) else {
                    continue;
                };
                if let Err(error) = mirror.refresh_key(key).await {
                    // Read-through repopulates the key on the next miss.
                    warn!(%error, key, "Mirror rewrite after entity change failed");
                }
            }
        }));
    }

    tracing::info!("Assistant slice initialized");

    let slice = Assistant::new(AssistantInner {
        mirror,
        max_message_bytes: settings.max_message_bytes,
        tasks,
    });
    Ok(InitializedSlice::new(slice))
}

/// The assistant HTTP surface.
#[must_use]
pub fn router() -> OpenApiRouter<ApiState> {
    routes::router()
}
