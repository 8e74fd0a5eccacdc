use crate::chat::chat_reply;
use crate::error::AssistantError;
use crate::models::{ChatRequest, ChatResponse, MirrorStatusResponse};
use crate::Assistant;
use axum::Json;
use axum::extract::State;
use ihub_domain::constants::ASSISTANT_TAG;
use ihub_kernel::prelude::ApiState;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(chat))
        .routes(routes!(cache_status))
        .routes(routes!(refresh_cache))
}

#[utoipa::path(
    post,
    path = "/api/assistant/chat",
    tag = ASSISTANT_TAG,
    request_body = ChatRequest,
    responses(
        (status = 200, description = "Assistant reply with its mirror sources", body = ChatResponse),
        (status = 400, description = "Empty or oversized message"),
    )
)]
async fn chat(
    State(state): State<ApiState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AssistantError> {
    let assistant = state.try_get_slice::<Assistant>()?;

    if request.message.trim().is_empty() {
        return Err(AssistantError::Validation("Message must not be empty".into()));
    }
    if request.message.len() > assistant.max_message_bytes {
        return Err(AssistantError::Validation(format!(
            "Message exceeds {} bytes",
            assistant.max_message_bytes
        )));
    }

    let response = chat_reply(&assistant.mirror, &request.message).await?;
    Ok(Json(response))
}

#[utoipa::path(
    get,
    path = "/api/assistant/cache",
    tag = ASSISTANT_TAG,
    responses(
        (status = 200, description = "Per-key mirror presence and record counts", body = MirrorStatusResponse),
    )
)]
async fn cache_status(
    State(state): State<ApiState>,
) -> Result<Json<MirrorStatusResponse>, AssistantError> {
    let assistant = state.try_get_slice::<Assistant>()?;
    Ok(Json(assistant.mirror.status()))
}

#[utoipa::path(
    post,
    path = "/api/assistant/cache/refresh",
    tag = ASSISTANT_TAG,
    responses(
        (status = 200, description = "Mirror refreshed; returns the new status", body = MirrorStatusResponse),
    )
)]
async fn refresh_cache(
    State(state): State<ApiState>,
) -> Result<Json<MirrorStatusResponse>, AssistantError> {
    let assistant = state.try_get_slice::<Assistant>()?;
    let refreshed = assistant.mirror.refresh_all().await;
    tracing::info!(refreshed, "Assistant mirror refreshed on demand");
    Ok(Json(assistant.mirror.status()))
}
