use crate::error::ChecklistsError;
use crate::models::{ChecklistRequest, ChecklistResponse, ChecklistSummary};
use crate::repository;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use ihub_domain::constants::CHECKLISTS_TAG;
use ihub_kernel::prelude::{ApiState, ChangeAction, EntityChanged, EntityKind, ListParams};
use tracing::warn;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(list_checklists, create_checklist))
        .routes(routes!(get_checklist, update_checklist, delete_checklist))
}

fn publish_change(state: &ApiState, id: &str, action: ChangeAction) {
    if let Err(error) = state.events.publish(EntityChanged::new(EntityKind::Checklist, id, action))
    {
        warn!(%error, "Failed to publish checklist change event");
    }
}

#[utoipa::path(
    get,
    path = "/api/checklists",
    tag = CHECKLISTS_TAG,
    params(ListParams),
    responses(
        (status = 200, description = "Checklist summaries ordered by name", body = [ChecklistSummary]),
    )
)]
async fn list_checklists(
    State(state): State<ApiState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<ChecklistSummary>>, ChecklistsError> {
    let (limit, start) = params.effective();
    let checklists = repository::list_checklists(&state.database, limit, start).await?;
    Ok(Json(checklists))
}

#[utoipa::path(
    post,
    path = "/api/checklists",
    tag = CHECKLISTS_TAG,
    request_body = ChecklistRequest,
    responses(
        (status = 201, description = "Checklist created", body = ChecklistResponse),
        (status = 400, description = "Invalid payload"),
    )
)]
async fn create_checklist(
    State(state): State<ApiState>,
    Json(request): Json<ChecklistRequest>,
) -> Result<impl IntoResponse, ChecklistsError> {
    let checklist = repository::create_checklist(&state.database, request).await?;
    publish_change(&state, &checklist.id, ChangeAction::Created);
    Ok((StatusCode::CREATED, Json(checklist)))
}

#[utoipa::path(
    get,
    path = "/api/checklists/{id}",
    tag = CHECKLISTS_TAG,
    params(("id" = String, Path, description = "Checklist ID")),
    responses(
        (status = 200, description = "Checklist with nested locations and tasks", body = ChecklistResponse),
        (status = 404, description = "Checklist not found"),
    )
)]
async fn get_checklist(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ChecklistResponse>, ChecklistsError> {
    let checklist = repository::get_checklist(&state.database, &id).await?;
    Ok(Json(checklist))
}

#[utoipa::path(
    put,
    path = "/api/checklists/{id}",
    tag = CHECKLISTS_TAG,
    params(("id" = String, Path, description = "Checklist ID")),
    request_body = ChecklistRequest,
    responses(
        (status = 200, description = "Checklist replaced", body = ChecklistResponse),
        (status = 404, description = "Checklist not found"),
    )
)]
async fn update_checklist(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(request): Json<ChecklistRequest>,
) -> Result<Json<ChecklistResponse>, ChecklistsError> {
    let checklist = repository::update_checklist(&state.database, &id, request).await?;
    publish_change(&state, &checklist.id, ChangeAction::Updated);
    Ok(Json(checklist))
}

#[utoipa::path(
    delete,
    path = "/api/checklists/{id}",
    tag = CHECKLISTS_TAG,
    params(("id" = String, Path, description = "Checklist ID")),
    responses(
        (status = 204, description = "Checklist deleted"),
        (status = 404, description = "Checklist not found"),
        (status = 409, description = "Checklist is still referenced by a contract"),
    )
)]
async fn delete_checklist(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ChecklistsError> {
    repository::delete_checklist(&state.database, &id).await?;
    publish_change(&state, &id, ChangeAction::Deleted);
    Ok(StatusCode::NO_CONTENT)
}
