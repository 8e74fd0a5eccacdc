use crate::error::WorkOrdersError;
use crate::models::{
    CreateWorkOrderRequest, EntryRequest, UpdateWorkOrderRequest, WorkOrderListParams,
    WorkOrderResponse, WorkOrderStatusRequest,
};
use crate::repository;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use ihub_domain::constants::WORK_ORDERS_TAG;
use ihub_kernel::prelude::{ApiState, ChangeAction, EntityChanged, EntityKind, ListParams};
use tracing::warn;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(list_work_orders, create_work_order))
        .routes(routes!(get_work_order, update_work_order, delete_work_order))
        .routes(routes!(add_entry))
        .routes(routes!(transition_work_order))
}

fn publish_change(state: &ApiState, id: &str, action: ChangeAction) {
    if let Err(error) =
        state.events.publish(EntityChanged::new(EntityKind::WorkOrder, id, action))
    {
        warn!(%error, "Failed to publish work order change event");
    }
}

#[utoipa::path(
    get,
    path = "/api/work-orders",
    tag = WORK_ORDERS_TAG,
    params(WorkOrderListParams),
    responses(
        (status = 200, description = "Work orders, soonest first", body = [WorkOrderResponse]),
    )
)]
async fn list_work_orders(
    State(state): State<ApiState>,
    Query(params): Query<WorkOrderListParams>,
) -> Result<Json<Vec<WorkOrderResponse>>, WorkOrdersError> {
    let (limit, start) =
        ListParams { limit: params.limit, start: params.start }.effective();
    let work_orders = repository::list_work_orders(
        &state.database,
        limit,
        start,
        params.status,
        params.inspector,
        params.date,
    )
    .await?;
    Ok(Json(work_orders))
}

#[utoipa::path(
    post,
    path = "/api/work-orders",
    tag = WORK_ORDERS_TAG,
    request_body = CreateWorkOrderRequest,
    responses(
        (status = 201, description = "Work order scheduled", body = WorkOrderResponse),
        (status = 400, description = "Invalid payload or missing reference"),
        (status = 409, description = "Contract is not active"),
    )
)]
async fn create_work_order(
    State(state): State<ApiState>,
    Json(request): Json<CreateWorkOrderRequest>,
) -> Result<impl IntoResponse, WorkOrdersError> {
    let work_order = repository::create_work_order(&state.database, request).await?;
    publish_change(&state, &work_order.id, ChangeAction::Created);
    Ok((StatusCode::CREATED, Json(work_order)))
}

#[utoipa::path(
    get,
    path = "/api/work-orders/{id}",
    tag = WORK_ORDERS_TAG,
    params(("id" = String, Path, description = "Work order ID")),
    responses(
        (status = 200, description = "Work order with entries", body = WorkOrderResponse),
        (status = 404, description = "Work order not found"),
    )
)]
async fn get_work_order(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<WorkOrderResponse>, WorkOrdersError> {
    let work_order = repository::get_work_order(&state.database, &id).await?;
    Ok(Json(work_order))
}

#[utoipa::path(
    put,
    path = "/api/work-orders/{id}",
    tag = WORK_ORDERS_TAG,
    params(("id" = String, Path, description = "Work order ID")),
    request_body = UpdateWorkOrderRequest,
    responses(
        (status = 200, description = "Work order updated", body = WorkOrderResponse),
        (status = 404, description = "Work order not found"),
        (status = 409, description = "Work order reached a terminal status"),
    )
)]
async fn update_work_order(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateWorkOrderRequest>,
) -> Result<Json<WorkOrderResponse>, WorkOrdersError> {
    let work_order = repository::update_work_order(&state.database, &id, request).await?;
    publish_change(&state, &work_order.id, ChangeAction::Updated);
    Ok(Json(work_order))
}

#[utoipa::path(
    post,
    path = "/api/work-orders/{id}/entries",
    tag = WORK_ORDERS_TAG,
    params(("id" = String, Path, description = "Work order ID")),
    request_body = EntryRequest,
    responses(
        (status = 201, description = "Entry recorded", body = WorkOrderResponse),
        (status = 404, description = "Work order not found"),
        (status = 409, description = "Work order is not in progress"),
    )
)]
async fn add_entry(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(request): Json<EntryRequest>,
) -> Result<impl IntoResponse, WorkOrdersError> {
    let work_order = repository::add_entry(&state.database, &id, request).await?;
    publish_change(&state, &work_order.id, ChangeAction::Updated);
    Ok((StatusCode::CREATED, Json(work_order)))
}

#[utoipa::path(
    post,
    path = "/api/work-orders/{id}/status",
    tag = WORK_ORDERS_TAG,
    params(("id" = String, Path, description = "Work order ID")),
    request_body = WorkOrderStatusRequest,
    responses(
        (status = 200, description = "Status transition applied", body = WorkOrderResponse),
        (status = 404, description = "Work order not found"),
        (status = 409, description = "Transition outside the lifecycle graph or no entries recorded"),
    )
)]
async fn transition_work_order(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(request): Json<WorkOrderStatusRequest>,
) -> Result<Json<WorkOrderResponse>, WorkOrdersError> {
    let work_order =
        repository::transition_work_order(&state.database, &id, request.status).await?;
    publish_change(&state, &work_order.id, ChangeAction::Updated);
    Ok(Json(work_order))
}

#[utoipa::path(
    delete,
    path = "/api/work-orders/{id}",
    tag = WORK_ORDERS_TAG,
    params(("id" = String, Path, description = "Work order ID")),
    responses(
        (status = 204, description = "Work order deleted"),
        (status = 404, description = "Work order not found"),
        (status = 409, description = "Work order is still referenced by a report"),
    )
)]
async fn delete_work_order(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, WorkOrdersError> {
    repository::delete_work_order(&state.database, &id).await?;
    publish_change(&state, &id, ChangeAction::Deleted);
    Ok(StatusCode::NO_CONTENT)
}
