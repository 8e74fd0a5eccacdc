use crate::error::ContractsError;
use crate::models::{
    ContractListParams, ContractResponse, ContractStatusRequest, CreateContractRequest,
    UpdateContractRequest,
};
use crate::repository;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use ihub_domain::constants::CONTRACTS_TAG;
use ihub_kernel::prelude::{ApiState, ChangeAction, EntityChanged, EntityKind, ListParams};
use tracing::warn;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(list_contracts, create_contract))
        .routes(routes!(get_contract, update_contract, delete_contract))
        .routes(routes!(transition_contract))
}

fn publish_change(state: &ApiState, id: &str, action: ChangeAction) {
    if let Err(error) = state.events.publish(EntityChanged::new(EntityKind::Contract, id, action))
    {
        warn!(%error, "Failed to publish contract change event");
    }
}

#[utoipa::path(
    get,
    path = "/api/contracts",
    tag = CONTRACTS_TAG,
    params(ContractListParams),
    responses(
        (status = 200, description = "Contracts, newest first", body = [ContractResponse]),
    )
)]
async fn list_contracts(
    State(state): State<ApiState>,
    Query(params): Query<ContractListParams>,
) -> Result<Json<Vec<ContractResponse>>, ContractsError> {
    let (limit, start) =
        ListParams { limit: params.limit, start: params.start }.effective();
    let contracts = repository::list_contracts(
        &state.database,
        limit,
        start,
        params.status,
        params.customer,
    )
    .await?;
    Ok(Json(contracts))
}

#[utoipa::path(
    post,
    path = "/api/contracts",
    tag = CONTRACTS_TAG,
    request_body = CreateContractRequest,
    responses(
        (status = 201, description = "Contract created as draft", body = ContractResponse),
        (status = 400, description = "Invalid payload or missing reference"),
    )
)]
async fn create_contract(
    State(state): State<ApiState>,
    Json(request): Json<CreateContractRequest>,
) -> Result<impl IntoResponse, ContractsError> {
    let contract = repository::create_contract(&state.database, request).await?;
    publish_change(&state, &contract.id, ChangeAction::Created);
    Ok((StatusCode::CREATED, Json(contract)))
}

#[utoipa::path(
    get,
    path = "/api/contracts/{id}",
    tag = CONTRACTS_TAG,
    params(("id" = String, Path, description = "Contract ID")),
    responses(
        (status = 200, description = "Contract detail", body = ContractResponse),
        (status = 404, description = "Contract not found"),
    )
)]
async fn get_contract(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<ContractResponse>, ContractsError> {
    let contract = repository::get_contract(&state.database, &id).await?;
    Ok(Json(contract))
}

#[utoipa::path(
    put,
    path = "/api/contracts/{id}",
    tag = CONTRACTS_TAG,
    params(("id" = String, Path, description = "Contract ID")),
    request_body = UpdateContractRequest,
    responses(
        (status = 200, description = "Contract updated", body = ContractResponse),
        (status = 404, description = "Contract not found"),
        (status = 409, description = "Edit not allowed in the current status"),
    )
)]
async fn update_contract(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateContractRequest>,
) -> Result<Json<ContractResponse>, ContractsError> {
    let contract = repository::update_contract(&state.database, &id, request).await?;
    publish_change(&state, &contract.id, ChangeAction::Updated);
    Ok(Json(contract))
}

#[utoipa::path(
    post,
    path = "/api/contracts/{id}/status",
    tag = CONTRACTS_TAG,
    params(("id" = String, Path, description = "Contract ID")),
    request_body = ContractStatusRequest,
    responses(
        (status = 200, description = "Status transition applied", body = ContractResponse),
        (status = 404, description = "Contract not found"),
        (status = 409, description = "Transition outside the lifecycle graph"),
    )
)]
async fn transition_contract(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(request): Json<ContractStatusRequest>,
) -> Result<Json<ContractResponse>, ContractsError> {
    let contract = repository::transition_contract(&state.database, &id, request.status).await?;
    publish_change(&state, &contract.id, ChangeAction::Updated);
    Ok(Json(contract))
}

#[utoipa::path(
    delete,
    path = "/api/contracts/{id}",
    tag = CONTRACTS_TAG,
    params(("id" = String, Path, description = "Contract ID")),
    responses(
        (status = 204, description = "Contract deleted"),
        (status = 404, description = "Contract not found"),
        (status = 409, description = "Contract is still referenced by a work order"),
    )
)]
async fn delete_contract(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ContractsError> {
    repository::delete_contract(&state.database, &id).await?;
    publish_change(&state, &id, ChangeAction::Deleted);
    Ok(StatusCode::NO_CONTENT)
}
