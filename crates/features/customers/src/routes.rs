use crate::error::CustomersError;
use crate::models::{
    AddressResponse, CreateCustomerRequest, CustomerDetailResponse, CustomerResponse, NewAddress,
    UpdateCustomerRequest,
};
use crate::repository;
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use ihub_domain::constants::CUSTOMERS_TAG;
use ihub_kernel::prelude::{ApiState, ChangeAction, EntityChanged, EntityKind, ListParams};
use tracing::warn;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(list_customers, create_customer))
        .routes(routes!(get_customer, update_customer, delete_customer))
        .routes(routes!(add_address))
        .routes(routes!(remove_address))
}

fn publish_change(state: &ApiState, id: &str, action: ChangeAction) {
    if let Err(error) = state.events.publish(EntityChanged::new(EntityKind::Customer, id, action))
    {
        warn!(%error, "Failed to publish customer change event");
    }
}

#[utoipa::path(
    get,
    path = "/api/customers",
    tag = CUSTOMERS_TAG,
    params(ListParams),
    responses(
        (status = 200, description = "Customers ordered by name", body = [CustomerResponse]),
    )
)]
async fn list_customers(
    State(state): State<ApiState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<CustomerResponse>>, CustomersError> {
    let (limit, start) = params.effective();
    let customers = repository::list_customers(&state.database, limit, start).await?;
    Ok(Json(customers))
}

#[utoipa::path(
    post,
    path = "/api/customers",
    tag = CUSTOMERS_TAG,
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerDetailResponse),
        (status = 400, description = "Invalid payload or empty address list"),
    )
)]
async fn create_customer(
    State(state): State<ApiState>,
    Json(request): Json<CreateCustomerRequest>,
) -> Result<impl IntoResponse, CustomersError> {
    let customer = repository::create_customer(&state.database, request).await?;
    publish_change(&state, &customer.id, ChangeAction::Created);
    Ok((StatusCode::CREATED, Json(customer)))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}",
    tag = CUSTOMERS_TAG,
    params(("id" = String, Path, description = "Customer ID")),
    responses(
        (status = 200, description = "Customer with addresses", body = CustomerDetailResponse),
        (status = 404, description = "Customer not found"),
    )
)]
async fn get_customer(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<CustomerDetailResponse>, CustomersError> {
    let customer = repository::get_customer(&state.database, &id).await?;
    Ok(Json(customer))
}

#[utoipa::path(
    put,
    path = "/api/customers/{id}",
    tag = CUSTOMERS_TAG,
    params(("id" = String, Path, description = "Customer ID")),
    request_body = UpdateCustomerRequest,
    responses(
        (status = 200, description = "Customer updated", body = CustomerDetailResponse),
        (status = 404, description = "Customer not found"),
    )
)]
async fn update_customer(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateCustomerRequest>,
) -> Result<Json<CustomerDetailResponse>, CustomersError> {
    let customer = repository::update_customer(&state.database, &id, request).await?;
    publish_change(&state, &customer.id, ChangeAction::Updated);
    Ok(Json(customer))
}

#[utoipa::path(
    delete,
    path = "/api/customers/{id}",
    tag = CUSTOMERS_TAG,
    params(("id" = String, Path, description = "Customer ID")),
    responses(
        (status = 204, description = "Customer and addresses deleted"),
        (status = 404, description = "Customer not found"),
        (status = 409, description = "Customer is still referenced by a contract"),
    )
)]
async fn delete_customer(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, CustomersError> {
    repository::delete_customer(&state.database, &id).await?;
    publish_change(&state, &id, ChangeAction::Deleted);
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/customers/{id}/addresses",
    tag = CUSTOMERS_TAG,
    params(("id" = String, Path, description = "Customer ID")),
    request_body = NewAddress,
    responses(
        (status = 201, description = "Address added", body = AddressResponse),
        (status = 404, description = "Customer not found"),
    )
)]
async fn add_address(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(request): Json<NewAddress>,
) -> Result<impl IntoResponse, CustomersError> {
    let address = repository::add_address(&state.database, &id, request).await?;
    publish_change(&state, &id, ChangeAction::Updated);
    Ok((StatusCode::CREATED, Json(address)))
}

#[utoipa::path(
    delete,
    path = "/api/customers/{id}/addresses/{address_id}",
    tag = CUSTOMERS_TAG,
    params(
        ("id" = String, Path, description = "Customer ID"),
        ("address_id" = String, Path, description = "Address ID"),
    ),
    responses(
        (status = 204, description = "Address removed"),
        (status = 404, description = "Customer or address not found"),
        (status = 409, description = "The last address cannot be removed"),
    )
)]
async fn remove_address(
    State(state): State<ApiState>,
    Path((id, address_id)): Path<(String, String)>,
) -> Result<StatusCode, CustomersError> {
    repository::remove_address(&state.database, &id, &address_id).await?;
    publish_change(&state, &id, ChangeAction::Updated);
    Ok(StatusCode::NO_CONTENT)
}
