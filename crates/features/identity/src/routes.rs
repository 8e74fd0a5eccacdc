use crate::error::IdentityError;
use crate::extract::AuthUser;
use crate::models::{
    CreateUserRequest, LoginRequest, LoginResponse, UpdateUserRequest, UserResponse,
};
use crate::{Identity, repository};
use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use ihub_domain::constants::IDENTITY_TAG;
use ihub_kernel::prelude::{ApiState, ChangeAction, EntityChanged, EntityKind, ListParams};
use tracing::warn;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

pub fn router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new()
        .routes(routes!(list_users, create_user))
        .routes(routes!(get_user, update_user, delete_user))
        .routes(routes!(login))
        .routes(routes!(me))
}

fn publish_change(state: &ApiState, id: &str, action: ChangeAction) {
    if let Err(error) = state.events.publish(EntityChanged::new(EntityKind::User, id, action)) {
        warn!(%error, "Failed to publish user change event");
    }
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = IDENTITY_TAG,
    params(ListParams),
    responses(
        (status = 200, description = "Users ordered by name", body = [UserResponse]),
    )
)]
async fn list_users(
    State(state): State<ApiState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<UserResponse>>, IdentityError> {
    let (limit, start) = params.effective();
    let users = repository::list_users(&state.database, limit, start).await?;
    Ok(Json(users))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = IDENTITY_TAG,
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Invalid payload"),
        (status = 409, description = "Email already in use"),
    )
)]
async fn create_user(
    State(state): State<ApiState>,
    Json(request): Json<CreateUserRequest>,
) -> Result<impl IntoResponse, IdentityError> {
    let user = repository::create_user(&state.database, request).await?;
    publish_change(&state, &user.id, ChangeAction::Created);
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = IDENTITY_TAG,
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User detail", body = UserResponse),
        (status = 404, description = "User not found"),
    )
)]
async fn get_user(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<Json<UserResponse>, IdentityError> {
    let user = repository::get_user(&state.database, &id).await?;
    Ok(Json(user))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = IDENTITY_TAG,
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 404, description = "User not found"),
        (status = 409, description = "Email already in use"),
    )
)]
async fn update_user(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>, IdentityError> {
    let user = repository::update_user(&state.database, &id, request).await?;
    publish_change(&state, &user.id, ChangeAction::Updated);
    Ok(Json(user))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = IDENTITY_TAG,
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 404, description = "User not found"),
        (status = 409, description = "User is still assigned to a work order"),
    )
)]
async fn delete_user(
    State(state): State<ApiState>,
    Path(id): Path<String>,
) -> Result<StatusCode, IdentityError> {
    repository::delete_user(&state.database, &id).await?;
    publish_change(&state, &id, ChangeAction::Deleted);
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = IDENTITY_TAG,
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Bearer token issued", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
    )
)]
async fn login(
    State(state): State<ApiState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, IdentityError> {
    let user =
        repository::authenticate(&state.database, &request.email, &request.password).await?;

    let identity = state
        .get_slice::<Identity>()
        .ok_or_else(|| IdentityError::Unauthorized("Identity slice not registered".into()))?;
    let token = identity.tokens.issue(&user.id, user.role)?;

    Ok(Json(LoginResponse { token, user }))
}

#[utoipa::path(
    get,
    path = "/api/auth/me",
    tag = IDENTITY_TAG,
    responses(
        (status = 200, description = "The authenticated user", body = UserResponse),
        (status = 401, description = "Missing or invalid bearer token"),
    )
)]
async fn me(
    State(state): State<ApiState>,
    auth: AuthUser,
) -> Result<Json<UserResponse>, IdentityError> {
    let user = repository::get_user(&state.database, &auth.id).await?;
    Ok(Json(user))
}
