//! User management API handlers
//!
//! Create and update accept JSON or multipart bodies; a multipart `avatar`
//! part becomes the profile avatar. Delegates to `UserService`.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateUserRequest, ListUsersParams, UpdateUserRequest, UserDto};
use crate::application::UserService;
use crate::infrastructure::database::repositories::UserRepository;
use crate::interfaces::http::common::{
    ApiResponse, ApiResult, FormPayload, PaginatedResponse, RequestContext,
};

/// User handler state, concrete over `UserRepository` for Axum compatibility.
#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService<UserRepository>>,
}

const AVATAR_FIELD: &str = "avatar";

#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "Users",
    params(ListUsersParams),
    responses(
        (status = 200, description = "User list", body = PaginatedResponse<UserDto>)
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    ctx: RequestContext,
    Query(params): Query<ListUsersParams>,
) -> ApiResult<Json<PaginatedResponse<UserDto>>> {
    let result = state.user_service.list_users(params.into()).await?;
    Ok(Json(PaginatedResponse::from_result(result, |u| {
        UserDto::render(&u, &ctx)
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    ctx: RequestContext,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    let user = state.user_service.get_user(id).await?;
    Ok(Json(ApiResponse::success(UserDto::render(&user, &ctx))))
}

#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    ctx: RequestContext,
    mut payload: FormPayload<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<UserDto>>)> {
    let avatar = payload.take_file(AVATAR_FIELD);
    let dto = payload.data.into_dto()?;

    let user = state.user_service.create_user(dto, avatar).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UserDto::render(&user, &ctx))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User replaced", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found")
    )
)]
pub async fn replace_user(
    State(state): State<UserHandlerState>,
    ctx: RequestContext,
    Path(id): Path<i32>,
    payload: FormPayload<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    apply_update(&state, &ctx, id, payload, false).await
}

#[utoipa::path(
    patch,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<UserDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    ctx: RequestContext,
    Path(id): Path<i32>,
    payload: FormPayload<UpdateUserRequest>,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    apply_update(&state, &ctx, id, payload, true).await
}

async fn apply_update(
    state: &UserHandlerState,
    ctx: &RequestContext,
    id: i32,
    mut payload: FormPayload<UpdateUserRequest>,
    partial: bool,
) -> ApiResult<Json<ApiResponse<UserDto>>> {
    let avatar = payload.take_file(AVATAR_FIELD);
    let user = state
        .user_service
        .update_user(id, payload.data.into(), avatar, partial)
        .await?;
    Ok(Json(ApiResponse::success(UserDto::render(&user, ctx))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.user_service.delete_user(id).await?;
    Ok(Json(ApiResponse::success(())))
}
