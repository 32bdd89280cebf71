//! Task API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateTaskRequest, ListTasksParams, TaskDto, UpdateTaskRequest};
use crate::application::TaskService;
use crate::interfaces::http::common::{ApiResponse, ApiResult, FormPayload, PaginatedResponse};

#[derive(Clone)]
pub struct TaskHandlerState {
    pub task_service: Arc<TaskService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/tasks",
    tag = "Tasks",
    params(ListTasksParams),
    responses(
        (status = 200, description = "Task list", body = PaginatedResponse<TaskDto>)
    )
)]
pub async fn list_tasks(
    State(state): State<TaskHandlerState>,
    Query(params): Query<ListTasksParams>,
) -> ApiResult<Json<PaginatedResponse<TaskDto>>> {
    let result = state.task_service.list_tasks(params.into()).await?;
    Ok(Json(PaginatedResponse::from_result(result, TaskDto::from)))
}

#[utoipa::path(
    get,
    path = "/api/v1/tasks/{id}",
    tag = "Tasks",
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task details", body = ApiResponse<TaskDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_task(
    State(state): State<TaskHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<TaskDto>>> {
    let task = state.task_service.get_task(id).await?;
    Ok(Json(ApiResponse::success(TaskDto::from(task))))
}

#[utoipa::path(
    post,
    path = "/api/v1/tasks",
    tag = "Tasks",
    request_body = CreateTaskRequest,
    responses(
        (status = 201, description = "Task created", body = ApiResponse<TaskDto>),
        (status = 400, description = "Validation error, including unknown project or assignee")
    )
)]
pub async fn create_task(
    State(state): State<TaskHandlerState>,
    payload: FormPayload<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<TaskDto>>)> {
    let task = state.task_service.create_task(payload.data.into_dto()?).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(TaskDto::from(task)))))
}

#[utoipa::path(
    put,
    path = "/api/v1/tasks/{id}",
    tag = "Tasks",
    params(("id" = i32, Path, description = "Task ID")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task replaced", body = ApiResponse<TaskDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found")
    )
)]
pub async fn replace_task(
    State(state): State<TaskHandlerState>,
    Path(id): Path<i32>,
    payload: FormPayload<UpdateTaskRequest>,
) -> ApiResult<Json<ApiResponse<TaskDto>>> {
    let task = state.task_service.update_task(id, payload.data.into(), false).await?;
    Ok(Json(ApiResponse::success(TaskDto::from(task))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/tasks/{id}",
    tag = "Tasks",
    params(("id" = i32, Path, description = "Task ID")),
    request_body = UpdateTaskRequest,
    responses(
        (status = 200, description = "Task updated", body = ApiResponse<TaskDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_task(
    State(state): State<TaskHandlerState>,
    Path(id): Path<i32>,
    payload: FormPayload<UpdateTaskRequest>,
) -> ApiResult<Json<ApiResponse<TaskDto>>> {
    let task = state.task_service.update_task(id, payload.data.into(), true).await?;
    Ok(Json(ApiResponse::success(TaskDto::from(task))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tasks/{id}",
    tag = "Tasks",
    params(("id" = i32, Path, description = "Task ID")),
    responses(
        (status = 200, description = "Task deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_task(
    State(state): State<TaskHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.task_service.delete_task(id).await?;
    Ok(Json(ApiResponse::success(())))
}
