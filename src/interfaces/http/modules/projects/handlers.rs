//! Project API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateProjectRequest, ListProjectsParams, ProjectDto, UpdateProjectRequest};
use crate::application::ProjectService;
use crate::interfaces::http::common::{ApiResponse, ApiResult, FormPayload, PaginatedResponse};

#[derive(Clone)]
pub struct ProjectHandlerState {
    pub project_service: Arc<ProjectService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/projects",
    tag = "Projects",
    params(ListProjectsParams),
    responses(
        (status = 200, description = "Project list, each with its tasks", body = PaginatedResponse<ProjectDto>)
    )
)]
pub async fn list_projects(
    State(state): State<ProjectHandlerState>,
    Query(params): Query<ListProjectsParams>,
) -> ApiResult<Json<PaginatedResponse<ProjectDto>>> {
    let result = state.project_service.list_projects(params.into()).await?;
    Ok(Json(PaginatedResponse::from_result(result, ProjectDto::from)))
}

#[utoipa::path(
    get,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project with tasks", body = ApiResponse<ProjectDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_project(
    State(state): State<ProjectHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<ProjectDto>>> {
    let project = state.project_service.get_project(id).await?;
    Ok(Json(ApiResponse::success(ProjectDto::from(project))))
}

#[utoipa::path(
    post,
    path = "/api/v1/projects",
    tag = "Projects",
    request_body = CreateProjectRequest,
    responses(
        (status = 201, description = "Project created", body = ApiResponse<ProjectDto>),
        (status = 400, description = "Validation error")
    )
)]
pub async fn create_project(
    State(state): State<ProjectHandlerState>,
    payload: FormPayload<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ProjectDto>>)> {
    let project = state.project_service.create_project(payload.data.into_dto()?).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(ProjectDto::from(project)))))
}

#[utoipa::path(
    put,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    params(("id" = i32, Path, description = "Project ID")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project replaced", body = ApiResponse<ProjectDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found")
    )
)]
pub async fn replace_project(
    State(state): State<ProjectHandlerState>,
    Path(id): Path<i32>,
    payload: FormPayload<UpdateProjectRequest>,
) -> ApiResult<Json<ApiResponse<ProjectDto>>> {
    let project = state.project_service.update_project(id, payload.data.into(), false).await?;
    Ok(Json(ApiResponse::success(ProjectDto::from(project))))
}

#[utoipa::path(
    patch,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    params(("id" = i32, Path, description = "Project ID")),
    request_body = UpdateProjectRequest,
    responses(
        (status = 200, description = "Project updated", body = ApiResponse<ProjectDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_project(
    State(state): State<ProjectHandlerState>,
    Path(id): Path<i32>,
    payload: FormPayload<UpdateProjectRequest>,
) -> ApiResult<Json<ApiResponse<ProjectDto>>> {
    let project = state.project_service.update_project(id, payload.data.into(), true).await?;
    Ok(Json(ApiResponse::success(ProjectDto::from(project))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/projects/{id}",
    tag = "Projects",
    params(("id" = i32, Path, description = "Project ID")),
    responses(
        (status = 200, description = "Project and its tasks deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_project(
    State(state): State<ProjectHandlerState>,
    Path(id): Path<i32>,
) -> ApiResult<Json<ApiResponse<()>>> {
    state.project_service.delete_project(id).await?;
    Ok(Json(ApiResponse::success(())))
}
