use async_trait::async_trait;

use super::{CreateProjectDto, GetProjectDto, Project, UpdateProjectDto};
use crate::support::errors::AppResult;
use crate::support::pagination::PaginatedResult;

#[async_trait]
pub trait ProjectRepositoryInterface: Send + Sync {
    async fn create_project(&self, dto: CreateProjectDto) -> AppResult<Project>;
    async fn list_projects(&self, dto: GetProjectDto) -> AppResult<PaginatedResult<Project>>;
    async fn get_project_by_id(&self, id: i32) -> AppResult<Option<Project>>;
    async fn project_exists(&self, id: i32) -> AppResult<bool>;
    async fn update_project(&self, id: i32, dto: UpdateProjectDto) -> AppResult<Option<Project>>;
    /// Removes the project and, through the foreign key, its tasks.
    async fn delete_project(&self, id: i32) -> AppResult<()>;
}
