use async_trait::async_trait;

use super::{CreateTaskDto, GetTaskDto, TaskWithRelations, UpdateTaskDto};
use crate::support::errors::AppResult;
use crate::support::pagination::PaginatedResult;

#[async_trait]
pub trait TaskRepositoryInterface: Send + Sync {
    async fn create_task(&self, dto: CreateTaskDto) -> AppResult<TaskWithRelations>;
    async fn list_tasks(&self, dto: GetTaskDto) -> AppResult<PaginatedResult<TaskWithRelations>>;
    /// Tasks of each given project, ordered by task id.
    async fn list_tasks_for_projects(&self, project_ids: &[i32]) -> AppResult<Vec<TaskWithRelations>>;
    async fn get_task_by_id(&self, id: i32) -> AppResult<Option<TaskWithRelations>>;
    async fn update_task(&self, id: i32, dto: UpdateTaskDto) -> AppResult<Option<TaskWithRelations>>;
    async fn delete_task(&self, id: i32) -> AppResult<()>;
}
