use crate::support::pagination::PageRequest;

#[derive(Debug, Clone)]
pub struct CreateTaskDto {
    pub title: String,
    pub description: String,
    pub project_id: i32,
    pub assigned_to_id: i32,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateTaskDto {
    pub title: Option<String>,
    pub description: Option<String>,
    pub project_id: Option<i32>,
    pub assigned_to_id: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct GetTaskDto {
    pub project_id: Option<i32>,
    pub assigned_to_id: Option<i32>,
    pub page: PageRequest,
}
