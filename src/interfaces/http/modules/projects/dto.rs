//! Project DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::rules::REQUIRED;
use crate::domain::{CreateProjectDto, FieldErrors, GetProjectDto, ProjectWithTasks, UpdateProjectDto};
use crate::interfaces::http::modules::tasks::TaskDto;
use crate::support::pagination::PageRequest;

/// Project API representation with its tasks rendered as task reads.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProjectDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Read-only
    pub tasks: Vec<TaskDto>,
}

impl From<ProjectWithTasks> for ProjectDto {
    fn from(p: ProjectWithTasks) -> Self {
        let ProjectWithTasks { project, tasks } = p;
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            created_at: project.created_at,
            updated_at: project.updated_at,
            tasks: tasks.into_iter().map(TaskDto::from).collect(),
        }
    }
}

/// Create project request. A `tasks` key, if sent, is ignored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateProjectRequest {
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CreateProjectRequest {
    pub fn into_dto(self) -> Result<CreateProjectDto, FieldErrors> {
        let Some(name) = self.name else {
            return Err(FieldErrors::single("name", REQUIRED));
        };
        Ok(CreateProjectDto {
            name,
            description: self.description.unwrap_or_default(),
        })
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateProjectRequest {
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub name: Option<String>,
    pub description: Option<String>,
}

impl From<UpdateProjectRequest> for UpdateProjectDto {
    fn from(r: UpdateProjectRequest) -> Self {
        Self {
            name: r.name,
            description: r.description,
        }
    }
}

/// List projects query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListProjectsParams {
    /// Substring of the project name
    pub search: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl From<ListProjectsParams> for GetProjectDto {
    fn from(p: ListProjectsParams) -> Self {
        Self {
            search: p.search.filter(|s| !s.is_empty()),
            page: PageRequest::new(p.page, p.limit),
        }
    }
}
