//! Task DTOs
//!
//! Reads go through two stages: [`TaskDto::from`] copies the stored row,
//! identifiers included, and [`TaskDto::with_display_names`] then swaps the
//! `assigned_to` and `project` identifiers for the username and project name.

use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::rules::REQUIRED;
use crate::domain::{CreateTaskDto, FieldErrors, GetTaskDto, Task, TaskWithRelations, UpdateTaskDto};
use crate::support::pagination::PageRequest;

/// A reference to another row: its id, or its display name once resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum RelatedRef {
    Id(i32),
    Name(String),
}

/// Task API representation
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TaskDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Project name
    pub project: RelatedRef,
    /// Assignee username
    pub assigned_to: RelatedRef,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskDto {
    fn from(t: &Task) -> Self {
        Self {
            id: t.id,
            title: t.title.clone(),
            description: t.description.clone(),
            project: RelatedRef::Id(t.project_id),
            assigned_to: RelatedRef::Id(t.assigned_to_id),
            created_at: t.created_at,
            updated_at: t.updated_at,
        }
    }
}

impl TaskDto {
    /// Replace each identifier whose related row was loaded by its name.
    pub fn with_display_names(mut self, assignee: Option<&str>, project: Option<&str>) -> Self {
        if let Some(username) = assignee {
            self.assigned_to = RelatedRef::Name(username.to_string());
        }
        if let Some(name) = project {
            self.project = RelatedRef::Name(name.to_string());
        }
        self
    }
}

impl From<&TaskWithRelations> for TaskDto {
    fn from(t: &TaskWithRelations) -> Self {
        TaskDto::from(&t.task)
            .with_display_names(t.assignee_username.as_deref(), t.project_name.as_deref())
    }
}

impl From<TaskWithRelations> for TaskDto {
    fn from(t: TaskWithRelations) -> Self {
        TaskDto::from(&t)
    }
}

/// A primary key sent as a number or, from form bodies, as its decimal text.
fn deserialize_pk<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Pk {
        Number(i32),
        Text(String),
    }

    match Option::<Pk>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Pk::Number(id)) => Ok(Some(id)),
        Some(Pk::Text(text)) => text.trim().parse().map(Some).map_err(|_| {
            D::Error::custom("Incorrect type. Expected pk value, received str.")
        }),
    }
}

/// Create task request. `project` and `assigned_to` take ids.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateTaskRequest {
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub title: Option<String>,
    pub description: Option<String>,
    /// Project id
    #[serde(default, deserialize_with = "deserialize_pk")]
    pub project: Option<i32>,
    /// User id
    #[serde(default, deserialize_with = "deserialize_pk")]
    pub assigned_to: Option<i32>,
}

impl CreateTaskRequest {
    pub fn into_dto(self) -> Result<CreateTaskDto, FieldErrors> {
        let mut errors = FieldErrors::new();
        if self.title.is_none() {
            errors.add("title", REQUIRED);
        }
        if self.project.is_none() {
            errors.add("project", REQUIRED);
        }
        if self.assigned_to.is_none() {
            errors.add("assigned_to", REQUIRED);
        }
        match (self.title, self.project, self.assigned_to) {
            (Some(title), Some(project_id), Some(assigned_to_id)) if errors.is_empty() => {
                Ok(CreateTaskDto {
                    title,
                    description: self.description.unwrap_or_default(),
                    project_id,
                    assigned_to_id,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Update task request; absent fields are left unchanged on PATCH.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateTaskRequest {
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_pk")]
    pub project: Option<i32>,
    #[serde(default, deserialize_with = "deserialize_pk")]
    pub assigned_to: Option<i32>,
}

impl From<UpdateTaskRequest> for UpdateTaskDto {
    fn from(r: UpdateTaskRequest) -> Self {
        Self {
            title: r.title,
            description: r.description,
            project_id: r.project,
            assigned_to_id: r.assigned_to,
        }
    }
}

/// List tasks query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct ListTasksParams {
    /// Only tasks of this project id
    pub project: Option<i32>,
    /// Only tasks assigned to this user id
    pub assigned_to: Option<i32>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl From<ListTasksParams> for GetTaskDto {
    fn from(p: ListTasksParams) -> Self {
        Self {
            project_id: p.project,
            assigned_to_id: p.assigned_to,
            page: PageRequest::new(p.page, p.limit),
        }
    }
}
