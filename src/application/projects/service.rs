use std::collections::HashMap;
use std::sync::Arc;

use tracing::info;

use crate::application::rules::{check_text, PROJECT_NAME_MAX, REQUIRED};
use crate::domain::{
    AppResult, CreateProjectDto, DomainError, FieldErrors, GetProjectDto, Project,
    ProjectRepositoryInterface, ProjectWithTasks, TaskRepositoryInterface, TaskWithRelations,
    UpdateProjectDto,
};
use crate::support::pagination::PaginatedResult;

/// Projects are always returned together with their tasks.
pub struct ProjectService {
    projects: Arc<dyn ProjectRepositoryInterface>,
    tasks: Arc<dyn TaskRepositoryInterface>,
}

impl ProjectService {
    pub fn new(
        projects: Arc<dyn ProjectRepositoryInterface>,
        tasks: Arc<dyn TaskRepositoryInterface>,
    ) -> Self {
        Self { projects, tasks }
    }

    pub async fn create_project(&self, dto: CreateProjectDto) -> AppResult<ProjectWithTasks> {
        let mut errors = FieldErrors::new();
        check_text(&mut errors, "name", &dto.name, PROJECT_NAME_MAX);
        errors.into_result()?;

        let project = self.projects.create_project(dto).await?;
        info!(project_id = project.id, name = %project.name, "Project created");

        Ok(ProjectWithTasks {
            project,
            tasks: Vec::new(),
        })
    }

    /// The nested task list is read-only; only name and description change.
    pub async fn update_project(
        &self,
        id: i32,
        dto: UpdateProjectDto,
        partial: bool,
    ) -> AppResult<ProjectWithTasks> {
        if !self.projects.project_exists(id).await? {
            return Err(DomainError::not_found("Project", id).into());
        }

        let mut errors = FieldErrors::new();
        match dto.name.as_deref() {
            Some(name) => check_text(&mut errors, "name", name, PROJECT_NAME_MAX),
            None if !partial => errors.add("name", REQUIRED),
            None => {}
        }
        errors.into_result()?;

        let project = self
            .projects
            .update_project(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Project", id))?;

        self.with_tasks(project).await
    }

    pub async fn delete_project(&self, id: i32) -> AppResult<()> {
        self.projects.delete_project(id).await?;
        info!(project_id = id, "Project deleted");
        Ok(())
    }

    pub async fn get_project(&self, id: i32) -> AppResult<ProjectWithTasks> {
        let project = self
            .projects
            .get_project_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Project", id))?;

        self.with_tasks(project).await
    }

    /// One page of projects; tasks for the whole page are loaded in one go.
    pub async fn list_projects(
        &self,
        dto: GetProjectDto,
    ) -> AppResult<PaginatedResult<ProjectWithTasks>> {
        let page = self.projects.list_projects(dto).await?;

        let ids: Vec<i32> = page.items.iter().map(|p| p.id).collect();
        let mut by_project: HashMap<i32, Vec<TaskWithRelations>> = HashMap::new();
        for task in self.tasks.list_tasks_for_projects(&ids).await? {
            by_project.entry(task.task.project_id).or_default().push(task);
        }

        Ok(page.map(|project| ProjectWithTasks {
            tasks: by_project.remove(&project.id).unwrap_or_default(),
            project,
        }))
    }

    async fn with_tasks(&self, project: Project) -> AppResult<ProjectWithTasks> {
        let tasks = self.tasks.list_tasks_for_projects(&[project.id]).await?;
        Ok(ProjectWithTasks { project, tasks })
    }
}

#[cfg(test)]
mod tests {
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::domain::{CreateTaskDto, NewUser, UserRepositoryInterface};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::{init_database, DatabaseConfig};

    async fn setup() -> (ProjectService, SeaOrmRepositoryProvider) {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let repos = SeaOrmRepositoryProvider::new(db);
        let service = ProjectService::new(repos.projects(), repos.tasks());
        (service, repos)
    }

    fn project(name: &str) -> CreateProjectDto {
        CreateProjectDto {
            name: name.into(),
            description: String::new(),
        }
    }

    #[tokio::test]
    async fn project_lists_its_tasks_with_display_names() {
        let (service, repos) = setup().await;
        let bob = repos
            .users()
            .create_user(
                NewUser {
                    username: "bob".into(),
                    email: String::new(),
                    first_name: String::new(),
                    last_name: String::new(),
                    password_hash: "x".into(),
                },
                None,
            )
            .await
            .unwrap();
        let created = service.create_project(project("Backend")).await.unwrap();
        assert!(created.tasks.is_empty());

        for title in ["Schema", "Endpoints"] {
            repos
                .tasks()
                .create_task(CreateTaskDto {
                    title: title.into(),
                    description: String::new(),
                    project_id: created.project.id,
                    assigned_to_id: bob.id,
                })
                .await
                .unwrap();
        }

        let loaded = service.get_project(created.project.id).await.unwrap();
        assert_eq!(loaded.tasks.len(), 2);
        assert!(loaded
            .tasks
            .iter()
            .all(|t| t.assignee_username.as_deref() == Some("bob")
                && t.project_name.as_deref() == Some("Backend")));

        let other = service.create_project(project("Frontend")).await.unwrap();
        let page = service.list_projects(GetProjectDto::default()).await.unwrap();
        assert_eq!(page.total, 2);
        assert_eq!(page.items[0].tasks.len(), 2);
        assert_eq!(page.items[1].project.id, other.project.id);
        assert!(page.items[1].tasks.is_empty());
    }

    #[tokio::test]
    async fn blank_name_is_rejected() {
        let (service, _) = setup().await;
        let err = service.create_project(project("  ")).await.unwrap_err();
        let fields = err.as_domain().and_then(DomainError::field_errors).unwrap();
        assert!(fields.get("name").is_some());
    }

    #[tokio::test]
    async fn full_update_requires_name() {
        let (service, _) = setup().await;
        let created = service.create_project(project("Backend")).await.unwrap();

        let err = service
            .update_project(created.project.id, UpdateProjectDto::default(), false)
            .await
            .unwrap_err();
        assert!(err.as_domain().and_then(DomainError::field_errors).is_some());

        let patched = service
            .update_project(
                created.project.id,
                UpdateProjectDto {
                    description: Some("API work".into()),
                    ..Default::default()
                },
                true,
            )
            .await
            .unwrap();
        assert_eq!(patched.project.name, "Backend");
        assert_eq!(patched.project.description, "API work");
    }

    #[tokio::test]
    async fn missing_project_is_not_found() {
        let (service, _) = setup().await;
        assert!(service.get_project(7).await.is_err());
        assert!(service.delete_project(7).await.is_err());
    }
}
