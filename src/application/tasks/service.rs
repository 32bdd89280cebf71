use std::sync::Arc;

use tracing::info;

use crate::application::rules::{check_text, invalid_pk, REQUIRED, TITLE_MAX};
use crate::domain::{
    AppResult, CreateTaskDto, DomainError, FieldErrors, GetTaskDto, ProjectRepositoryInterface,
    TaskRepositoryInterface, TaskWithRelations, UpdateTaskDto, UserRepositoryInterface,
};
use crate::support::pagination::PaginatedResult;

/// Tasks reference a project and an assignee by id on write; reads carry
/// the resolved project name and username.
pub struct TaskService {
    tasks: Arc<dyn TaskRepositoryInterface>,
    projects: Arc<dyn ProjectRepositoryInterface>,
    users: Arc<dyn UserRepositoryInterface>,
}

impl TaskService {
    pub fn new(
        tasks: Arc<dyn TaskRepositoryInterface>,
        projects: Arc<dyn ProjectRepositoryInterface>,
        users: Arc<dyn UserRepositoryInterface>,
    ) -> Self {
        Self {
            tasks,
            projects,
            users,
        }
    }

    pub async fn create_task(&self, dto: CreateTaskDto) -> AppResult<TaskWithRelations> {
        let mut errors = FieldErrors::new();
        check_text(&mut errors, "title", &dto.title, TITLE_MAX);
        self.check_references(&mut errors, Some(dto.project_id), Some(dto.assigned_to_id))
            .await?;
        errors.into_result()?;

        let created = self.tasks.create_task(dto).await?;
        info!(
            task_id = created.task.id,
            project_id = created.task.project_id,
            assigned_to = created.task.assigned_to_id,
            "Task created"
        );
        Ok(created)
    }

    /// With `partial == false` title, project and assignee must all be sent.
    pub async fn update_task(
        &self,
        id: i32,
        dto: UpdateTaskDto,
        partial: bool,
    ) -> AppResult<TaskWithRelations> {
        if self.tasks.get_task_by_id(id).await?.is_none() {
            return Err(DomainError::not_found("Task", id).into());
        }

        let mut errors = FieldErrors::new();
        match dto.title.as_deref() {
            Some(title) => check_text(&mut errors, "title", title, TITLE_MAX),
            None if !partial => errors.add("title", REQUIRED),
            None => {}
        }
        if !partial {
            if dto.project_id.is_none() {
                errors.add("project", REQUIRED);
            }
            if dto.assigned_to_id.is_none() {
                errors.add("assigned_to", REQUIRED);
            }
        }
        self.check_references(&mut errors, dto.project_id, dto.assigned_to_id)
            .await?;
        errors.into_result()?;

        let updated = self
            .tasks
            .update_task(id, dto)
            .await?
            .ok_or_else(|| DomainError::not_found("Task", id))?;

        info!(task_id = id, "Task updated");
        Ok(updated)
    }

    pub async fn delete_task(&self, id: i32) -> AppResult<()> {
        self.tasks.delete_task(id).await?;
        info!(task_id = id, "Task deleted");
        Ok(())
    }

    pub async fn get_task(&self, id: i32) -> AppResult<TaskWithRelations> {
        self.tasks
            .get_task_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Task", id).into())
    }

    pub async fn list_tasks(&self, dto: GetTaskDto) -> AppResult<PaginatedResult<TaskWithRelations>> {
        self.tasks.list_tasks(dto).await
    }

    /// Unknown ids become field errors on the wire names `project` and
    /// `assigned_to`.
    async fn check_references(
        &self,
        errors: &mut FieldErrors,
        project_id: Option<i32>,
        assigned_to_id: Option<i32>,
    ) -> AppResult<()> {
        if let Some(project_id) = project_id {
            if !self.projects.project_exists(project_id).await? {
                errors.add("project", invalid_pk(project_id));
            }
        }
        if let Some(user_id) = assigned_to_id {
            if !self.users.user_exists(user_id).await? {
                errors.add("assigned_to", invalid_pk(user_id));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use sea_orm_migration::MigratorTrait;

    use super::*;
    use crate::domain::{CreateProjectDto, NewUser};
    use crate::infrastructure::database::migrator::Migrator;
    use crate::infrastructure::database::repositories::SeaOrmRepositoryProvider;
    use crate::infrastructure::database::{init_database, DatabaseConfig};

    struct Fixture {
        service: TaskService,
        project_id: i32,
        bob_id: i32,
        carol_id: i32,
    }

    async fn fixture() -> Fixture {
        let db = init_database(&DatabaseConfig::in_memory()).await.unwrap();
        Migrator::up(&db, None).await.unwrap();
        let repos = SeaOrmRepositoryProvider::new(db);

        let mut ids = Vec::new();
        for username in ["bob", "carol"] {
            let user = repos
                .users()
                .create_user(
                    NewUser {
                        username: username.into(),
                        email: String::new(),
                        first_name: String::new(),
                        last_name: String::new(),
                        password_hash: "x".into(),
                    },
                    None,
                )
                .await
                .unwrap();
            ids.push(user.id);
        }
        let project = repos
            .projects()
            .create_project(CreateProjectDto {
                name: "Backend".into(),
                description: String::new(),
            })
            .await
            .unwrap();

        Fixture {
            service: TaskService::new(repos.tasks(), repos.projects(), repos.users()),
            project_id: project.id,
            bob_id: ids[0],
            carol_id: ids[1],
        }
    }

    fn task(f: &Fixture, title: &str) -> CreateTaskDto {
        CreateTaskDto {
            title: title.into(),
            description: String::new(),
            project_id: f.project_id,
            assigned_to_id: f.bob_id,
        }
    }

    #[tokio::test]
    async fn created_task_resolves_names() {
        let f = fixture().await;
        let created = f.service.create_task(task(&f, "Fix bug")).await.unwrap();

        assert_eq!(created.assignee_username.as_deref(), Some("bob"));
        assert_eq!(created.project_name.as_deref(), Some("Backend"));
    }

    #[tokio::test]
    async fn unknown_assignee_is_a_field_error() {
        let f = fixture().await;
        let dto = CreateTaskDto {
            assigned_to_id: 999,
            ..task(&f, "Fix bug")
        };

        let err = f.service.create_task(dto).await.unwrap_err();
        let fields = err.as_domain().and_then(DomainError::field_errors).unwrap();
        assert_eq!(fields.get("assigned_to"), Some(&[invalid_pk(999)][..]));
        assert!(fields.get("project").is_none());
    }

    #[tokio::test]
    async fn reassigning_changes_display_name() {
        let f = fixture().await;
        let created = f.service.create_task(task(&f, "Fix bug")).await.unwrap();

        let updated = f
            .service
            .update_task(
                created.task.id,
                UpdateTaskDto {
                    assigned_to_id: Some(f.carol_id),
                    ..Default::default()
                },
                true,
            )
            .await
            .unwrap();

        assert_eq!(updated.task.title, "Fix bug");
        assert_eq!(updated.assignee_username.as_deref(), Some("carol"));
    }

    #[tokio::test]
    async fn full_update_requires_all_writable_references() {
        let f = fixture().await;
        let created = f.service.create_task(task(&f, "Fix bug")).await.unwrap();

        let err = f
            .service
            .update_task(
                created.task.id,
                UpdateTaskDto {
                    title: Some("Renamed".into()),
                    ..Default::default()
                },
                false,
            )
            .await
            .unwrap_err();
        let fields = err.as_domain().and_then(DomainError::field_errors).unwrap();
        assert!(fields.get("project").is_some());
        assert!(fields.get("assigned_to").is_some());
        assert!(fields.get("title").is_none());
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let f = fixture().await;
        let created = f.service.create_task(task(&f, "Fix bug")).await.unwrap();

        f.service.delete_task(created.task.id).await.unwrap();
        assert!(f.service.get_task(created.task.id).await.is_err());
    }
}
