use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::{
    AppResult, CreateTaskDto, DomainError, GetTaskDto, Task, TaskRepositoryInterface,
    TaskWithRelations, UpdateTaskDto,
};
use crate::infrastructure::database::entities::{project, task, user};
use crate::support::pagination::PaginatedResult;

pub struct TaskRepository {
    db: DatabaseConnection,
}

impl TaskRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolve assignee usernames and project names for a batch of tasks
    /// with one query per referenced table.
    async fn with_relations(&self, models: Vec<task::Model>) -> AppResult<Vec<TaskWithRelations>> {
        let user_ids: BTreeSet<i32> = models.iter().map(|m| m.assigned_to_id).collect();
        let project_ids: BTreeSet<i32> = models.iter().map(|m| m.project_id).collect();

        let usernames: HashMap<i32, String> = if user_ids.is_empty() {
            HashMap::new()
        } else {
            user::Entity::find()
                .filter(user::Column::Id.is_in(user_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|u| (u.id, u.username))
                .collect()
        };

        let project_names: HashMap<i32, String> = if project_ids.is_empty() {
            HashMap::new()
        } else {
            project::Entity::find()
                .filter(project::Column::Id.is_in(project_ids))
                .all(&self.db)
                .await?
                .into_iter()
                .map(|p| (p.id, p.name))
                .collect()
        };

        Ok(models
            .into_iter()
            .map(|m| TaskWithRelations {
                assignee_username: usernames.get(&m.assigned_to_id).cloned(),
                project_name: project_names.get(&m.project_id).cloned(),
                task: task_model_to_domain(m),
            })
            .collect())
    }

    async fn one_with_relations(&self, model: task::Model) -> AppResult<TaskWithRelations> {
        let mut loaded = self.with_relations(vec![model]).await?;
        loaded
            .pop()
            .ok_or_else(|| DomainError::Conflict("Task vanished while loading".into()).into())
    }
}

fn task_model_to_domain(model: task::Model) -> Task {
    Task {
        id: model.id,
        title: model.title,
        description: model.description,
        project_id: model.project_id,
        assigned_to_id: model.assigned_to_id,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl TaskRepositoryInterface for TaskRepository {
    async fn create_task(&self, dto: CreateTaskDto) -> AppResult<TaskWithRelations> {
        let now = Utc::now();

        let model = task::ActiveModel {
            title: Set(dto.title),
            description: Set(dto.description),
            project_id: Set(dto.project_id),
            assigned_to_id: Set(dto.assigned_to_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        self.one_with_relations(model).await
    }

    async fn list_tasks(&self, dto: GetTaskDto) -> AppResult<PaginatedResult<TaskWithRelations>> {
        let mut query = task::Entity::find();

        if let Some(project_id) = dto.project_id {
            query = query.filter(task::Column::ProjectId.eq(project_id));
        }
        if let Some(assigned_to_id) = dto.assigned_to_id {
            query = query.filter(task::Column::AssignedToId.eq(assigned_to_id));
        }

        let total = query.clone().count(&self.db).await?;

        let models = query
            .order_by_asc(task::Column::Id)
            .offset(dto.page.offset())
            .limit(dto.page.limit as u64)
            .all(&self.db)
            .await?;

        let items = self.with_relations(models).await?;

        Ok(PaginatedResult::new(items, total, dto.page.page, dto.page.limit))
    }

    async fn list_tasks_for_projects(&self, project_ids: &[i32]) -> AppResult<Vec<TaskWithRelations>> {
        if project_ids.is_empty() {
            return Ok(Vec::new());
        }

        let models = task::Entity::find()
            .filter(task::Column::ProjectId.is_in(project_ids.iter().copied()))
            .order_by_asc(task::Column::Id)
            .all(&self.db)
            .await?;

        self.with_relations(models).await
    }

    async fn get_task_by_id(&self, id: i32) -> AppResult<Option<TaskWithRelations>> {
        match task::Entity::find_by_id(id).one(&self.db).await? {
            Some(model) => Ok(Some(self.one_with_relations(model).await?)),
            None => Ok(None),
        }
    }

    async fn update_task(&self, id: i32, dto: UpdateTaskDto) -> AppResult<Option<TaskWithRelations>> {
        let Some(existing) = task::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: task::ActiveModel = existing.into();

        if let Some(title) = dto.title {
            active.title = Set(title);
        }
        if let Some(description) = dto.description {
            active.description = Set(description);
        }
        if let Some(project_id) = dto.project_id {
            active.project_id = Set(project_id);
        }
        if let Some(assigned_to_id) = dto.assigned_to_id {
            active.assigned_to_id = Set(assigned_to_id);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(Some(self.one_with_relations(updated).await?))
    }

    async fn delete_task(&self, id: i32) -> AppResult<()> {
        let result = task::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Task", id).into());
        }

        Ok(())
    }
}
