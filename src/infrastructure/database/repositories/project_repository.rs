use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::domain::{
    AppResult, CreateProjectDto, DomainError, GetProjectDto, Project, ProjectRepositoryInterface,
    UpdateProjectDto,
};
use crate::infrastructure::database::entities::project;
use crate::support::pagination::PaginatedResult;

pub struct ProjectRepository {
    db: DatabaseConnection,
}

impl ProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn project_model_to_domain(model: project::Model) -> Project {
    Project {
        id: model.id,
        name: model.name,
        description: model.description,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl ProjectRepositoryInterface for ProjectRepository {
    async fn create_project(&self, dto: CreateProjectDto) -> AppResult<Project> {
        let now = Utc::now();

        let model = project::ActiveModel {
            name: Set(dto.name),
            description: Set(dto.description),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(project_model_to_domain(model))
    }

    async fn list_projects(&self, dto: GetProjectDto) -> AppResult<PaginatedResult<Project>> {
        let mut query = project::Entity::find();

        if let Some(ref search) = dto.search {
            query = query.filter(project::Column::Name.contains(search.as_str()));
        }

        let total = query.clone().count(&self.db).await?;

        let models = query
            .order_by_asc(project::Column::Id)
            .offset(dto.page.offset())
            .limit(dto.page.limit as u64)
            .all(&self.db)
            .await?;

        let items = models.into_iter().map(project_model_to_domain).collect();

        Ok(PaginatedResult::new(items, total, dto.page.page, dto.page.limit))
    }

    async fn get_project_by_id(&self, id: i32) -> AppResult<Option<Project>> {
        let model = project::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(project_model_to_domain))
    }

    async fn project_exists(&self, id: i32) -> AppResult<bool> {
        let count = project::Entity::find_by_id(id).count(&self.db).await?;
        Ok(count > 0)
    }

    async fn update_project(&self, id: i32, dto: UpdateProjectDto) -> AppResult<Option<Project>> {
        let Some(existing) = project::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: project::ActiveModel = existing.into();

        if let Some(name) = dto.name {
            active.name = Set(name);
        }
        if let Some(description) = dto.description {
            active.description = Set(description);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.db).await?;
        Ok(Some(project_model_to_domain(updated)))
    }

    async fn delete_project(&self, id: i32) -> AppResult<()> {
        let result = project::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Project", id).into());
        }

        Ok(())
    }
}
