//! SeaORM-backed repositories sharing one connection pool.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::project_repository::ProjectRepository;
use super::task_repository::TaskRepository;
use super::user_repository::UserRepository;

/// Per-aggregate repositories built from a single connection.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let user = repos.users().get_user_by_id(1).await?;
/// ```
#[derive(Clone)]
pub struct SeaOrmRepositoryProvider {
    users: Arc<UserRepository>,
    projects: Arc<ProjectRepository>,
    tasks: Arc<TaskRepository>,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            users: Arc::new(UserRepository::new(db.clone())),
            projects: Arc::new(ProjectRepository::new(db.clone())),
            tasks: Arc::new(TaskRepository::new(db)),
        }
    }

    pub fn users(&self) -> Arc<UserRepository> {
        Arc::clone(&self.users)
    }

    pub fn projects(&self) -> Arc<ProjectRepository> {
        Arc::clone(&self.projects)
    }

    pub fn tasks(&self) -> Arc<TaskRepository> {
        Arc::clone(&self.tasks)
    }
}
