//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + a shared provider.

pub mod project_repository;
pub mod repository_provider;
pub mod task_repository;
pub mod user_repository;

pub use project_repository::ProjectRepository;
pub use repository_provider::SeaOrmRepositoryProvider;
pub use task_repository::TaskRepository;
pub use user_repository::UserRepository;
